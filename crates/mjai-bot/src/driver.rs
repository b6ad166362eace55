//! Line-oriented driver
//!
//! One JSON event per input line, one reaction per output line. When the
//! session has nothing to say the control message `{"type":"none"}` is
//! written, so every input line is answered exactly once.

use mjai_core::{Decision, Event, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::session::BotSession;

/// Drive a session from `reader` to `writer` until EOF.
///
/// A malformed input line aborts with `BridgeError::MalformedMessage`; it is
/// never skipped.
pub async fn run<R, W>(session: &mut BotSession, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            info!("event stream closed (EOF)");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!("received: {}", trimmed);

        let event = Event::parse(trimmed)?;
        let reaction = match session.react(event)? {
            Some(decision) => decision,
            None => Decision::none(),
        };
        let reaction_json = reaction.to_json()?;
        debug!("sending: {}", reaction_json);

        writer.write_all(reaction_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}

/// Drive a session on real stdin/stdout.
pub async fn run_stdio(session: &mut BotSession) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    run(session, reader, writer).await
}
