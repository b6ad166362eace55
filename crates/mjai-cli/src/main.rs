//! mjai bot process
//!
//! Wires a bot session to stdin/stdout with the baseline tsumogiri engine:
//!
//! ```text
//! mjai-bot <seat> [4p|3p]
//! ```
//!
//! `seat` is the 0-based seat index; the mode defaults to `4p`. Protocol
//! messages travel on stdout, logs go to stderr.

use anyhow::{Context, Result, bail};
use mjai_bot::{BotSession, EngineRegistry, TsumogiriEngine, driver};
use mjai_core::GameMode;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; keep logging off it
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut args = std::env::args().skip(1);
    let seat: u8 = args
        .next()
        .context("usage: mjai-bot <seat> [4p|3p]")?
        .parse()
        .context("seat must be an integer in 0..=3")?;
    let mode = match args.next().as_deref() {
        None | Some("4p") => GameMode::FourPlayer,
        Some("3p") => GameMode::ThreePlayer,
        Some(other) => bail!("unknown mode: {other} (expected 4p or 3p)"),
    };

    let registry = EngineRegistry::new()
        .with_backend(GameMode::FourPlayer, |seat| {
            Ok(Box::new(TsumogiriEngine::new(seat)))
        })
        .with_backend(GameMode::ThreePlayer, |seat| {
            Ok(Box::new(TsumogiriEngine::new(seat)))
        });

    let mut session = BotSession::new("tsumogiri", Arc::new(registry));
    session.initialize(seat, mode)?;
    info!("{} ready, seat {} mode {}", session.description(), seat, mode);

    driver::run_stdio(&mut session).await?;
    Ok(())
}
