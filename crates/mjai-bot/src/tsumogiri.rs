//! Baseline tsumogiri engine
//!
//! Discards whatever it just drew and declines everything else. No strategy,
//! no rules; it exists so the wiring can be exercised end to end without a
//! real engine attached.

use mjai_core::{BridgeError, Event, EventKind, Result};
use serde_json::json;

use crate::engine::DecisionEngine;

/// Engine that always discards its own draw.
pub struct TsumogiriEngine {
    seat: u8,
}

impl TsumogiriEngine {
    pub fn new(seat: u8) -> Self {
        Self { seat }
    }
}

impl DecisionEngine for TsumogiriEngine {
    fn submit(&mut self, event_json: &str) -> Result<Option<String>> {
        let event = Event::parse(event_json)?;
        if !matches!(event.kind(), EventKind::Tsumo) || event.actor() != Some(self.seat) {
            return Ok(None);
        }
        let Some(pai) = event.field("pai") else {
            return Err(BridgeError::MalformedMessage(
                "own tsumo event is missing \"pai\"".into(),
            ));
        };
        let reaction = json!({
            "type": "dahai",
            "actor": self.seat,
            "pai": pai,
            "tsumogiri": true,
        });
        Ok(Some(reaction.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mjai_core::Decision;

    #[test]
    fn discards_own_draw() {
        let mut engine = TsumogiriEngine::new(2);
        let reaction = engine
            .submit(r#"{"type":"tsumo","actor":2,"pai":"7p"}"#)
            .unwrap()
            .unwrap();
        let decision = Decision::parse(&reaction).unwrap();
        assert_eq!(*decision.kind(), EventKind::Dahai);
        assert_eq!(decision.actor(), Some(2));
        assert_eq!(decision.field("pai"), Some(&"7p".into()));
        assert_eq!(decision.field("tsumogiri"), Some(&true.into()));
    }

    #[test]
    fn declines_foreign_events() {
        let mut engine = TsumogiriEngine::new(2);
        assert!(
            engine
                .submit(r#"{"type":"tsumo","actor":0,"pai":"?"}"#)
                .unwrap()
                .is_none()
        );
        assert!(
            engine
                .submit(r#"{"type":"dahai","actor":1,"pai":"1z","tsumogiri":true}"#)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn own_draw_without_pai_is_malformed() {
        let mut engine = TsumogiriEngine::new(2);
        let err = engine.submit(r#"{"type":"tsumo","actor":2}"#).unwrap_err();
        assert!(matches!(err, BridgeError::MalformedMessage(_)));
    }
}
