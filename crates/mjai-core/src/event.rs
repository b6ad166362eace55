//! mjai wire messages
//!
//! Both directions of the protocol share one shape: a JSON object tagged by a
//! snake_case `"type"` field plus kind-specific fields. Messages are kept as
//! raw JSON objects so fields the bridge never inspects round-trip untouched;
//! only the tag and the `actor` seat index get typed accessors.

use serde_json::{Map, Value};

use crate::error::{BridgeError, Result};

/// Message kind, from the `"type"` tag.
///
/// Unknown tags are preserved in `Other` rather than rejected, so the bridge
/// keeps working when the protocol grows new event kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    StartGame,
    StartKyoku,
    Tsumo,
    Dahai,
    Reach,
    ReachAccepted,
    Chi,
    Pon,
    Ankan,
    Kakan,
    Daiminkan,
    Hora,
    Ryukyoku,
    EndKyoku,
    EndGame,
    /// Control-only pass message
    None,
    /// Unrecognized tag, passed through verbatim
    Other(String),
}

impl EventKind {
    /// Map a wire tag to its kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "start_game" => EventKind::StartGame,
            "start_kyoku" => EventKind::StartKyoku,
            "tsumo" => EventKind::Tsumo,
            "dahai" => EventKind::Dahai,
            "reach" => EventKind::Reach,
            "reach_accepted" => EventKind::ReachAccepted,
            "chi" => EventKind::Chi,
            "pon" => EventKind::Pon,
            "ankan" => EventKind::Ankan,
            "kakan" => EventKind::Kakan,
            "daiminkan" => EventKind::Daiminkan,
            "hora" => EventKind::Hora,
            "ryukyoku" => EventKind::Ryukyoku,
            "end_kyoku" => EventKind::EndKyoku,
            "end_game" => EventKind::EndGame,
            "none" => EventKind::None,
            other => EventKind::Other(other.to_string()),
        }
    }
}

/// Validate that `value` is a tagged JSON object and split out its kind.
fn tagged_object(value: Value) -> Result<(EventKind, Map<String, Value>)> {
    let Value::Object(fields) = value else {
        return Err(BridgeError::MalformedMessage(
            "message is not a JSON object".into(),
        ));
    };
    match fields.get("type").and_then(Value::as_str) {
        Some(tag) => Ok((EventKind::from_tag(tag), fields)),
        None => Err(BridgeError::MalformedMessage(
            "message is missing the \"type\" tag".into(),
        )),
    }
}

/// Inbound protocol message describing a game occurrence.
///
/// Immutable once received, except for the derived `can_act` marker the
/// session attaches when fast-forwarding a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: EventKind,
    fields: Map<String, Value>,
}

impl Event {
    /// Parse one wire message. The `"type"` tag is required.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(raw)?)
    }

    /// Build an event from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let (kind, fields) = tagged_object(value)?;
        Ok(Self { kind, fields })
    }

    /// Synthetic reach declaration, used as the lookahead probe.
    pub fn reach(actor: u8) -> Self {
        let mut fields = Map::new();
        fields.insert("type".into(), Value::from("reach"));
        fields.insert("actor".into(), Value::from(actor));
        Self {
            kind: EventKind::Reach,
            fields,
        }
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Seat index of the player this event is about, if any.
    pub fn actor(&self) -> Option<u8> {
        self.fields
            .get("actor")
            .and_then(Value::as_u64)
            .map(|actor| actor as u8)
    }

    /// Raw access to a kind-specific field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Mark whether the receiving session is expected to act on this event.
    pub fn set_can_act(&mut self, can_act: bool) {
        self.fields.insert("can_act".into(), Value::from(can_act));
    }

    /// Serialize back to the wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }
}

/// Outbound protocol message describing a chosen action.
///
/// Structurally identical to [`Event`]; a reach decision additionally carries
/// the follow-up discard under `reach_dahai`.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    kind: EventKind,
    fields: Map<String, Value>,
}

impl Decision {
    /// Parse one engine reaction. The `"type"` tag is required.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(raw)?)
    }

    /// Build a decision from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let (kind, fields) = tagged_object(value)?;
        Ok(Self { kind, fields })
    }

    /// The control-only pass decision.
    pub fn none() -> Self {
        let mut fields = Map::new();
        fields.insert("type".into(), Value::from("none"));
        Self {
            kind: EventKind::None,
            fields,
        }
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Seat index of the acting player, if any.
    pub fn actor(&self) -> Option<u8> {
        self.fields
            .get("actor")
            .and_then(Value::as_u64)
            .map(|actor| actor as u8)
    }

    /// Raw access to a kind-specific field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// True for a reach declared by `seat` itself.
    pub fn is_reach_by(&self, seat: u8) -> bool {
        self.kind == EventKind::Reach && self.actor() == Some(seat)
    }

    /// Nest the follow-up discard under `reach_dahai`.
    pub fn attach_reach_dahai(&mut self, dahai: Decision) {
        self.fields
            .insert("reach_dahai".into(), Value::Object(dahai.fields));
    }

    /// The attached follow-up discard, if any.
    pub fn reach_dahai(&self) -> Option<&Value> {
        self.fields.get("reach_dahai")
    }

    /// Serialize back to the wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_requires_type_tag() {
        let err = Event::parse(r#"{"actor": 0}"#).unwrap_err();
        assert!(matches!(err, BridgeError::MalformedMessage(_)));
    }

    #[test]
    fn parse_rejects_non_object() {
        let err = Event::parse("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, BridgeError::MalformedMessage(_)));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let err = Decision::parse("dahai 1m").unwrap_err();
        assert!(matches!(err, BridgeError::MalformedMessage(_)));
    }

    #[test]
    fn kind_maps_known_and_unknown_tags() {
        let event = Event::parse(r#"{"type":"tsumo","actor":1,"pai":"5m"}"#).unwrap();
        assert_eq!(*event.kind(), EventKind::Tsumo);
        assert_eq!(event.actor(), Some(1));

        let event = Event::parse(r#"{"type":"wall_count","actor":1}"#).unwrap();
        assert_eq!(*event.kind(), EventKind::Other("wall_count".into()));
    }

    #[test]
    fn unknown_fields_round_trip() {
        let raw = r#"{"type":"dahai","actor":3,"pai":"C","tsumogiri":false}"#;
        let event = Event::parse(raw).unwrap();
        let round_tripped: Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();
        assert_eq!(round_tripped, serde_json::from_str::<Value>(raw).unwrap());
    }

    #[test]
    fn can_act_marker() {
        let mut event = Event::parse(r#"{"type":"tsumo","actor":0,"pai":"1z"}"#).unwrap();
        assert!(event.field("can_act").is_none());
        event.set_can_act(false);
        assert_eq!(event.field("can_act"), Some(&Value::Bool(false)));
    }

    #[test]
    fn synthetic_reach_probe() {
        let probe = Event::reach(2);
        assert_eq!(*probe.kind(), EventKind::Reach);
        assert_eq!(probe.actor(), Some(2));
        let value: Value = serde_json::from_str(&probe.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"type": "reach", "actor": 2}));
    }

    #[test]
    fn reach_dahai_nesting() {
        let mut reach = Decision::parse(r#"{"type":"reach","actor":2}"#).unwrap();
        assert!(reach.is_reach_by(2));
        assert!(!reach.is_reach_by(0));

        let dahai =
            Decision::parse(r#"{"type":"dahai","actor":2,"pai":"9s","tsumogiri":false}"#).unwrap();
        reach.attach_reach_dahai(dahai);

        let value: Value = serde_json::from_str(&reach.to_json().unwrap()).unwrap();
        assert_eq!(value["reach_dahai"]["type"], "dahai");
        assert_eq!(value["reach_dahai"]["pai"], "9s");
    }

    #[test]
    fn none_decision() {
        let value: Value = serde_json::from_str(&Decision::none().to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"type": "none"}));
    }
}
