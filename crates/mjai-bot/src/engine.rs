//! Decision engine seam
//!
//! The engine is the opaque move-selection backend behind a session. The
//! bridge only ever hands it one serialized event at a time and takes back one
//! serialized decision, or nothing.

use std::collections::HashMap;

use mjai_core::{BridgeError, GameMode, Result};

/// Opaque per-seat decision backend.
///
/// Calls are synchronous with at most one outstanding at a time. The engine
/// may decline to act on any event by returning `None`.
pub trait DecisionEngine: Send {
    /// Feed one serialized event, get the serialized reaction if any.
    fn submit(&mut self, event_json: &str) -> Result<Option<String>>;
}

/// Builds engines for the modes it supports.
///
/// This is the construction seam a session keeps for its whole life: the same
/// factory that built its engine also builds the engines of its forks.
pub trait EngineFactory: Send + Sync {
    /// Modes this factory has a backend for.
    fn supported_modes(&self) -> Vec<GameMode>;

    /// Build a fresh engine for one seat under one rule variant.
    fn build(&self, seat: u8, mode: GameMode) -> Result<Box<dyn DecisionEngine>>;
}

/// Constructor for one mode's engine backend.
pub type EngineBuilder = Box<dyn Fn(u8) -> Result<Box<dyn DecisionEngine>> + Send + Sync>;

/// Strategy table mapping game modes to engine constructors.
///
/// Backends are registered once at startup and resolved at session
/// initialization. There is no default mode.
#[derive(Default)]
pub struct EngineRegistry {
    builders: HashMap<GameMode, EngineBuilder>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend for `mode`, replacing any previous binding.
    pub fn with_backend<F>(mut self, mode: GameMode, builder: F) -> Self
    where
        F: Fn(u8) -> Result<Box<dyn DecisionEngine>> + Send + Sync + 'static,
    {
        self.builders.insert(mode, Box::new(builder));
        self
    }
}

impl EngineFactory for EngineRegistry {
    fn supported_modes(&self) -> Vec<GameMode> {
        let mut modes: Vec<GameMode> = self.builders.keys().copied().collect();
        modes.sort();
        modes
    }

    fn build(&self, seat: u8, mode: GameMode) -> Result<Box<dyn DecisionEngine>> {
        match self.builders.get(&mode) {
            Some(builder) => builder(seat),
            None => Err(BridgeError::UnsupportedMode(mode)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsumogiri::TsumogiriEngine;

    fn registry() -> EngineRegistry {
        EngineRegistry::new().with_backend(GameMode::FourPlayer, |seat| {
            Ok(Box::new(TsumogiriEngine::new(seat)))
        })
    }

    #[test]
    fn resolves_registered_mode() {
        let mut engine = registry().build(1, GameMode::FourPlayer).unwrap();
        let reaction = engine
            .submit(r#"{"type":"tsumo","actor":1,"pai":"5m"}"#)
            .unwrap();
        assert!(reaction.is_some());
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = match registry().build(1, GameMode::ThreePlayer) {
            Ok(_) => panic!("expected unsupported mode error"),
            Err(e) => e,
        };
        assert!(matches!(
            err,
            BridgeError::UnsupportedMode(GameMode::ThreePlayer)
        ));
    }

    #[test]
    fn supported_modes_are_sorted() {
        let registry = EngineRegistry::new()
            .with_backend(GameMode::ThreePlayer, |seat| {
                Ok(Box::new(TsumogiriEngine::new(seat)))
            })
            .with_backend(GameMode::FourPlayer, |seat| {
                Ok(Box::new(TsumogiriEngine::new(seat)))
            });
        assert_eq!(
            registry.supported_modes(),
            vec![GameMode::FourPlayer, GameMode::ThreePlayer]
        );
    }
}
