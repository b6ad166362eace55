//! # mjai-bot
//!
//! mjai protocol bot harness.
//!
//! This crate provides:
//! - `DecisionEngine` seam and the mode-keyed `EngineRegistry`
//! - `BotSession` reaction protocol (reach lookahead, echo suppression)
//! - Baseline tsumogiri engine for wiring tests
//! - Line-oriented stdio driver

pub mod driver;
pub mod engine;
pub mod session;
pub mod tsumogiri;

pub use engine::{DecisionEngine, EngineBuilder, EngineFactory, EngineRegistry};
pub use session::BotSession;
pub use tsumogiri::TsumogiriEngine;
