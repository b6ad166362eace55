//! # mjai-core
//!
//! Core types for the mjai bridge.
//!
//! This crate provides the foundational types used across the bridge:
//! - Wire messages (`Event` in, `Decision` out) and their kind tags
//! - Game mode selection
//! - Error types

pub mod error;
pub mod event;
pub mod mode;

pub use error::{BridgeError, Result};
pub use event::{Decision, Event, EventKind};
pub use mode::GameMode;
