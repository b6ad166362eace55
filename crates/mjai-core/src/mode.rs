//! Game mode selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule variant a session plays under.
///
/// There is no default: the mode is threaded explicitly through session
/// construction and engine selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Standard four-player riichi
    #[serde(rename = "4p")]
    FourPlayer,
    /// Three-player (sanma) riichi
    #[serde(rename = "3p")]
    ThreePlayer,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::FourPlayer => write!(f, "4p"),
            GameMode::ThreePlayer => write!(f, "3p"),
        }
    }
}
