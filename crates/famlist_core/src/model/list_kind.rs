//! Shared list flavors.

use serde::{Deserialize, Serialize};

/// Which household list a state belongs to.
///
/// Both kinds share the same state manager. Todo lists are normally used with
/// the default category only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    #[default]
    Grocery,
    Todo,
}

impl ListKind {
    /// Stable storage/wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grocery => "grocery",
            Self::Todo => "todo",
        }
    }

    /// Parses a storage/wire string, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "grocery" => Some(Self::Grocery),
            "todo" => Some(Self::Todo),
            _ => None,
        }
    }
}
