use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a todo item. The in-memory store assigns sequential
/// integers; the durable store assigns random string tokens. Untagged, so
/// consumers always see a bare number or string under `id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TodoId {
    Serial(u64),
    Token(Uuid),
}

impl TodoId {
    /// Parse a path segment: integer first, then UUID token.
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(n) = s.parse::<u64>() {
            return Some(Self::Serial(n));
        }
        Uuid::parse_str(s).ok().map(Self::Token)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serial(n) => write!(f, "{n}"),
            Self::Token(u) => write!(f, "{u}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub content: String,
}
