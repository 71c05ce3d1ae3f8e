use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use super::todo::TodoId;

/// Identifier-generation strategy. Either strategy can back the same API
/// contract; repositories pick the one matching their key type.
pub trait IdProvider: Send + Sync + 'static {
    fn next_id(&self) -> TodoId;
}

/// Sequential integer ids starting at 1, never reused after deletions.
#[derive(Debug)]
pub struct SerialIds {
    next: AtomicU64,
}

impl Default for SerialIds {
    fn default() -> Self {
        Self { next: AtomicU64::new(1) }
    }
}

impl IdProvider for SerialIds {
    fn next_id(&self) -> TodoId {
        TodoId::Serial(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// Random 128-bit tokens, independent of insertion order.
#[derive(Debug, Default)]
pub struct TokenIds;

impl IdProvider for TokenIds {
    fn next_id(&self) -> TodoId {
        TodoId::Token(Uuid::new_v4())
    }
}
