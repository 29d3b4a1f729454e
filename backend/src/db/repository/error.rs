//! Store failures.
//!
//! The in-memory store has a single failure mode: a lookup by identity that finds
//! nothing. The [`ErrorContext`] records which operation missed so log lines can tell
//! a failed update from a failed delete; only the fixed message reaches clients.

use std::fmt;

use crate::models::ItemId;

/// Message carried by every item lookup miss.
pub const ITEM_NOT_FOUND: &str = "Item not found";

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where a lookup miss happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub operation: &'static str,
    pub item_id: ItemId,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[operation={}, item_id={}]", self.operation, self.item_id)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("{message} {context}")]
    NotFound {
        message: &'static str,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// No item with identity `item_id` exists at the time of `operation`.
    pub fn item_not_found(operation: &'static str, item_id: ItemId) -> Self {
        Self::NotFound {
            message: ITEM_NOT_FOUND,
            context: ErrorContext { operation, item_id },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_not_found_display() {
        let err = RepositoryError::item_not_found("get_item", ItemId::new(4));
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Item not found [operation=get_item, item_id=4]"
        );
    }

    #[test]
    fn test_context_names_the_operation() {
        let RepositoryError::NotFound { message, context } =
            RepositoryError::item_not_found("delete_item", ItemId::new(2));
        assert_eq!(message, ITEM_NOT_FOUND);
        assert_eq!(context.operation, "delete_item");
        assert_eq!(context.item_id, ItemId::new(2));
    }
}
