//! User-facing feedback: confirmations, notices and celebrations.

use crate::board::domain::{CardId, ListId, Title};

/// Destructive action awaiting a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationPrompt {
    /// Delete a card.
    DeleteCard {
        /// Card title.
        title: Title,
    },
    /// Delete a list and its cards.
    DeleteList {
        /// List title.
        title: Title,
        /// Number of cards deleted with it.
        card_count: usize,
    },
    /// Remove every card of a list.
    ClearList {
        /// List title.
        title: Title,
        /// Number of cards removed.
        card_count: usize,
    },
    /// Delete a comment.
    DeleteComment,
    /// Remove a member from the board roster.
    RemoveMember {
        /// Member display name.
        name: String,
    },
}

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational.
    Info,
    /// Something was rejected or reverted.
    Warning,
    /// An operation failed.
    Error,
}

/// Transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub severity: Severity,
    /// Message text.
    pub message: String,
}

impl Notice {
    /// Informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// Warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Decorative effect; never a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Celebration {
    /// A card landed in a "done" list.
    CardCompleted {
        /// Moved card.
        card_id: CardId,
        /// Destination list.
        list_id: ListId,
    },
    /// A card's checklist became fully completed.
    ChecklistCompleted {
        /// Card owning the checklist.
        card_id: CardId,
    },
}

/// Feedback sink provided by the rendering layer.
pub trait UserFeedback: Send + Sync {
    /// Asks the user to confirm a destructive action.
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool;

    /// Shows a transient notice.
    fn notify(&self, notice: Notice);

    /// Plays a celebration.
    fn celebrate(&self, celebration: Celebration);
}
