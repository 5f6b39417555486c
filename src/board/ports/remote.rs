//! Remote store of record for boards, lists and cards.

use crate::board::domain::{BoardId, BoardSnapshot, CardId, CardRecord, ListId, ListRecord, Title};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote store operations.
pub type RemoteStoreResult<T> = Result<T, RemoteStoreError>;

/// Partial card update. `None` fields are left untouched; an empty
/// description clears the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    /// New title.
    pub title: Option<Title>,
    /// New description.
    pub description: Option<String>,
}

impl CardPatch {
    /// Patch that renames the card.
    #[must_use]
    pub const fn title(title: Title) -> Self {
        Self {
            title: Some(title),
            description: None,
        }
    }

    /// Patch that replaces the description.
    #[must_use]
    pub const fn description(description: String) -> Self {
        Self {
            title: None,
            description: Some(description),
        }
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// Remote persistence contract. Every call is assumed to be authorized.
#[async_trait]
pub trait RemoteBoardStore: Send + Sync {
    /// Fetches the canonical contents of a board.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::BoardNotFound`] for unknown boards.
    async fn fetch_board(&self, board_id: BoardId) -> RemoteStoreResult<BoardSnapshot>;

    /// Creates a list at the end of a board and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::BoardNotFound`] for unknown boards.
    async fn create_list(&self, board_id: BoardId, title: &Title) -> RemoteStoreResult<ListRecord>;

    /// Renames a list.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::ListNotFound`] for unknown lists.
    async fn rename_list(&self, list_id: ListId, title: &Title) -> RemoteStoreResult<()>;

    /// Deletes a list together with its cards.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::ListNotFound`] for unknown lists.
    async fn delete_list(&self, list_id: ListId) -> RemoteStoreResult<()>;

    /// Creates a card at the end of a list and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::ListNotFound`] for unknown lists.
    async fn create_card(&self, list_id: ListId, title: &Title) -> RemoteStoreResult<CardRecord>;

    /// Applies a partial update to a card.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::CardNotFound`] for unknown cards.
    async fn update_card(&self, card_id: CardId, patch: &CardPatch) -> RemoteStoreResult<()>;

    /// Deletes a card.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::CardNotFound`] for unknown cards.
    async fn delete_card(&self, card_id: CardId) -> RemoteStoreResult<()>;

    /// Moves a card to another list.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::CardNotFound`] or
    /// [`RemoteStoreError::ListNotFound`] when either side is unknown.
    async fn move_card(&self, card_id: CardId, destination: ListId) -> RemoteStoreResult<()>;
}

/// Errors returned by remote store implementations.
#[derive(Debug, Clone, Error)]
pub enum RemoteStoreError {
    /// The board does not exist.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The list does not exist.
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    /// The card does not exist.
    #[error("card not found: {0}")]
    CardNotFound(CardId),

    /// The store answered with a non-success status.
    #[error("request rejected with status {status}: {reason}")]
    Rejected {
        /// Status code reported by the store.
        status: u16,
        /// Human-readable reason.
        reason: String,
    },

    /// The store could not be reached or failed internally.
    #[error("remote store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl RemoteStoreError {
    /// Wraps a transport or persistence error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
