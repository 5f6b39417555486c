//! Reconciliation of local board state with the remote store of record.
//!
//! Optimistic commands describe changes already applied locally; if the
//! remote call fails the board is refetched and the completion carries the
//! canonical snapshot. Pessimistic commands describe creations that are only
//! applied locally once the remote store returns the new entity.
//!
//! [`Reconciler::dispatch`] never fails: every outcome is a
//! [`SyncCompletion`] for the session to apply.

use crate::board::{
    domain::{BoardId, BoardSnapshot, CardId, CardRecord, ListId, ListRecord, Title},
    ports::{CardPatch, RemoteBoardStore, RemoteStoreError},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Card contents copied by [`SyncCommand::DuplicateList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    /// Card title.
    pub title: Title,
    /// Card description.
    pub description: Option<String>,
}

/// Remote work queued by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    /// Persist a card move (optimistic).
    MoveCard {
        /// Board the card belongs to.
        board_id: BoardId,
        /// Moved card.
        card_id: CardId,
        /// Destination list.
        destination: ListId,
    },
    /// Persist a card title or description edit (optimistic).
    UpdateCard {
        /// Board the card belongs to.
        board_id: BoardId,
        /// Edited card.
        card_id: CardId,
        /// Changed fields.
        patch: CardPatch,
    },
    /// Persist a list rename (optimistic).
    RenameList {
        /// Board the list belongs to.
        board_id: BoardId,
        /// Renamed list.
        list_id: ListId,
        /// New title.
        title: Title,
    },
    /// Persist a list deletion (optimistic).
    DeleteList {
        /// Board the list belonged to.
        board_id: BoardId,
        /// Deleted list.
        list_id: ListId,
    },
    /// Persist a card deletion (optimistic).
    DeleteCard {
        /// Board the card belonged to.
        board_id: BoardId,
        /// Deleted card.
        card_id: CardId,
    },
    /// Create a list (pessimistic).
    CreateList {
        /// Owning board.
        board_id: BoardId,
        /// Requested title.
        title: Title,
    },
    /// Create a card (pessimistic).
    CreateCard {
        /// Owning board.
        board_id: BoardId,
        /// Owning list.
        list_id: ListId,
        /// Requested title.
        title: Title,
    },
    /// Create a copy of a list with its cards (pessimistic).
    DuplicateList {
        /// Owning board.
        board_id: BoardId,
        /// Title of the copy.
        title: Title,
        /// Board position of the copy.
        index: usize,
        /// Cards to recreate, in order.
        cards: Vec<CardDraft>,
    },
}

impl SyncCommand {
    /// Returns the board this command belongs to.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        match self {
            Self::MoveCard { board_id, .. }
            | Self::UpdateCard { board_id, .. }
            | Self::RenameList { board_id, .. }
            | Self::DeleteList { board_id, .. }
            | Self::DeleteCard { board_id, .. }
            | Self::CreateList { board_id, .. }
            | Self::CreateCard { board_id, .. }
            | Self::DuplicateList { board_id, .. } => *board_id,
        }
    }

    /// Returns `true` when the local change was applied before dispatch.
    #[must_use]
    pub const fn is_optimistic(&self) -> bool {
        !matches!(
            self,
            Self::CreateList { .. } | Self::CreateCard { .. } | Self::DuplicateList { .. }
        )
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::MoveCard { .. } => "move_card",
            Self::UpdateCard { .. } => "update_card",
            Self::RenameList { .. } => "rename_list",
            Self::DeleteList { .. } => "delete_list",
            Self::DeleteCard { .. } => "delete_card",
            Self::CreateList { .. } => "create_list",
            Self::CreateCard { .. } => "create_card",
            Self::DuplicateList { .. } => "duplicate_list",
        }
    }
}

/// Outcome of dispatching one command.
#[derive(Debug, Clone)]
pub enum SyncCompletion {
    /// An optimistic change was persisted.
    Persisted {
        /// Board the command belonged to.
        board_id: BoardId,
    },
    /// A list was created remotely, possibly with copied cards.
    ListCreated {
        /// Owning board.
        board_id: BoardId,
        /// Stored list.
        list: ListRecord,
        /// Stored cards of the list, in order.
        cards: Vec<CardRecord>,
        /// Board position requested for the list; `None` appends.
        index: Option<usize>,
    },
    /// A card was created remotely.
    CardCreated {
        /// Owning board.
        board_id: BoardId,
        /// Stored card.
        card: CardRecord,
    },
    /// A remote call failed and the canonical board was refetched.
    Refreshed {
        /// Refetched board.
        board_id: BoardId,
        /// Canonical contents.
        snapshot: BoardSnapshot,
        /// Failure that triggered the refetch.
        cause: RemoteStoreError,
    },
    /// A remote call failed and local state was not refreshed.
    Failed {
        /// Board the command belonged to.
        board_id: BoardId,
        /// Failure of the command.
        cause: RemoteStoreError,
        /// Failure of the refetch, when one was attempted.
        refetch: Option<RemoteStoreError>,
    },
}

impl SyncCompletion {
    /// Returns the board this completion belongs to.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        match self {
            Self::Persisted { board_id }
            | Self::ListCreated { board_id, .. }
            | Self::CardCreated { board_id, .. }
            | Self::Refreshed { board_id, .. }
            | Self::Failed { board_id, .. } => *board_id,
        }
    }
}

/// Executes [`SyncCommand`]s against the remote store.
///
/// Owns only the remote port, so clones can run on any task while the
/// session keeps handling local events.
pub struct Reconciler<R>
where
    R: RemoteBoardStore,
{
    remote: Arc<R>,
}

impl<R> Clone for Reconciler<R>
where
    R: RemoteBoardStore,
{
    fn clone(&self) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
        }
    }
}

impl<R> Reconciler<R>
where
    R: RemoteBoardStore,
{
    /// Creates a reconciler for a remote store.
    #[must_use]
    pub const fn new(remote: Arc<R>) -> Self {
        Self { remote }
    }

    /// Returns the remote store.
    #[must_use]
    pub const fn remote(&self) -> &Arc<R> {
        &self.remote
    }

    /// Executes one command. Never retries.
    pub async fn dispatch(&self, command: SyncCommand) -> SyncCompletion {
        let board_id = command.board_id();
        let operation = command.label();
        debug!(%board_id, operation, "dispatching remote command");
        let result = match command {
            SyncCommand::MoveCard {
                card_id,
                destination,
                ..
            } => self.remote.move_card(card_id, destination).await,
            SyncCommand::UpdateCard { card_id, patch, .. } => {
                self.remote.update_card(card_id, &patch).await
            }
            SyncCommand::RenameList { list_id, title, .. } => {
                self.remote.rename_list(list_id, &title).await
            }
            SyncCommand::DeleteList { list_id, .. } => self.remote.delete_list(list_id).await,
            SyncCommand::DeleteCard { card_id, .. } => self.remote.delete_card(card_id).await,
            SyncCommand::CreateList { title, .. } => {
                return match self.remote.create_list(board_id, &title).await {
                    Ok(list) => SyncCompletion::ListCreated {
                        board_id,
                        list,
                        cards: Vec::new(),
                        index: None,
                    },
                    Err(cause) => Self::creation_failed(board_id, operation, cause),
                };
            }
            SyncCommand::CreateCard { list_id, title, .. } => {
                return match self.remote.create_card(list_id, &title).await {
                    Ok(card) => SyncCompletion::CardCreated { board_id, card },
                    Err(cause) => Self::creation_failed(board_id, operation, cause),
                };
            }
            SyncCommand::DuplicateList {
                title,
                index,
                cards,
                ..
            } => return self.duplicate_list(board_id, &title, index, cards).await,
        };
        match result {
            Ok(()) => SyncCompletion::Persisted { board_id },
            Err(cause) => self.refetch_after(board_id, operation, cause).await,
        }
    }

    async fn duplicate_list(
        &self,
        board_id: BoardId,
        title: &Title,
        index: usize,
        drafts: Vec<CardDraft>,
    ) -> SyncCompletion {
        let operation = "duplicate_list";
        let list = match self.remote.create_list(board_id, title).await {
            Ok(list) => list,
            Err(cause) => return Self::creation_failed(board_id, operation, cause),
        };
        let mut cards = Vec::with_capacity(drafts.len());
        for draft in drafts {
            match self.copy_card(list.id, draft).await {
                Ok(card) => cards.push(card),
                Err(cause) => return self.refetch_after(board_id, operation, cause).await,
            }
        }
        SyncCompletion::ListCreated {
            board_id,
            list,
            cards,
            index: Some(index),
        }
    }

    async fn copy_card(
        &self,
        list_id: ListId,
        draft: CardDraft,
    ) -> Result<CardRecord, RemoteStoreError> {
        let mut card = self.remote.create_card(list_id, &draft.title).await?;
        if let Some(description) = draft.description {
            self.remote
                .update_card(card.id, &CardPatch::description(description.clone()))
                .await?;
            card.description = Some(description);
        }
        Ok(card)
    }

    async fn refetch_after(
        &self,
        board_id: BoardId,
        operation: &'static str,
        cause: RemoteStoreError,
    ) -> SyncCompletion {
        warn!(%board_id, operation, error = %cause, "remote command failed, refetching board");
        match self.remote.fetch_board(board_id).await {
            Ok(snapshot) => SyncCompletion::Refreshed {
                board_id,
                snapshot,
                cause,
            },
            Err(refetch) => {
                warn!(%board_id, error = %refetch, "refetch after failed command also failed");
                SyncCompletion::Failed {
                    board_id,
                    cause,
                    refetch: Some(refetch),
                }
            }
        }
    }

    fn creation_failed(
        board_id: BoardId,
        operation: &'static str,
        cause: RemoteStoreError,
    ) -> SyncCompletion {
        warn!(%board_id, operation, error = %cause, "remote creation failed");
        SyncCompletion::Failed {
            board_id,
            cause,
            refetch: None,
        }
    }
}
