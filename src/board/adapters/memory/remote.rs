//! In-memory remote store for tests and local demos.
//!
//! Records every call in a journal and can fail the next call of a given
//! operation, so reconciliation paths can be exercised without a server.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{BoardId, BoardSnapshot, CardId, CardRecord, ListId, ListRecord, Title},
    ports::{CardPatch, RemoteBoardStore, RemoteStoreError, RemoteStoreResult},
};

/// Kind of remote call, used to target failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    /// [`RemoteBoardStore::fetch_board`].
    FetchBoard,
    /// [`RemoteBoardStore::create_list`].
    CreateList,
    /// [`RemoteBoardStore::rename_list`].
    RenameList,
    /// [`RemoteBoardStore::delete_list`].
    DeleteList,
    /// [`RemoteBoardStore::create_card`].
    CreateCard,
    /// [`RemoteBoardStore::update_card`].
    UpdateCard,
    /// [`RemoteBoardStore::delete_card`].
    DeleteCard,
    /// [`RemoteBoardStore::move_card`].
    MoveCard,
}

/// Journal entry for one call, including failed ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    /// Board fetch.
    FetchBoard(BoardId),
    /// List creation.
    CreateList {
        /// Owning board.
        board_id: BoardId,
        /// Requested title.
        title: Title,
    },
    /// List rename.
    RenameList {
        /// Renamed list.
        list_id: ListId,
        /// New title.
        title: Title,
    },
    /// List deletion.
    DeleteList(ListId),
    /// Card creation.
    CreateCard {
        /// Owning list.
        list_id: ListId,
        /// Requested title.
        title: Title,
    },
    /// Partial card update.
    UpdateCard {
        /// Updated card.
        card_id: CardId,
        /// Requested changes.
        patch: CardPatch,
    },
    /// Card deletion.
    DeleteCard(CardId),
    /// Card move.
    MoveCard {
        /// Moved card.
        card_id: CardId,
        /// Destination list.
        destination: ListId,
    },
}

impl RemoteCall {
    /// Returns the operation kind of this call.
    #[must_use]
    pub const fn operation(&self) -> RemoteOperation {
        match self {
            Self::FetchBoard(_) => RemoteOperation::FetchBoard,
            Self::CreateList { .. } => RemoteOperation::CreateList,
            Self::RenameList { .. } => RemoteOperation::RenameList,
            Self::DeleteList(_) => RemoteOperation::DeleteList,
            Self::CreateCard { .. } => RemoteOperation::CreateCard,
            Self::UpdateCard { .. } => RemoteOperation::UpdateCard,
            Self::DeleteCard(_) => RemoteOperation::DeleteCard,
            Self::MoveCard { .. } => RemoteOperation::MoveCard,
        }
    }
}

/// Thread-safe in-memory remote store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemoteStore {
    state: Arc<RwLock<InMemoryRemoteState>>,
}

#[derive(Debug, Default)]
struct InMemoryRemoteState {
    boards: Vec<BoardSnapshot>,
    journal: Vec<RemoteCall>,
    pending_failures: Vec<RemoteOperation>,
}

impl InMemoryRemoteState {
    fn board_mut(&mut self, board_id: BoardId) -> Option<&mut BoardSnapshot> {
        self.boards
            .iter_mut()
            .find(|snapshot| snapshot.board.id == board_id)
    }

    fn board_holding_list(&mut self, list_id: ListId) -> Option<&mut BoardSnapshot> {
        self.boards
            .iter_mut()
            .find(|snapshot| snapshot.lists.iter().any(|list| list.id == list_id))
    }

    fn card_mut(&mut self, card_id: CardId) -> Option<&mut CardRecord> {
        self.boards
            .iter_mut()
            .flat_map(|snapshot| snapshot.cards.iter_mut())
            .find(|card| card.id == card_id)
    }

    fn take_card(&mut self, card_id: CardId) -> Option<CardRecord> {
        self.boards.iter_mut().find_map(|snapshot| {
            let position = snapshot.cards.iter().position(|card| card.id == card_id)?;
            Some(snapshot.cards.remove(position))
        })
    }

    /// Journals `call` and consumes a pending failure for its operation.
    fn record(&mut self, call: RemoteCall) -> RemoteStoreResult<()> {
        let operation = call.operation();
        self.journal.push(call);
        if let Some(position) = self
            .pending_failures
            .iter()
            .position(|pending| *pending == operation)
        {
            self.pending_failures.remove(position);
            return Err(RemoteStoreError::Rejected {
                status: 503,
                reason: format!("injected failure for {operation:?}"),
            });
        }
        Ok(())
    }
}

fn lock_error(err: &impl std::fmt::Display) -> RemoteStoreError {
    RemoteStoreError::unavailable(std::io::Error::other(err.to_string()))
}

impl InMemoryRemoteStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write<T>(
        &self,
        operation: impl FnOnce(&mut InMemoryRemoteState) -> RemoteStoreResult<T>,
    ) -> RemoteStoreResult<T> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        operation(&mut state)
    }

    /// Stores a board snapshot, replacing any board with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::Unavailable`] when the state lock is
    /// poisoned.
    pub fn seed(&self, snapshot: BoardSnapshot) -> RemoteStoreResult<()> {
        self.write(|state| {
            state
                .boards
                .retain(|existing| existing.board.id != snapshot.board.id);
            state.boards.push(snapshot);
            Ok(())
        })
    }

    /// Returns the stored snapshot of a board without journaling the read.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::Unavailable`] when the state lock is
    /// poisoned.
    pub fn stored_board(&self, board_id: BoardId) -> RemoteStoreResult<Option<BoardSnapshot>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state
            .boards
            .iter()
            .find(|snapshot| snapshot.board.id == board_id)
            .cloned())
    }

    /// Returns every call received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::Unavailable`] when the state lock is
    /// poisoned.
    pub fn calls(&self) -> RemoteStoreResult<Vec<RemoteCall>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.journal.clone())
    }

    /// Makes the next call of `operation` fail with a 503 rejection.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::Unavailable`] when the state lock is
    /// poisoned.
    pub fn fail_next(&self, operation: RemoteOperation) -> RemoteStoreResult<()> {
        self.write(|state| {
            state.pending_failures.push(operation);
            Ok(())
        })
    }
}

#[async_trait]
impl RemoteBoardStore for InMemoryRemoteStore {
    async fn fetch_board(&self, board_id: BoardId) -> RemoteStoreResult<BoardSnapshot> {
        self.write(|state| {
            state.record(RemoteCall::FetchBoard(board_id))?;
            state
                .boards
                .iter()
                .find(|snapshot| snapshot.board.id == board_id)
                .cloned()
                .ok_or(RemoteStoreError::BoardNotFound(board_id))
        })
    }

    async fn create_list(&self, board_id: BoardId, title: &Title) -> RemoteStoreResult<ListRecord> {
        self.write(|state| {
            state.record(RemoteCall::CreateList {
                board_id,
                title: title.clone(),
            })?;
            let snapshot = state
                .board_mut(board_id)
                .ok_or(RemoteStoreError::BoardNotFound(board_id))?;
            let record = ListRecord {
                id: ListId::new(),
                title: title.clone(),
            };
            snapshot.lists.push(record.clone());
            Ok(record)
        })
    }

    async fn rename_list(&self, list_id: ListId, title: &Title) -> RemoteStoreResult<()> {
        self.write(|state| {
            state.record(RemoteCall::RenameList {
                list_id,
                title: title.clone(),
            })?;
            let list = state
                .boards
                .iter_mut()
                .flat_map(|snapshot| snapshot.lists.iter_mut())
                .find(|list| list.id == list_id)
                .ok_or(RemoteStoreError::ListNotFound(list_id))?;
            list.title = title.clone();
            Ok(())
        })
    }

    async fn delete_list(&self, list_id: ListId) -> RemoteStoreResult<()> {
        self.write(|state| {
            state.record(RemoteCall::DeleteList(list_id))?;
            let snapshot = state
                .board_holding_list(list_id)
                .ok_or(RemoteStoreError::ListNotFound(list_id))?;
            snapshot.lists.retain(|list| list.id != list_id);
            snapshot.cards.retain(|card| card.list_id != list_id);
            Ok(())
        })
    }

    async fn create_card(&self, list_id: ListId, title: &Title) -> RemoteStoreResult<CardRecord> {
        self.write(|state| {
            state.record(RemoteCall::CreateCard {
                list_id,
                title: title.clone(),
            })?;
            let snapshot = state
                .board_holding_list(list_id)
                .ok_or(RemoteStoreError::ListNotFound(list_id))?;
            let record = CardRecord {
                id: CardId::new(),
                list_id,
                title: title.clone(),
                description: None,
            };
            snapshot.cards.push(record.clone());
            Ok(record)
        })
    }

    async fn update_card(&self, card_id: CardId, patch: &CardPatch) -> RemoteStoreResult<()> {
        self.write(|state| {
            state.record(RemoteCall::UpdateCard {
                card_id,
                patch: patch.clone(),
            })?;
            let card = state
                .card_mut(card_id)
                .ok_or(RemoteStoreError::CardNotFound(card_id))?;
            if let Some(title) = &patch.title {
                card.title = title.clone();
            }
            if let Some(description) = &patch.description {
                card.description = Some(description.clone()).filter(|text| !text.is_empty());
            }
            Ok(())
        })
    }

    async fn delete_card(&self, card_id: CardId) -> RemoteStoreResult<()> {
        self.write(|state| {
            state.record(RemoteCall::DeleteCard(card_id))?;
            state
                .take_card(card_id)
                .map(|_| ())
                .ok_or(RemoteStoreError::CardNotFound(card_id))
        })
    }

    async fn move_card(&self, card_id: CardId, destination: ListId) -> RemoteStoreResult<()> {
        self.write(|state| {
            state.record(RemoteCall::MoveCard {
                card_id,
                destination,
            })?;
            if state.board_holding_list(destination).is_none() {
                return Err(RemoteStoreError::ListNotFound(destination));
            }
            let current = state
                .card_mut(card_id)
                .ok_or(RemoteStoreError::CardNotFound(card_id))?;
            if current.list_id == destination {
                return Ok(());
            }
            let mut card = state
                .take_card(card_id)
                .ok_or(RemoteStoreError::CardNotFound(card_id))?;
            card.list_id = destination;
            let snapshot = state
                .board_holding_list(destination)
                .ok_or(RemoteStoreError::ListNotFound(destination))?;
            snapshot.cards.push(card);
            Ok(())
        })
    }
}
