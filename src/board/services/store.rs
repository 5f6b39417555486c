//! Single source of truth for the currently loaded board.

use super::drafts::EditBuffer;
use crate::board::domain::{
    Board, BoardDomainError, BoardId, CardId, CardMutation, ListId, ListMutation, MutationEffect,
};

/// How [`BoardStore::replace`] interpreted the incoming board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceKind {
    /// No board was loaded before.
    Loaded,
    /// A different board replaced the previous one.
    Switched,
    /// The same board was refreshed.
    Refreshed,
}

/// Loaded board plus the UI state derived from it.
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    board: Option<Board>,
    search: String,
    active_card: Option<CardId>,
    drafts: EditBuffer,
}

impl BoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the loaded board.
    #[must_use]
    pub const fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub(crate) const fn board_mut(&mut self) -> Option<&mut Board> {
        self.board.as_mut()
    }

    /// Returns the loaded board identifier.
    #[must_use]
    pub fn board_id(&self) -> Option<BoardId> {
        self.board.as_ref().map(Board::id)
    }

    /// Returns the current search string.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replaces the search string.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Returns the selected card.
    #[must_use]
    pub const fn active_card(&self) -> Option<CardId> {
        self.active_card
    }

    /// Selects a card; returns `false` when it is not on the board.
    pub fn select_card(&mut self, card_id: CardId) -> bool {
        let exists = self
            .board
            .as_ref()
            .is_some_and(|board| board.locate_card(card_id).is_some());
        if exists {
            self.active_card = Some(card_id);
        }
        exists
    }

    /// Clears the card selection.
    pub const fn clear_selection(&mut self) {
        self.active_card = None;
    }

    /// Returns the pending field drafts.
    #[must_use]
    pub const fn drafts(&self) -> &EditBuffer {
        &self.drafts
    }

    /// Returns the pending field drafts for editing.
    pub const fn drafts_mut(&mut self) -> &mut EditBuffer {
        &mut self.drafts
    }

    /// Installs a board.
    ///
    /// Switching to another board resets search, selection and drafts. A
    /// refresh of the same board keeps the search and keeps the selection and
    /// drafts of cards that still exist.
    pub fn replace(&mut self, board: Board) -> ReplaceKind {
        let kind = match self.board_id() {
            None => ReplaceKind::Loaded,
            Some(current) if current == board.id() => ReplaceKind::Refreshed,
            Some(_) => ReplaceKind::Switched,
        };
        match kind {
            ReplaceKind::Refreshed => {
                if self
                    .active_card
                    .is_some_and(|card_id| board.locate_card(card_id).is_none())
                {
                    self.active_card = None;
                }
                self.drafts
                    .retain_cards(|card_id| board.locate_card(card_id).is_some());
            }
            ReplaceKind::Loaded | ReplaceKind::Switched => {
                self.search.clear();
                self.active_card = None;
                self.drafts.clear();
            }
        }
        self.board = Some(board);
        kind
    }

    /// Applies a list mutation to the loaded board; `Missing` without one.
    ///
    /// # Errors
    ///
    /// Propagates [`Board::apply_list_mutation`] errors.
    pub fn apply_list_mutation(
        &mut self,
        list_id: ListId,
        mutation: ListMutation,
    ) -> Result<MutationEffect, BoardDomainError> {
        self.board.as_mut().map_or(Ok(MutationEffect::Missing), |board| {
            board.apply_list_mutation(list_id, mutation)
        })
    }

    /// Applies a card mutation to the loaded board; `Missing` without one.
    ///
    /// # Errors
    ///
    /// Propagates [`Board::apply_card_mutation`] errors.
    pub fn apply_card_mutation(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        mutation: CardMutation,
    ) -> Result<MutationEffect, BoardDomainError> {
        self.board.as_mut().map_or(Ok(MutationEffect::Missing), |board| {
            board.apply_card_mutation(list_id, card_id, mutation)
        })
    }
}
