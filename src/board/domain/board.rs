//! Board aggregate: list order, lists and their cards.

use super::{
    Background, BoardDomainError, BoardId, Card, CardId, CardMutation, IntegrityViolation, List,
    ListId, ListMutation, TeamId, Title,
};
use crate::ordering::{OrderingError, move_within, transfer_between};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Board header fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    /// Board identifier.
    pub id: BoardId,
    /// Display name.
    pub name: Title,
    /// Background descriptor.
    pub background: Background,
    /// Owning team.
    pub team_id: TeamId,
}

/// Result of addressing a mutation at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationEffect {
    /// The addressed list or card does not exist; nothing happened.
    Missing,
    /// The target exists but the mutation left it as it was.
    Unchanged,
    /// The board changed.
    Changed,
}

impl MutationEffect {
    const fn from_changed(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Unchanged }
    }

    /// Returns `true` for [`MutationEffect::Changed`].
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Canonical in-memory board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    summary: BoardSummary,
    list_ids: Vec<ListId>,
    lists: HashMap<ListId, List>,
}

impl Board {
    /// Creates a board without lists.
    #[must_use]
    pub fn new(summary: BoardSummary) -> Self {
        Self {
            summary,
            list_ids: Vec::new(),
            lists: HashMap::new(),
        }
    }

    /// Returns the board header.
    #[must_use]
    pub const fn summary(&self) -> &BoardSummary {
        &self.summary
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.summary.id
    }

    /// Returns list identifiers in board order.
    #[must_use]
    pub fn list_ids(&self) -> &[ListId] {
        &self.list_ids
    }

    /// Iterates lists in board order.
    pub fn lists(&self) -> impl Iterator<Item = &List> {
        self.list_ids.iter().filter_map(|id| self.lists.get(id))
    }

    /// Returns the number of lists.
    #[must_use]
    pub fn list_count(&self) -> usize {
        self.list_ids.len()
    }

    /// Looks up a list.
    #[must_use]
    pub fn list(&self, list_id: ListId) -> Option<&List> {
        self.lists.get(&list_id)
    }

    /// Returns the board position of a list.
    #[must_use]
    pub fn list_position(&self, list_id: ListId) -> Option<usize> {
        self.list_ids.iter().position(|id| *id == list_id)
    }

    /// Looks up a card in a specific list.
    #[must_use]
    pub fn card(&self, list_id: ListId, card_id: CardId) -> Option<&Card> {
        self.lists.get(&list_id).and_then(|list| list.card(card_id))
    }

    /// Finds the list and position currently holding a card.
    #[must_use]
    pub fn locate_card(&self, card_id: CardId) -> Option<(ListId, usize)> {
        self.lists().find_map(|list| {
            list.position_of(card_id)
                .map(|position| (list.id(), position))
        })
    }

    /// Replaces the background.
    pub fn set_background(&mut self, background: Background) {
        self.summary.background = background;
    }

    /// Applies a list mutation.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateCard`] when inserting a card that
    /// already lives anywhere on the board, or the list's own validation
    /// error.
    pub fn apply_list_mutation(
        &mut self,
        list_id: ListId,
        mutation: ListMutation,
    ) -> Result<MutationEffect, BoardDomainError> {
        if !self.lists.contains_key(&list_id) {
            return Ok(MutationEffect::Missing);
        }
        let inserted = match &mutation {
            ListMutation::InsertCard { card, .. } => Some(card.id()),
            _ => None,
        };
        if let Some(card_id) = inserted.filter(|id| self.locate_card(*id).is_some()) {
            return Err(BoardDomainError::DuplicateCard(card_id));
        }
        let Some(list) = self.lists.get_mut(&list_id) else {
            return Ok(MutationEffect::Missing);
        };
        list.apply(mutation).map(MutationEffect::from_changed)
    }

    /// Applies a card mutation to a card in a specific list.
    ///
    /// # Errors
    ///
    /// Propagates the card's validation error.
    pub fn apply_card_mutation(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        mutation: CardMutation,
    ) -> Result<MutationEffect, BoardDomainError> {
        let Some(card) = self
            .lists
            .get_mut(&list_id)
            .and_then(|list| list.card_mut(card_id))
        else {
            return Ok(MutationEffect::Missing);
        };
        card.apply(mutation).map(MutationEffect::from_changed)
    }

    /// Moves a list within the board order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError`] for out-of-range indices.
    pub fn reorder_lists(&mut self, from: usize, to: usize) -> Result<(), OrderingError> {
        self.list_ids = move_within(&self.list_ids, from, to)?;
        Ok(())
    }

    /// Moves the card at `from` in `source` to position `to` in
    /// `destination`. The card keeps its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::Ordering`] for out-of-range indices.
    pub fn transfer_card(
        &mut self,
        source: ListId,
        destination: ListId,
        from: usize,
        to: usize,
    ) -> Result<MutationEffect, BoardDomainError> {
        if source == destination {
            return self.apply_list_mutation(source, ListMutation::MoveCard { from, to });
        }
        let (Some(source_list), Some(destination_list)) =
            (self.lists.get(&source), self.lists.get(&destination))
        else {
            return Ok(MutationEffect::Missing);
        };
        let (source_cards, destination_cards) =
            transfer_between(source_list.cards(), destination_list.cards(), from, to)?;
        if let Some(list) = self.lists.get_mut(&source) {
            list.replace_cards(source_cards);
        }
        if let Some(list) = self.lists.get_mut(&destination) {
            list.replace_cards(destination_cards);
        }
        Ok(MutationEffect::Changed)
    }

    /// Inserts a list at `index` in the board order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateList`] for a list already on the
    /// board, [`BoardDomainError::DuplicateCard`] when one of its cards is,
    /// or [`BoardDomainError::Ordering`] when `index` exceeds the list count.
    pub fn insert_list(&mut self, index: usize, list: List) -> Result<(), BoardDomainError> {
        if self.lists.contains_key(&list.id()) {
            return Err(BoardDomainError::DuplicateList(list.id()));
        }
        if let Some(card) = list
            .cards()
            .iter()
            .find(|card| self.locate_card(card.id()).is_some())
        {
            return Err(BoardDomainError::DuplicateCard(card.id()));
        }
        if index > self.list_ids.len() {
            return Err(OrderingError::IndexOutOfRange {
                sequence: "destination",
                index,
                len: self.list_ids.len(),
            }
            .into());
        }
        self.list_ids.insert(index, list.id());
        self.lists.insert(list.id(), list);
        Ok(())
    }

    /// Appends a list at the end of the board order.
    ///
    /// # Errors
    ///
    /// See [`Board::insert_list`].
    pub fn push_list(&mut self, list: List) -> Result<(), BoardDomainError> {
        self.insert_list(self.list_ids.len(), list)
    }

    /// Removes a list with all of its cards.
    pub fn remove_list(&mut self, list_id: ListId) -> Option<List> {
        let removed = self.lists.remove(&list_id)?;
        self.list_ids.retain(|id| *id != list_id);
        Some(removed)
    }

    /// Verifies the structural invariants of the board.
    ///
    /// # Errors
    ///
    /// Returns the first [`IntegrityViolation`] found.
    pub fn check_integrity(&self) -> Result<(), IntegrityViolation> {
        let mut seen_lists = HashSet::new();
        for list_id in &self.list_ids {
            if !seen_lists.insert(*list_id) {
                return Err(IntegrityViolation::DuplicateListId(*list_id));
            }
            if !self.lists.contains_key(list_id) {
                return Err(IntegrityViolation::DanglingListId(*list_id));
            }
        }
        if let Some(orphan) = self.lists.keys().find(|id| !seen_lists.contains(*id)) {
            return Err(IntegrityViolation::OrphanList(*orphan));
        }
        let mut seen_cards = HashSet::new();
        for card in self.lists().flat_map(List::cards) {
            if !seen_cards.insert(card.id()) {
                return Err(IntegrityViolation::DuplicateCardId(card.id()));
            }
        }
        Ok(())
    }

    pub(crate) fn insert_list_unchecked(&mut self, list: List) {
        self.list_ids.push(list.id());
        self.lists.insert(list.id(), list);
    }
}
