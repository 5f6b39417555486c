//! Uncommitted card field edits, held until the field loses focus.

use crate::board::domain::CardId;
use std::collections::HashMap;

/// Card field edited through a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    /// Card title.
    Title,
    /// Card description.
    Description,
}

/// Latest keystroke value per card field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    drafts: HashMap<(CardId, CardField), String>,
}

impl EditBuffer {
    /// Records the current input value, replacing any earlier draft.
    pub fn edit(&mut self, card_id: CardId, field: CardField, value: impl Into<String>) {
        self.drafts.insert((card_id, field), value.into());
    }

    /// Returns the pending draft for a field.
    #[must_use]
    pub fn draft(&self, card_id: CardId, field: CardField) -> Option<&str> {
        self.drafts.get(&(card_id, field)).map(String::as_str)
    }

    /// Removes and returns the pending draft for a field.
    pub fn take(&mut self, card_id: CardId, field: CardField) -> Option<String> {
        self.drafts.remove(&(card_id, field))
    }

    /// Drops every draft of a card.
    pub fn discard_card(&mut self, card_id: CardId) {
        self.drafts.retain(|(id, _), _| *id != card_id);
    }

    /// Keeps only drafts whose card satisfies `keep`.
    pub fn retain_cards(&mut self, mut keep: impl FnMut(CardId) -> bool) {
        self.drafts.retain(|(id, _), _| keep(*id));
    }

    /// Drops every draft.
    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    /// Returns `true` when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
