//! Card checklist and its derived progress.

use super::{BoardDomainError, ChecklistItemId};
use serde::{Deserialize, Serialize};

/// Single checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    id: ChecklistItemId,
    text: String,
    completed: bool,
}

impl ChecklistItem {
    /// Creates an incomplete checklist item.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyChecklistText`] for blank text.
    pub fn new(text: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = text.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyChecklistText);
        }
        Ok(Self {
            id: ChecklistItemId::new(),
            text: trimmed.to_owned(),
            completed: false,
        })
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> ChecklistItemId {
        self.id
    }

    /// Returns the item text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the item is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Completed/total counts for a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistProgress {
    /// Number of completed items.
    pub completed: usize,
    /// Total number of items.
    pub total: usize,
}

impl ChecklistProgress {
    /// Returns progress as a percentage rounded half up; `0` when empty.
    #[must_use]
    pub fn percent(self) -> usize {
        let doubled_total = self.total.saturating_mul(2);
        self.completed
            .saturating_mul(200)
            .saturating_add(self.total)
            .checked_div(doubled_total)
            .unwrap_or(0)
    }

    /// Returns `true` when the checklist is non-empty and fully completed.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Ordered checklist attached to a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Creates an empty checklist.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the items in display order.
    #[must_use]
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    /// Returns `true` when the checklist has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a new item and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyChecklistText`] for blank text.
    pub fn push(&mut self, text: impl Into<String>) -> Result<ChecklistItemId, BoardDomainError> {
        let item = ChecklistItem::new(text)?;
        let id = item.id();
        self.items.push(item);
        Ok(id)
    }

    /// Flips the completion flag of an item.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ChecklistItemNotFound`] for unknown items.
    pub fn toggle(&mut self, id: ChecklistItemId) -> Result<(), BoardDomainError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(BoardDomainError::ChecklistItemNotFound(id))?;
        item.completed = !item.completed;
        Ok(())
    }

    /// Removes an item.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ChecklistItemNotFound`] for unknown items.
    pub fn remove(&mut self, id: ChecklistItemId) -> Result<ChecklistItem, BoardDomainError> {
        let position = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(BoardDomainError::ChecklistItemNotFound(id))?;
        Ok(self.items.remove(position))
    }

    /// Computes current progress.
    #[must_use]
    pub fn progress(&self) -> ChecklistProgress {
        ChecklistProgress {
            completed: self.items.iter().filter(|item| item.completed).count(),
            total: self.items.len(),
        }
    }

    /// Returns `true` when every item of a non-empty checklist is completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress().is_complete()
    }
}
