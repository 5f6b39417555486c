//! Card activity log: system entries and user comments.

use super::{ActivityId, BoardDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Origin of an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Generated automatically by a structural change to the card.
    System,
    /// Written explicitly by a user.
    Comment,
}

/// One line of a card's activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    id: ActivityId,
    text: String,
    author: String,
    timestamp: DateTime<Utc>,
    kind: ActivityKind,
}

impl ActivityEntry {
    /// Creates a system entry.
    #[must_use]
    pub fn system(text: impl Into<String>, author: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: ActivityId::new(),
            text: text.into(),
            author: author.into(),
            timestamp: clock.utc(),
            kind: ActivityKind::System,
        }
    }

    /// Creates a user comment.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyComment`] for blank text.
    pub fn comment(
        text: impl Into<String>,
        author: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let raw = text.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyComment);
        }
        Ok(Self {
            id: ActivityId::new(),
            text: trimmed.to_owned(),
            author: author.into(),
            timestamp: clock.utc(),
            kind: ActivityKind::Comment,
        })
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Returns the entry text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the author display name.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns when the entry was recorded.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the entry kind.
    #[must_use]
    pub const fn kind(&self) -> ActivityKind {
        self.kind
    }

    /// Returns `true` when a user may delete the entry.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        matches!(self.kind, ActivityKind::Comment)
    }
}

/// Activity entries, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    /// Returns entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the newest entry.
    #[must_use]
    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.first()
    }

    /// Records a new entry at the head of the log.
    pub fn prepend(&mut self, entry: ActivityEntry) {
        self.entries.insert(0, entry);
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ActivityNotFound`] for unknown entries and
    /// [`BoardDomainError::ActivityNotDeletable`] for system entries.
    pub fn remove_comment(&mut self, id: ActivityId) -> Result<ActivityEntry, BoardDomainError> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(BoardDomainError::ActivityNotFound(id))?;
        let deletable = self
            .entries
            .get(position)
            .is_some_and(ActivityEntry::is_deletable);
        if !deletable {
            return Err(BoardDomainError::ActivityNotDeletable(id));
        }
        Ok(self.entries.remove(position))
    }
}
