//! Board members and the label catalog they share with cards.

use super::{BoardDomainError, LabelId, MemberId};
use serde::{Deserialize, Serialize};

/// Person who can be assigned to cards. Owned by the board roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    name: String,
    initials: String,
    color: String,
}

impl Member {
    /// Creates a member, deriving initials from the display name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyMemberName`] for blank names.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyMemberName);
        }
        Ok(Self {
            id: MemberId::new(),
            initials: initials_of(trimmed),
            name: trimmed.to_owned(),
            color: color.into(),
        })
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the avatar initials.
    #[must_use]
    pub fn initials(&self) -> &str {
        &self.initials
    }

    /// Returns the avatar color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Upper-cased first letters of the first two words.
fn initials_of(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Catalog entry referenced by cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Catalog identifier.
    pub id: LabelId,
    /// Display color.
    pub color: String,
    /// Display name.
    pub name: String,
}

/// Fixed set of labels available on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelCatalog {
    labels: Vec<Label>,
}

impl LabelCatalog {
    /// Creates a catalog from explicit entries.
    #[must_use]
    pub const fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// Returns every label in display order.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Looks up a label by identifier.
    #[must_use]
    pub fn get(&self, id: &LabelId) -> Option<&Label> {
        self.labels.iter().find(|label| &label.id == id)
    }

    /// Returns `true` when the catalog contains the label.
    #[must_use]
    pub fn contains(&self, id: &LabelId) -> bool {
        self.get(id).is_some()
    }
}

impl Default for LabelCatalog {
    fn default() -> Self {
        let entries = [
            ("complete", "#61bd4f", "Complete"),
            ("attention", "#f2d600", "Attention"),
            ("urgent", "#eb5a46", "Urgent"),
            ("design", "#c377e0", "Design"),
            ("software", "#0079bf", "Software"),
        ];
        let labels = entries
            .into_iter()
            .filter_map(|(id, color, name)| {
                LabelId::new(id).ok().map(|label_id| Label {
                    id: label_id,
                    color: color.to_owned(),
                    name: name.to_owned(),
                })
            })
            .collect();
        Self { labels }
    }
}
