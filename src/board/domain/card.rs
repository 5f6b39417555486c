//! Card aggregate.

use super::{
    ActivityLog, BoardDomainError, CardId, CardMutation, Checklist, Cover, LabelId, MemberId,
    Title,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Single task on a board, owned by exactly one list at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    title: Title,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    checklist: Checklist,
    members: Vec<MemberId>,
    labels: Vec<LabelId>,
    cover: Option<Cover>,
    activity: ActivityLog,
}

impl Card {
    /// Creates a card with a fresh identifier.
    #[must_use]
    pub fn new(title: Title) -> Self {
        Self::with_id(CardId::new(), title)
    }

    /// Creates a card with a known identifier, typically one issued by the
    /// remote store.
    #[must_use]
    pub fn with_id(id: CardId, title: Title) -> Self {
        Self {
            id,
            title,
            description: None,
            due_date: None,
            checklist: Checklist::new(),
            members: Vec::new(),
            labels: Vec::new(),
            cover: None,
            activity: ActivityLog::default(),
        }
    }

    /// Sets the description; blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = normalize_description(description);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Returns the card identifier.
    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    /// Returns the card title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the checklist.
    #[must_use]
    pub const fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Returns assigned member identifiers in assignment order.
    #[must_use]
    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    /// Returns attached label identifiers in attachment order.
    #[must_use]
    pub fn labels(&self) -> &[LabelId] {
        &self.labels
    }

    /// Returns the cover, if any.
    #[must_use]
    pub const fn cover(&self) -> Option<&Cover> {
        self.cover.as_ref()
    }

    /// Returns the activity log, newest first.
    #[must_use]
    pub const fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Applies a mutation in place.
    ///
    /// Returns `true` when the card changed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when removing an unknown or
    /// system-generated activity entry.
    pub fn apply(&mut self, mutation: CardMutation) -> Result<bool, BoardDomainError> {
        let changed = match mutation {
            CardMutation::Rename(title) => replace_if_different(&mut self.title, title),
            CardMutation::Describe(description) => replace_if_different(
                &mut self.description,
                normalize_description(description),
            ),
            CardMutation::SetDueDate(due_date) => {
                replace_if_different(&mut self.due_date, due_date)
            }
            CardMutation::SetCover(cover) => replace_if_different(&mut self.cover, cover),
            CardMutation::SetLabels(labels) => {
                replace_if_different(&mut self.labels, dedup_preserving_order(labels))
            }
            CardMutation::SetMembers(members) => {
                replace_if_different(&mut self.members, dedup_preserving_order(members))
            }
            CardMutation::SetChecklist(checklist) => {
                replace_if_different(&mut self.checklist, checklist)
            }
            CardMutation::AppendActivity(entry) => {
                self.activity.prepend(entry);
                true
            }
            CardMutation::RemoveComment(id) => {
                self.activity.remove_comment(id)?;
                true
            }
        };
        Ok(changed)
    }
}

fn replace_if_different<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}

fn dedup_preserving_order<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
