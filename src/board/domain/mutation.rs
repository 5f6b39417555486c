//! Tagged card mutations and the system activity they imply.

use super::{
    ActivityEntry, ActivityId, Card, Checklist, Cover, LabelCatalog, LabelId, MemberId, Title,
};
use chrono::NaiveDate;

/// One validated change to a single card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardMutation {
    /// Replaces the title.
    Rename(Title),
    /// Replaces the description; `None` or blank text clears it.
    Describe(Option<String>),
    /// Sets or clears the due date.
    SetDueDate(Option<NaiveDate>),
    /// Sets or clears the cover.
    SetCover(Option<Cover>),
    /// Replaces the attached labels.
    SetLabels(Vec<LabelId>),
    /// Replaces the assigned members.
    SetMembers(Vec<MemberId>),
    /// Prepends an activity entry.
    AppendActivity(ActivityEntry),
    /// Deletes a comment from the activity log.
    RemoveComment(ActivityId),
    /// Replaces the checklist.
    SetChecklist(Checklist),
}

/// Text of the system activity entry implied by applying `mutation` to
/// `card`, or `None` when the change is not logged.
///
/// Logged changes: labels added, due date set, changed or removed, and
/// cover added or changed.
#[must_use]
pub fn system_activity_text(
    card: &Card,
    mutation: &CardMutation,
    catalog: &LabelCatalog,
) -> Option<String> {
    match mutation {
        CardMutation::SetLabels(labels) => {
            let added: Vec<&str> = labels
                .iter()
                .filter(|label| !card.labels().contains(label))
                .map(|label| catalog.get(label).map_or(label.as_str(), |entry| entry.name.as_str()))
                .collect();
            match added.as_slice() {
                [] => None,
                [single] => Some(format!("added the {single} label to this card")),
                many => Some(format!("added the {} labels to this card", many.join(", "))),
            }
        }
        CardMutation::SetDueDate(due_date) => match (card.due_date(), *due_date) {
            (previous, Some(next)) if previous != Some(next) => Some(format!(
                "set the due date of this card to {}",
                next.format("%b %-d, %Y")
            )),
            (Some(_), None) => Some("removed the due date from this card".to_owned()),
            _ => None,
        },
        CardMutation::SetCover(Some(cover)) => match card.cover() {
            None => Some("added a cover to this card".to_owned()),
            Some(previous) if previous != cover => {
                Some("changed the cover of this card".to_owned())
            }
            Some(_) => None,
        },
        CardMutation::Rename(_)
        | CardMutation::Describe(_)
        | CardMutation::SetCover(None)
        | CardMutation::SetMembers(_)
        | CardMutation::AppendActivity(_)
        | CardMutation::RemoveComment(_)
        | CardMutation::SetChecklist(_) => None,
    }
}

/// Text of the system entry recorded when a card changes lists.
#[must_use]
pub fn move_activity_text(source: &Title, destination: &Title) -> String {
    format!("moved this card from {source} to {destination}")
}
