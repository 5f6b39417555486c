//! Read-only projections of a board for rendering.
//!
//! Nothing here mutates the board: search filtering and badge derivation are
//! recomputed from the canonical state on every call.

use super::{
    ActivityKind, Board, BoardSummary, Card, CardId, ChecklistProgress, Cover, LabelCatalog,
    LabelId, List, ListId, Member, MemberId, Title,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Cards of `list` whose title contains `search`, ignoring case.
///
/// An empty or blank search returns every card in stored order.
#[must_use]
pub fn filter_cards<'a>(list: &'a List, search: &str) -> Vec<&'a Card> {
    let needle = search.trim().to_lowercase();
    list.cards()
        .iter()
        .filter(|card| needle.is_empty() || card.title().as_str().to_lowercase().contains(&needle))
        .collect()
}

/// Decides whether a list title denotes a "done" column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionHeuristic {
    keywords: Vec<String>,
}

impl CompletionHeuristic {
    /// Creates a heuristic from keywords; blank keywords are ignored.
    #[must_use]
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    /// Returns `true` when `title` contains any keyword, ignoring case.
    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        let folded = title.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| folded.contains(keyword.as_str()))
    }
}

/// Resolved label shown on a card face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelBadge {
    /// Label identifier.
    pub id: LabelId,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: String,
}

/// Resolved member avatar shown on a card face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberBadge {
    /// Member identifier.
    pub id: MemberId,
    /// Avatar initials.
    pub initials: String,
    /// Avatar color.
    pub color: String,
}

/// Card face data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    /// Card identifier.
    pub id: CardId,
    /// Card title.
    pub title: Title,
    /// Labels known to the catalog, in attachment order.
    pub labels: Vec<LabelBadge>,
    /// Members known to the roster, in assignment order.
    pub members: Vec<MemberBadge>,
    /// Checklist progress, when the card has a checklist.
    pub checklist: Option<ChecklistProgress>,
    /// Whether a description is present.
    pub has_description: bool,
    /// Number of user comments.
    pub comment_count: usize,
    /// Due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Whether the due date lies before `today`.
    pub overdue: bool,
    /// Cover, if any.
    pub cover: Option<Cover>,
}

/// Visible portion of one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    /// List identifier.
    pub id: ListId,
    /// List title.
    pub title: Title,
    /// Cards matching the search, in stored order.
    pub cards: Vec<CardSummary>,
    /// Card count before filtering.
    pub total_cards: usize,
}

/// Visible portion of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Board header.
    pub board: BoardSummary,
    /// Lists in board order.
    pub lists: Vec<ListView>,
}

/// Projects `board` for rendering with `search` applied to every list.
#[must_use]
pub fn board_view(
    board: &Board,
    search: &str,
    catalog: &LabelCatalog,
    roster: &[Member],
    today: NaiveDate,
) -> BoardView {
    let lists = board
        .lists()
        .map(|list| ListView {
            id: list.id(),
            title: list.title().clone(),
            cards: filter_cards(list, search)
                .into_iter()
                .map(|card| summarize_card(card, catalog, roster, today))
                .collect(),
            total_cards: list.len(),
        })
        .collect();
    BoardView {
        board: board.summary().clone(),
        lists,
    }
}

/// Derives the face data of a single card.
#[must_use]
pub fn summarize_card(
    card: &Card,
    catalog: &LabelCatalog,
    roster: &[Member],
    today: NaiveDate,
) -> CardSummary {
    let labels = card
        .labels()
        .iter()
        .filter_map(|id| catalog.get(id))
        .map(|label| LabelBadge {
            id: label.id.clone(),
            name: label.name.clone(),
            color: label.color.clone(),
        })
        .collect();
    let members = card
        .members()
        .iter()
        .filter_map(|id| roster.iter().find(|member| member.id() == *id))
        .map(|member| MemberBadge {
            id: member.id(),
            initials: member.initials().to_owned(),
            color: member.color().to_owned(),
        })
        .collect();
    let checklist = (!card.checklist().is_empty()).then(|| card.checklist().progress());
    let comment_count = card
        .activity()
        .entries()
        .iter()
        .filter(|entry| entry.kind() == ActivityKind::Comment)
        .count();
    CardSummary {
        id: card.id(),
        title: card.title().clone(),
        labels,
        members,
        checklist,
        has_description: card.description().is_some(),
        comment_count,
        due_date: card.due_date(),
        overdue: card.due_date().is_some_and(|due| due < today),
        cover: card.cover().cloned(),
    }
}
