//! Ordered card lists and the mutations they accept.

use super::{BoardDomainError, Card, CardId, ListId, ParseSortModeError, Title};
use crate::ordering::{OrderingError, move_within};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permanent reordering applied by [`ListMutation::Sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Case-folded title order; ties keep their relative order.
    Name,
    /// Due date ascending; undated cards last.
    DueDate,
}

impl SortMode {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DueDate => "due_date",
        }
    }
}

impl TryFrom<&str> for SortMode {
    type Error = ParseSortModeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" | "title" => Ok(Self::Name),
            "date" | "due_date" | "due-date" => Ok(Self::DueDate),
            _ => Err(ParseSortModeError(value.to_owned())),
        }
    }
}

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One change to a single list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMutation {
    /// Replaces the title.
    Rename(Title),
    /// Moves a card between two positions of this list.
    MoveCard {
        /// Current index of the card.
        from: usize,
        /// Target index of the card.
        to: usize,
    },
    /// Inserts a card at `index` (`index == len` appends).
    InsertCard {
        /// Card to insert.
        card: Box<Card>,
        /// Insertion position.
        index: usize,
    },
    /// Removes a card.
    RemoveCard(CardId),
    /// Sorts cards permanently.
    Sort(SortMode),
    /// Removes every card.
    Clear,
}

/// Ordered container of cards within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    id: ListId,
    title: Title,
    cards: Vec<Card>,
}

impl List {
    /// Creates an empty list.
    #[must_use]
    pub const fn new(id: ListId, title: Title) -> Self {
        Self {
            id,
            title,
            cards: Vec::new(),
        }
    }

    /// Replaces the cards, keeping their order.
    #[must_use]
    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the list title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the cards in display order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` when the list holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the position of a card.
    #[must_use]
    pub fn position_of(&self, card_id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id() == card_id)
    }

    /// Looks up a card.
    #[must_use]
    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == card_id)
    }

    pub(crate) fn card_mut(&mut self, card_id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id() == card_id)
    }

    pub(crate) fn replace_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    /// Applies a mutation in place.
    ///
    /// Returns `true` when the list changed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::Ordering`] for out-of-range indices and
    /// [`BoardDomainError::DuplicateCard`] when inserting a card already in
    /// this list.
    pub fn apply(&mut self, mutation: ListMutation) -> Result<bool, BoardDomainError> {
        match mutation {
            ListMutation::Rename(title) => {
                if self.title == title {
                    return Ok(false);
                }
                self.title = title;
                Ok(true)
            }
            ListMutation::MoveCard { from, to } => {
                self.cards = move_within(&self.cards, from, to)?;
                Ok(from != to)
            }
            ListMutation::InsertCard { card, index } => {
                if self.position_of(card.id()).is_some() {
                    return Err(BoardDomainError::DuplicateCard(card.id()));
                }
                if index > self.cards.len() {
                    return Err(OrderingError::IndexOutOfRange {
                        sequence: "destination",
                        index,
                        len: self.cards.len(),
                    }
                    .into());
                }
                self.cards.insert(index, *card);
                Ok(true)
            }
            ListMutation::RemoveCard(card_id) => Ok(self
                .position_of(card_id)
                .map(|position| self.cards.remove(position))
                .is_some()),
            ListMutation::Sort(mode) => {
                let before: Vec<CardId> = self.cards.iter().map(Card::id).collect();
                match mode {
                    SortMode::Name => self
                        .cards
                        .sort_by_cached_key(|card| card.title().as_str().to_lowercase()),
                    SortMode::DueDate => self
                        .cards
                        .sort_by_key(|card| (card.due_date().is_none(), card.due_date())),
                }
                Ok(!self.cards.iter().map(Card::id).eq(before))
            }
            ListMutation::Clear => {
                let changed = !self.cards.is_empty();
                self.cards.clear();
                Ok(changed)
            }
        }
    }
}
