//! Flat board snapshots exchanged with the remote store.

use super::{Board, BoardSummary, Card, CardId, List, ListId, Title};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// List row as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    /// List identifier.
    pub id: ListId,
    /// List title.
    pub title: Title,
}

/// Card row as returned by the remote store, tagged with its owning list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Card identifier.
    pub id: CardId,
    /// Owning list.
    pub list_id: ListId,
    /// Card title.
    pub title: Title,
    /// Optional description.
    pub description: Option<String>,
}

impl CardRecord {
    /// Builds the local card for this record.
    #[must_use]
    pub fn to_card(&self) -> Card {
        Card::with_id(self.id, self.title.clone()).with_description(self.description.clone())
    }
}

/// Canonical board contents: lists in board order, cards in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Board header.
    pub board: BoardSummary,
    /// Lists in board order.
    pub lists: Vec<ListRecord>,
    /// Cards in list order, tagged with their owning list.
    pub cards: Vec<CardRecord>,
}

impl Board {
    /// Builds a board from a snapshot.
    ///
    /// Duplicate lists and cards keep their first occurrence; cards tagged
    /// with an unknown list are dropped.
    #[must_use]
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        let mut board = Self::new(snapshot.board.clone());
        let mut seen_lists = HashSet::new();
        let mut seen_cards = HashSet::new();
        for record in &snapshot.lists {
            if !seen_lists.insert(record.id) {
                continue;
            }
            let cards = snapshot
                .cards
                .iter()
                .filter(|card| card.list_id == record.id)
                .filter(|card| seen_cards.insert(card.id))
                .map(CardRecord::to_card)
                .collect();
            board.insert_list_unchecked(List::new(record.id, record.title.clone()).with_cards(cards));
        }
        board
    }

    /// Flattens the board into a snapshot, dropping local-only card fields.
    #[must_use]
    pub fn to_snapshot(&self) -> BoardSnapshot {
        let lists = self
            .lists()
            .map(|list| ListRecord {
                id: list.id(),
                title: list.title().clone(),
            })
            .collect();
        let cards = self
            .lists()
            .flat_map(|list| {
                list.cards().iter().map(move |card| CardRecord {
                    id: card.id(),
                    list_id: list.id(),
                    title: card.title().clone(),
                    description: card.description().map(str::to_owned),
                })
            })
            .collect();
        BoardSnapshot {
            board: self.summary().clone(),
            lists,
            cards,
        }
    }
}
