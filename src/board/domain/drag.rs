//! Drag-and-drop results as produced by the rendering layer.

use super::{CardId, ListId};
use serde::{Deserialize, Serialize};

/// Item being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DraggedItem {
    /// A whole list, dragged across the board.
    List(ListId),
    /// A card, dragged within or between lists.
    Card(CardId),
}

/// Droppable container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Container {
    /// The board itself; holds lists.
    Board,
    /// A list; holds cards.
    List(ListId),
}

/// Position inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropLocation {
    /// Container addressed.
    pub container: Container,
    /// Index within the container.
    pub index: usize,
}

impl DropLocation {
    /// Location on the board list strip.
    #[must_use]
    pub const fn board(index: usize) -> Self {
        Self {
            container: Container::Board,
            index,
        }
    }

    /// Location inside a list.
    #[must_use]
    pub const fn list(list_id: ListId, index: usize) -> Self {
        Self {
            container: Container::List(list_id),
            index,
        }
    }
}

/// Completed drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    /// Dragged item.
    pub item: DraggedItem,
    /// Where the item was picked up.
    pub source: DropLocation,
    /// Where the item was dropped; `None` when the drop was cancelled.
    pub destination: Option<DropLocation>,
}

impl DragResult {
    /// Returns `true` when the item was dropped where it was picked up.
    #[must_use]
    pub fn is_noop_drop(&self) -> bool {
        self.destination == Some(self.source)
    }
}
