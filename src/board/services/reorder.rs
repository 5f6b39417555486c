//! Drag-and-drop state machine.
//!
//! [`apply_drag`] is pure: it computes the board that results from a drop
//! without touching the caller's board, so the session can install it in one
//! step. Drops that no longer match the board are reported as
//! [`DragOutcome::Stale`] instead of failing.

use crate::board::domain::{
    ActivityEntry, Board, Card, CardId, CardMutation, CompletionHeuristic, Container, DragResult,
    DraggedItem, DropLocation, ListId, ListMutation, MutationEffect, move_activity_text,
};
use mockable::Clock;
use thiserror::Error;

/// Kind of successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// A list changed position on the board.
    ListReorder,
    /// A card changed position inside its list.
    CardReorder,
    /// A card changed lists.
    CardTransfer,
}

/// Why a drop was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StaleDrag {
    /// A container list no longer exists.
    #[error("list {0} is not on the board")]
    UnknownList(ListId),
    /// The dragged item is not at the reported source position.
    #[error("dragged item is not at source index {0}")]
    SourceMismatch(usize),
    /// The destination index is outside the destination container.
    #[error("destination index {0} is out of range")]
    DestinationOutOfRange(usize),
    /// A list was dropped into a list.
    #[error("lists can only be dropped on the board")]
    ListIntoList,
    /// A card was dropped outside any list.
    #[error("cards can only be dropped into lists")]
    CardOutsideList,
}

/// Card that changed lists during a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardTransfer {
    /// Moved card.
    pub card_id: CardId,
    /// List the card left.
    pub source: ListId,
    /// List the card joined.
    pub destination: ListId,
}

/// Board computed for an accepted drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    /// Board after the drop.
    pub board: Board,
    /// Kind of move.
    pub kind: MoveKind,
    /// Dragged card and its destination list, for cross-list card drops.
    ///
    /// The remote store keeps no order within a list, so reorders stay local.
    pub card: Option<(CardId, ListId)>,
    /// Set for cross-list card moves.
    pub transfer: Option<CardTransfer>,
    /// Whether the destination list counts as "done".
    pub celebrate: bool,
}

/// Result of evaluating a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// The drop was cancelled.
    Cancelled,
    /// The item was dropped where it was picked up.
    Unchanged,
    /// The drop no longer matches the board.
    Stale(StaleDrag),
    /// The drop was accepted.
    Moved(Box<PlannedMove>),
}

/// Collaborators needed to record the move of a card between lists.
#[derive(Debug)]
pub struct ReorderContext<'a, C>
where
    C: Clock,
{
    /// "Done" list heuristic.
    pub heuristic: &'a CompletionHeuristic,
    /// Author of the system activity entry.
    pub author: &'a str,
    /// Timestamp source for the system activity entry.
    pub clock: &'a C,
}

/// Evaluates a drop against `board`.
#[must_use]
pub fn apply_drag<C>(
    board: &Board,
    drag: &DragResult,
    context: &ReorderContext<'_, C>,
) -> DragOutcome
where
    C: Clock,
{
    let Some(destination) = drag.destination else {
        return DragOutcome::Cancelled;
    };
    if drag.is_noop_drop() {
        return DragOutcome::Unchanged;
    }
    let result = match drag.item {
        DraggedItem::List(list_id) => {
            plan_list_move(board, list_id, drag.source.container, drag.source.index, destination)
        }
        DraggedItem::Card(card_id) => plan_card_move(board, card_id, drag, destination, context),
    };
    match result {
        Ok(planned) => DragOutcome::Moved(Box::new(planned)),
        Err(stale) => DragOutcome::Stale(stale),
    }
}

fn plan_list_move(
    board: &Board,
    list_id: ListId,
    source_container: Container,
    from: usize,
    destination: DropLocation,
) -> Result<PlannedMove, StaleDrag> {
    if source_container != Container::Board || destination.container != Container::Board {
        return Err(StaleDrag::ListIntoList);
    }
    if board.list_ids().get(from) != Some(&list_id) {
        return Err(StaleDrag::SourceMismatch(from));
    }
    let mut next = board.clone();
    next.reorder_lists(from, destination.index)
        .map_err(|_| StaleDrag::DestinationOutOfRange(destination.index))?;
    Ok(PlannedMove {
        board: next,
        kind: MoveKind::ListReorder,
        card: None,
        transfer: None,
        celebrate: false,
    })
}

fn plan_card_move<C>(
    board: &Board,
    card_id: CardId,
    drag: &DragResult,
    destination: DropLocation,
    context: &ReorderContext<'_, C>,
) -> Result<PlannedMove, StaleDrag>
where
    C: Clock,
{
    let (Container::List(source_id), Container::List(destination_id)) =
        (drag.source.container, destination.container)
    else {
        return Err(StaleDrag::CardOutsideList);
    };
    let from = drag.source.index;
    let to = destination.index;
    let source = board
        .list(source_id)
        .ok_or(StaleDrag::UnknownList(source_id))?;
    let target = board
        .list(destination_id)
        .ok_or(StaleDrag::UnknownList(destination_id))?;
    if source.cards().get(from).map(Card::id) != Some(card_id) {
        return Err(StaleDrag::SourceMismatch(from));
    }

    let mut next = board.clone();
    if source_id == destination_id {
        next.apply_list_mutation(source_id, ListMutation::MoveCard { from, to })
            .map_err(|_| StaleDrag::DestinationOutOfRange(to))?;
        return Ok(PlannedMove {
            board: next,
            kind: MoveKind::CardReorder,
            card: None,
            transfer: None,
            celebrate: false,
        });
    }

    next.transfer_card(source_id, destination_id, from, to)
        .map_err(|_| StaleDrag::DestinationOutOfRange(to))?;
    let entry = ActivityEntry::system(
        move_activity_text(source.title(), target.title()),
        context.author,
        context.clock,
    );
    let logged = next
        .apply_card_mutation(destination_id, card_id, CardMutation::AppendActivity(entry))
        .map_err(|_| StaleDrag::DestinationOutOfRange(to))?;
    if logged == MutationEffect::Missing {
        return Err(StaleDrag::DestinationOutOfRange(to));
    }
    Ok(PlannedMove {
        board: next,
        kind: MoveKind::CardTransfer,
        card: Some((card_id, destination_id)),
        transfer: Some(CardTransfer {
            card_id,
            source: source_id,
            destination: destination_id,
        }),
        celebrate: context.heuristic.matches(target.title().as_str()),
    })
}
