//! Error types for board domain validation and parsing.

use super::{ActivityId, CardId, ChecklistItemId, LabelId, ListId};
use crate::ordering::OrderingError;
use thiserror::Error;

/// Errors returned while constructing or mutating board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A board, list or card title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// A comment body is empty after trimming.
    #[error("comment must not be empty")]
    EmptyComment,

    /// A checklist item text is empty after trimming.
    #[error("checklist item text must not be empty")]
    EmptyChecklistText,

    /// A member display name is empty after trimming.
    #[error("member name must not be empty")]
    EmptyMemberName,

    /// A label identifier is empty or contains whitespace.
    #[error("invalid label identifier '{0}'")]
    InvalidLabelId(String),

    /// The label is not part of the configured catalog.
    #[error("unknown label '{0}'")]
    UnknownLabel(LabelId),

    /// A cover color is not a `#rgb` or `#rrggbb` hex value.
    #[error("invalid cover color '{0}', expected #rgb or #rrggbb")]
    InvalidCoverColor(String),

    /// A cover image is not an http(s) URL.
    #[error("invalid cover image '{0}', expected an http(s) URL")]
    InvalidCoverImage(String),

    /// The activity entry does not exist on the card.
    #[error("activity entry {0} not found")]
    ActivityNotFound(ActivityId),

    /// System-generated activity entries cannot be deleted.
    #[error("activity entry {0} is system-generated and cannot be deleted")]
    ActivityNotDeletable(ActivityId),

    /// The checklist item does not exist on the card.
    #[error("checklist item {0} not found")]
    ChecklistItemNotFound(ChecklistItemId),

    /// A card with the same identifier is already on the board.
    #[error("card {0} is already on the board")]
    DuplicateCard(CardId),

    /// A list with the same identifier is already on the board.
    #[error("list {0} is already on the board")]
    DuplicateList(ListId),

    /// A reorder index was outside the addressed sequence.
    #[error(transparent)]
    Ordering(#[from] OrderingError),
}

/// Error returned while parsing a sort mode from user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort mode: {0}")]
pub struct ParseSortModeError(pub String);

/// Structural invariant violations reported by `Board::check_integrity`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// A list identifier appears more than once in the board order.
    #[error("list {0} appears more than once in the board order")]
    DuplicateListId(ListId),

    /// The board order references a list that does not exist.
    #[error("board order references missing list {0}")]
    DanglingListId(ListId),

    /// A stored list is not referenced by the board order.
    #[error("list {0} is not part of the board order")]
    OrphanList(ListId),

    /// A card identifier appears more than once across the board.
    #[error("card {0} appears more than once on the board")]
    DuplicateCardId(CardId),
}
