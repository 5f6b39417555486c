//! Domain model for the board ordering engine.
//!
//! Boards own an ordered sequence of lists; lists own an ordered sequence of
//! cards. Every type here is plain data plus pure transformations, so the
//! services can compute a new board before installing it.

mod activity;
mod board;
mod card;
mod checklist;
mod cover;
mod drag;
mod error;
mod ids;
mod list;
mod member;
mod mutation;
mod snapshot;
pub mod view;

pub use activity::{ActivityEntry, ActivityKind, ActivityLog};
pub use board::{Board, BoardSummary, MutationEffect};
pub use card::Card;
pub use checklist::{Checklist, ChecklistItem, ChecklistProgress};
pub use cover::{Background, Cover, CoverColor, CoverImage};
pub use drag::{Container, DragResult, DraggedItem, DropLocation};
pub use error::{BoardDomainError, IntegrityViolation, ParseSortModeError};
pub use ids::{
    ActivityId, BoardId, CardId, ChecklistItemId, LabelId, ListId, MemberId, TeamId, Title,
};
pub use list::{List, ListMutation, SortMode};
pub use member::{Label, LabelCatalog, Member};
pub use mutation::{CardMutation, move_activity_text, system_activity_text};
pub use snapshot::{BoardSnapshot, CardRecord, ListRecord};
pub use view::{
    BoardView, CardSummary, CompletionHeuristic, ListView, board_view, filter_cards,
};
