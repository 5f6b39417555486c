//! Application services orchestrating board state, drag handling and remote
//! reconciliation.
//!
//! [`BoardSession`] is the entry point used by a rendering layer; the other
//! services are its building blocks and can be used on their own.

pub mod drafts;
pub mod preferences;
pub mod reconcile;
pub mod reorder;
pub mod session;
pub mod store;

pub use drafts::{CardField, EditBuffer};
pub use preferences::BoardPreferences;
pub use reconcile::{CardDraft, Reconciler, SyncCommand, SyncCompletion};
pub use reorder::{
    CardTransfer, DragOutcome, MoveKind, PlannedMove, ReorderContext, StaleDrag, apply_drag,
};
pub use session::{BoardSession, CompletionEffect, OperationOutcome, Rejection, SessionError};
pub use store::{BoardStore, ReplaceKind};
