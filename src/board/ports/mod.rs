//! Port contracts for the board engine.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod feedback;
pub mod preferences;
pub mod remote;

pub use feedback::{Celebration, ConfirmationPrompt, Notice, Severity, UserFeedback};
pub use preferences::{PreferenceError, PreferenceResult, PreferenceStore};
pub use remote::{CardPatch, RemoteBoardStore, RemoteStoreError, RemoteStoreResult};
