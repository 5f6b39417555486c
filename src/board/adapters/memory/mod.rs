//! In-memory adapters for tests and embedding without infrastructure.

mod feedback;
mod preferences;
mod remote;

pub use feedback::RecordingFeedback;
pub use preferences::InMemoryPreferenceStore;
pub use remote::{InMemoryRemoteStore, RemoteCall, RemoteOperation};
