//! Shared world state for board drag BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use corkboard::board::{
    adapters::memory::{InMemoryPreferenceStore, InMemoryRemoteStore, RecordingFeedback},
    config::BoardConfig,
    domain::{Board, CardId, ListId},
    services::{BoardSession, OperationOutcome},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Session type used by the BDD world.
pub type TestSession =
    BoardSession<InMemoryRemoteStore, InMemoryPreferenceStore, RecordingFeedback, DefaultClock>;

/// Scenario world for board drag behaviour tests.
pub struct BoardWorld {
    pub remote: Arc<InMemoryRemoteStore>,
    pub feedback: Arc<RecordingFeedback>,
    pub session: TestSession,
    pub lists: HashMap<String, ListId>,
    pub cards: HashMap<String, CardId>,
    pub outcomes: Vec<OperationOutcome>,
}

impl BoardWorld {
    /// Creates a world with an empty remote store and no loaded board.
    #[must_use]
    pub fn new() -> Self {
        let remote = Arc::new(InMemoryRemoteStore::new());
        let feedback = Arc::new(RecordingFeedback::new());
        let session = BoardSession::new(
            Arc::clone(&remote),
            Arc::new(InMemoryPreferenceStore::new()),
            Arc::clone(&feedback),
            Arc::new(DefaultClock),
            BoardConfig::default(),
        );
        Self {
            remote,
            feedback,
            session,
            lists: HashMap::new(),
            cards: HashMap::new(),
            outcomes: Vec::new(),
        }
    }

    /// Resolves a list title used in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when the scenario never created the list.
    pub fn list_id(&self, name: &str) -> Result<ListId, eyre::Report> {
        self.lists
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown list {name} in scenario world"))
    }

    /// Resolves a card title used in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when the scenario never created the card.
    pub fn card_id(&self, name: &str) -> Result<CardId, eyre::Report> {
        self.cards
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown card {name} in scenario world"))
    }

    /// Returns the loaded board.
    ///
    /// # Errors
    ///
    /// Returns an error when no board is loaded.
    pub fn board(&self) -> Result<&Board, eyre::Report> {
        self.session
            .board()
            .ok_or_else(|| eyre::eyre!("no board loaded in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated list of titles from a step.
pub fn split_titles(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}
