//! Typed access to locally persisted board preferences.
//!
//! Preferences are never required for correctness: read failures fall back
//! to "unset" and write failures are logged and dropped.

use crate::board::{
    domain::{Background, BoardId, Member, TeamId},
    ports::PreferenceStore,
};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Preference accessor shared by a session.
#[derive(Debug)]
pub struct BoardPreferences<P>
where
    P: PreferenceStore,
{
    store: Arc<P>,
}

impl<P> Clone for BoardPreferences<P>
where
    P: PreferenceStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

fn last_board_key(team_id: TeamId) -> String {
    format!("last_board:{team_id}")
}

fn background_key(board_id: BoardId) -> String {
    format!("background:{board_id}")
}

fn roster_key(board_id: BoardId) -> String {
    format!("members:{board_id}")
}

impl<P> BoardPreferences<P>
where
    P: PreferenceStore,
{
    /// Wraps a preference store.
    #[must_use]
    pub const fn new(store: Arc<P>) -> Self {
        Self { store }
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store
            .get(key)
            .inspect_err(|err| warn!(%key, error = %err, "failed to read preference"))
            .ok()
            .flatten()
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            warn!(%key, error = %err, "failed to write preference");
        }
    }

    /// Returns the board last opened for a team.
    #[must_use]
    pub fn last_board(&self, team_id: TeamId) -> Option<BoardId> {
        let key = last_board_key(team_id);
        let raw = self.read(&key)?;
        Uuid::parse_str(raw.trim())
            .inspect_err(|err| warn!(%key, error = %err, "ignoring malformed board id"))
            .ok()
            .map(BoardId::from_uuid)
    }

    /// Records the board last opened for a team.
    pub fn remember_board(&self, team_id: TeamId, board_id: BoardId) {
        self.write(&last_board_key(team_id), &board_id.to_string());
    }

    /// Returns the background chosen for a board.
    #[must_use]
    pub fn background(&self, board_id: BoardId) -> Option<Background> {
        self.read(&background_key(board_id))
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| Background::parse(&raw))
    }

    /// Records the background chosen for a board.
    pub fn set_background(&self, board_id: BoardId, background: &Background) {
        self.write(&background_key(board_id), background.as_str());
    }

    /// Returns the cached member roster of a board; empty when unset.
    #[must_use]
    pub fn roster(&self, board_id: BoardId) -> Vec<Member> {
        let key = roster_key(board_id);
        self.read(&key)
            .and_then(|raw| {
                serde_json::from_str(&raw)
                    .inspect_err(|err| warn!(%key, error = %err, "ignoring malformed roster"))
                    .ok()
            })
            .unwrap_or_default()
    }

    /// Caches the member roster of a board.
    pub fn set_roster(&self, board_id: BoardId, roster: &[Member]) {
        let key = roster_key(board_id);
        match serde_json::to_string(roster) {
            Ok(encoded) => self.write(&key, &encoded),
            Err(err) => warn!(%key, error = %err, "failed to encode roster"),
        }
    }
}
