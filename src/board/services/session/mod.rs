//! UI-facing facade over the board engine.
//!
//! A [`BoardSession`] owns the loaded board, applies every local mutation
//! synchronously and queues the matching remote work in an outbox of
//! [`SyncCommand`]s. The caller drains the outbox through a
//! [`Reconciler`], on the same task via [`BoardSession::sync_pending`] or on
//! another one, and feeds each [`SyncCompletion`] back through
//! [`BoardSession::apply_completion`].

mod details;
mod structure;

use super::{
    preferences::BoardPreferences,
    reconcile::{Reconciler, SyncCommand, SyncCompletion},
    store::{BoardStore, ReplaceKind},
};
use crate::board::{
    config::BoardConfig,
    domain::{
        Board, BoardDomainError, BoardId, BoardSnapshot, BoardView, Card, CardId, CardRecord,
        CompletionHeuristic, CoverColor, List, ListId, ListMutation, Member, MemberId,
        MutationEffect, TeamId, board_view, filter_cards,
    },
    ports::{Notice, PreferenceStore, RemoteBoardStore, RemoteStoreError, UserFeedback},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why an operation was refused without changing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No board is loaded.
    NoBoardLoaded,
    /// The list is not on the loaded board.
    UnknownList(ListId),
    /// The card is not in the addressed list.
    UnknownCard(CardId),
    /// The member is not on the board roster.
    UnknownMember(MemberId),
    /// The cover color is not in the configured palette.
    CoverNotInPalette(CoverColor),
    /// The last list of a board cannot be deleted.
    LastListProtected,
    /// The input failed domain validation.
    Invalid(BoardDomainError),
}

/// Result of a UI-facing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Local state changed; remote work may have been queued.
    Applied,
    /// Remote work was queued; local state changes when it completes.
    Queued,
    /// Nothing to do.
    Unchanged,
    /// The user declined the confirmation prompt.
    Declined,
    /// The operation was refused.
    Rejected(Rejection),
}

impl OperationOutcome {
    const fn from_effect(effect: MutationEffect) -> Self {
        if effect.is_changed() {
            Self::Applied
        } else {
            Self::Unchanged
        }
    }
}

/// What applying a completion did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionEffect {
    /// The completion targets a board or list that is gone.
    Ignored,
    /// An optimistic change was confirmed.
    Confirmed,
    /// A created entity was inserted.
    Inserted,
    /// Local state was replaced by a refetched snapshot.
    Refreshed,
    /// The failure was reported and local state kept.
    Failed,
}

/// Errors returned by [`BoardSession::load`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The board could not be fetched.
    #[error(transparent)]
    Remote(#[from] RemoteStoreError),
}

type OperationResult = Result<OperationOutcome, Rejection>;

fn resolve(result: OperationResult) -> OperationOutcome {
    result.unwrap_or_else(OperationOutcome::Rejected)
}

/// Board session bound to one remote store, preference store and feedback
/// sink.
pub struct BoardSession<R, P, F, C>
where
    R: RemoteBoardStore,
    P: PreferenceStore,
    F: UserFeedback,
    C: Clock + Send + Sync,
{
    store: BoardStore,
    reconciler: Reconciler<R>,
    preferences: BoardPreferences<P>,
    feedback: Arc<F>,
    clock: Arc<C>,
    config: BoardConfig,
    heuristic: CompletionHeuristic,
    roster: Vec<Member>,
    outbox: VecDeque<SyncCommand>,
}

impl<R, P, F, C> BoardSession<R, P, F, C>
where
    R: RemoteBoardStore,
    P: PreferenceStore,
    F: UserFeedback,
    C: Clock + Send + Sync,
{
    /// Creates a session without a loaded board.
    #[must_use]
    pub fn new(
        remote: Arc<R>,
        preferences: Arc<P>,
        feedback: Arc<F>,
        clock: Arc<C>,
        config: BoardConfig,
    ) -> Self {
        let heuristic = config.completion_heuristic();
        Self {
            store: BoardStore::new(),
            reconciler: Reconciler::new(remote),
            preferences: BoardPreferences::new(preferences),
            feedback,
            clock,
            config,
            heuristic,
            roster: Vec::new(),
            outbox: VecDeque::new(),
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the board state store.
    #[must_use]
    pub const fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Returns the loaded board.
    #[must_use]
    pub const fn board(&self) -> Option<&Board> {
        self.store.board()
    }

    /// Returns the member roster of the loaded board.
    #[must_use]
    pub fn roster(&self) -> &[Member] {
        &self.roster
    }

    /// Returns the board last opened for a team, if remembered.
    #[must_use]
    pub fn preferred_board(&self, team_id: TeamId) -> Option<BoardId> {
        self.preferences.last_board(team_id)
    }

    /// Fetches a board and makes it the loaded one.
    ///
    /// Applies the locally chosen background, restores the cached roster and
    /// remembers the board as the team's last one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Remote`] when the fetch fails; the previous
    /// board, if any, stays loaded.
    pub async fn load(&mut self, board_id: BoardId) -> Result<ReplaceKind, SessionError> {
        let snapshot = match self.reconciler.remote().fetch_board(board_id).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%board_id, error = %err, "failed to load board");
                self.feedback
                    .notify(Notice::error(format!("Could not load the board: {err}")));
                return Err(err.into());
            }
        };
        let board = self.board_with_preferences(&snapshot);
        self.roster = self.preferences.roster(board_id);
        self.preferences
            .remember_board(board.summary().team_id, board_id);
        let kind = self.store.replace(board);
        info!(%board_id, ?kind, "board loaded");
        Ok(kind)
    }

    fn board_with_preferences(&self, snapshot: &BoardSnapshot) -> Board {
        let mut board = Board::from_snapshot(snapshot);
        if let Some(background) = self.preferences.background(board.id()) {
            board.set_background(background);
        }
        board
    }

    /// Replaces the search string; the stored board is not touched.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.store.set_search(search);
    }

    /// Returns the search string.
    #[must_use]
    pub fn search(&self) -> &str {
        self.store.search()
    }

    /// Projects the loaded board for rendering, with search applied.
    #[must_use]
    pub fn view(&self) -> Option<BoardView> {
        self.store.board().map(|board| {
            board_view(
                board,
                self.store.search(),
                &self.config.labels,
                &self.roster,
                self.today(),
            )
        })
    }

    /// Cards of a list matching the search, in stored order.
    #[must_use]
    pub fn visible_cards(&self, list_id: ListId) -> Vec<&Card> {
        self.store
            .board()
            .and_then(|board| board.list(list_id))
            .map(|list| filter_cards(list, self.store.search()))
            .unwrap_or_default()
    }

    /// Returns the queued remote work, oldest first.
    #[must_use]
    pub const fn pending_commands(&self) -> &VecDeque<SyncCommand> {
        &self.outbox
    }

    /// Takes the oldest queued command for dispatch.
    pub fn next_command(&mut self) -> Option<SyncCommand> {
        self.outbox.pop_front()
    }

    /// Returns a reconciler that can dispatch commands on another task.
    #[must_use]
    pub fn reconciler(&self) -> Reconciler<R> {
        self.reconciler.clone()
    }

    /// Applies the outcome of a dispatched command.
    ///
    /// Completions for a board that is no longer loaded, or for a list that
    /// no longer exists, are ignored.
    pub fn apply_completion(&mut self, completion: SyncCompletion) -> CompletionEffect {
        let board_id = completion.board_id();
        if self.store.board_id() != Some(board_id) {
            debug!(%board_id, "ignoring completion for a board that is not loaded");
            return CompletionEffect::Ignored;
        }
        match completion {
            SyncCompletion::Persisted { .. } => CompletionEffect::Confirmed,
            SyncCompletion::ListCreated {
                list, cards, index, ..
            } => self.insert_created_list(
                List::new(list.id, list.title)
                    .with_cards(cards.iter().map(CardRecord::to_card).collect()),
                index,
            ),
            SyncCompletion::CardCreated { card, .. } => self.insert_created_card(&card),
            SyncCompletion::Refreshed {
                snapshot, cause, ..
            } => {
                warn!(%board_id, error = %cause, "reverting to refetched board");
                self.feedback.notify(Notice::warning(format!(
                    "Your change could not be saved ({cause}); the board was refreshed."
                )));
                let board = self.board_with_preferences(&snapshot);
                self.store.replace(board);
                CompletionEffect::Refreshed
            }
            SyncCompletion::Failed { cause, refetch, .. } => {
                let message = refetch.map_or_else(
                    || format!("The operation failed: {cause}"),
                    |refetch_error| {
                        format!(
                            "Your change could not be saved ({cause}) and the board could not be refreshed ({refetch_error})."
                        )
                    },
                );
                self.feedback.notify(Notice::error(message));
                CompletionEffect::Failed
            }
        }
    }

    /// Dispatches every queued command in order and applies its completion.
    pub async fn sync_pending(&mut self) -> Vec<CompletionEffect> {
        let mut effects = Vec::with_capacity(self.outbox.len());
        while let Some(command) = self.outbox.pop_front() {
            let completion = self.reconciler.dispatch(command).await;
            effects.push(self.apply_completion(completion));
        }
        effects
    }

    fn insert_created_list(&mut self, list: List, index: Option<usize>) -> CompletionEffect {
        let Some(board) = self.store.board_mut() else {
            return CompletionEffect::Ignored;
        };
        let count = board.list_count();
        let position = index.map_or(count, |requested| requested.min(count));
        match board.insert_list(position, list) {
            Ok(()) => CompletionEffect::Inserted,
            Err(err) => {
                debug!(error = %err, "ignoring created list");
                CompletionEffect::Ignored
            }
        }
    }

    fn insert_created_card(&mut self, record: &CardRecord) -> CompletionEffect {
        let Some(len) = self
            .store
            .board()
            .and_then(|board| board.list(record.list_id))
            .map(List::len)
        else {
            debug!(list_id = %record.list_id, "ignoring card created in a removed list");
            return CompletionEffect::Ignored;
        };
        let insertion = ListMutation::InsertCard {
            card: Box::new(record.to_card()),
            index: len,
        };
        match self.store.apply_list_mutation(record.list_id, insertion) {
            Ok(MutationEffect::Changed) => CompletionEffect::Inserted,
            Ok(MutationEffect::Missing | MutationEffect::Unchanged) => CompletionEffect::Ignored,
            Err(err) => {
                debug!(error = %err, "ignoring created card");
                CompletionEffect::Ignored
            }
        }
    }

    fn loaded(&self) -> Result<&Board, Rejection> {
        self.store.board().ok_or(Rejection::NoBoardLoaded)
    }

    fn list_of(&self, list_id: ListId) -> Result<&List, Rejection> {
        self.loaded()?
            .list(list_id)
            .ok_or(Rejection::UnknownList(list_id))
    }

    fn card_of(&self, list_id: ListId, card_id: CardId) -> Result<&Card, Rejection> {
        self.list_of(list_id)?
            .card(card_id)
            .ok_or(Rejection::UnknownCard(card_id))
    }

    fn queue(&mut self, command: SyncCommand) {
        debug!(board_id = %command.board_id(), ?command, "queued remote command");
        self.outbox.push_back(command);
    }

    fn forget_card(&mut self, card_id: CardId) {
        if self.store.active_card() == Some(card_id) {
            self.store.clear_selection();
        }
        self.store.drafts_mut().discard_card(card_id);
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}
