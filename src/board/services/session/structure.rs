//! Operations that change which lists and cards exist and where they sit.

use super::{BoardSession, OperationOutcome, OperationResult, Rejection, resolve};
use crate::board::{
    domain::{
        Card, CardId, DragResult, DraggedItem, DropLocation, ListId, ListMutation, SortMode, Title,
    },
    ports::{
        Celebration, ConfirmationPrompt, Notice, PreferenceStore, RemoteBoardStore, UserFeedback,
    },
    services::{
        reconcile::{CardDraft, SyncCommand},
        reorder::{DragOutcome, PlannedMove, ReorderContext, apply_drag},
    },
};
use mockable::Clock;
use tracing::{debug, warn};

impl<R, P, F, C> BoardSession<R, P, F, C>
where
    R: RemoteBoardStore,
    P: PreferenceStore,
    F: UserFeedback,
    C: Clock + Send + Sync,
{
    /// Applies the end of a drag gesture.
    ///
    /// Cancelled drops, drops in place and drops that no longer match the
    /// board leave it untouched. Cards dropped into another list queue a
    /// remote move; reordering cards within a list or lists on the board is
    /// local only.
    pub fn on_drag_end(&mut self, drag: &DragResult) -> OperationOutcome {
        let Some(board) = self.store.board() else {
            return OperationOutcome::Rejected(Rejection::NoBoardLoaded);
        };
        let context = ReorderContext {
            heuristic: &self.heuristic,
            author: &self.config.current_user,
            clock: self.clock.as_ref(),
        };
        match apply_drag(board, drag, &context) {
            DragOutcome::Cancelled | DragOutcome::Unchanged => OperationOutcome::Unchanged,
            DragOutcome::Stale(reason) => {
                warn!(board_id = %board.id(), %reason, "ignoring stale drop");
                OperationOutcome::Unchanged
            }
            DragOutcome::Moved(planned) => {
                self.install_move(*planned);
                OperationOutcome::Applied
            }
        }
    }

    fn install_move(&mut self, planned: PlannedMove) {
        let PlannedMove {
            board,
            kind,
            card,
            transfer,
            celebrate,
        } = planned;
        let board_id = board.id();
        self.store.replace(board);
        debug!(%board_id, ?kind, "applied drop");
        if let Some((card_id, destination)) = card {
            self.queue(SyncCommand::MoveCard {
                board_id,
                card_id,
                destination,
            });
        }
        if let Some(moved) = transfer.filter(|_| celebrate) {
            self.feedback.celebrate(Celebration::CardCompleted {
                card_id: moved.card_id,
                list_id: moved.destination,
            });
        }
    }

    /// Moves a card to the top of another list and keeps it selected.
    ///
    /// Uses the same path as a drag, so the move is logged, celebrated and
    /// persisted exactly like one.
    pub fn move_card_to_list(
        &mut self,
        card_id: CardId,
        source: ListId,
        destination: ListId,
    ) -> OperationOutcome {
        resolve(self.try_move_card_to_list(card_id, source, destination))
    }

    fn try_move_card_to_list(
        &mut self,
        card_id: CardId,
        source: ListId,
        destination: ListId,
    ) -> OperationResult {
        let from = self
            .list_of(source)?
            .position_of(card_id)
            .ok_or(Rejection::UnknownCard(card_id))?;
        self.list_of(destination)?;
        if source == destination {
            return Ok(OperationOutcome::Unchanged);
        }
        let drag = DragResult {
            item: DraggedItem::Card(card_id),
            source: DropLocation::list(source, from),
            destination: Some(DropLocation::list(destination, 0)),
        };
        let outcome = self.on_drag_end(&drag);
        if outcome == OperationOutcome::Applied {
            self.store.select_card(card_id);
        }
        Ok(outcome)
    }

    /// Requests a new list at the end of the board.
    ///
    /// The list appears once the remote store has created it.
    pub fn add_list(&mut self, title: &str) -> OperationOutcome {
        resolve(self.try_add_list(title))
    }

    fn try_add_list(&mut self, title: &str) -> OperationResult {
        let board_id = self.loaded()?.id();
        let list_title = Title::new(title).map_err(Rejection::Invalid)?;
        self.queue(SyncCommand::CreateList {
            board_id,
            title: list_title,
        });
        Ok(OperationOutcome::Queued)
    }

    /// Requests a new card at the end of a list.
    ///
    /// The card appears once the remote store has created it.
    pub fn add_card(&mut self, list_id: ListId, title: &str) -> OperationOutcome {
        resolve(self.try_add_card(list_id, title))
    }

    fn try_add_card(&mut self, list_id: ListId, title: &str) -> OperationResult {
        let board_id = self.loaded()?.id();
        self.list_of(list_id)?;
        let card_title = Title::new(title).map_err(Rejection::Invalid)?;
        self.queue(SyncCommand::CreateCard {
            board_id,
            list_id,
            title: card_title,
        });
        Ok(OperationOutcome::Queued)
    }

    /// Renames a list. A blank title keeps the current one.
    pub fn rename_list(&mut self, list_id: ListId, title: &str) -> OperationOutcome {
        resolve(self.try_rename_list(list_id, title))
    }

    fn try_rename_list(&mut self, list_id: ListId, title: &str) -> OperationResult {
        let board_id = self.loaded()?.id();
        self.list_of(list_id)?;
        let Ok(renamed) = Title::new(title) else {
            return Ok(OperationOutcome::Unchanged);
        };
        let effect = self
            .store
            .apply_list_mutation(list_id, ListMutation::Rename(renamed.clone()))
            .map_err(Rejection::Invalid)?;
        if effect.is_changed() {
            self.queue(SyncCommand::RenameList {
                board_id,
                list_id,
                title: renamed,
            });
        }
        Ok(OperationOutcome::from_effect(effect))
    }

    /// Sorts the cards of a list. Local only.
    pub fn sort_list(&mut self, list_id: ListId, mode: SortMode) -> OperationOutcome {
        resolve(self.try_sort_list(list_id, mode))
    }

    fn try_sort_list(&mut self, list_id: ListId, mode: SortMode) -> OperationResult {
        self.list_of(list_id)?;
        let effect = self
            .store
            .apply_list_mutation(list_id, ListMutation::Sort(mode))
            .map_err(Rejection::Invalid)?;
        debug!(%list_id, mode = mode.as_str(), "sorted list");
        Ok(OperationOutcome::from_effect(effect))
    }

    /// Requests a copy of a list, placed right after it, with copies of its
    /// cards' titles and descriptions.
    pub fn duplicate_list(&mut self, list_id: ListId) -> OperationOutcome {
        resolve(self.try_duplicate_list(list_id))
    }

    fn try_duplicate_list(&mut self, list_id: ListId) -> OperationResult {
        let board = self.loaded()?;
        let board_id = board.id();
        let list = board.list(list_id).ok_or(Rejection::UnknownList(list_id))?;
        let position = board
            .list_position(list_id)
            .ok_or(Rejection::UnknownList(list_id))?;
        let title = Title::new(format!("{} (copy)", list.title())).map_err(Rejection::Invalid)?;
        let cards = list
            .cards()
            .iter()
            .map(|card| CardDraft {
                title: card.title().clone(),
                description: card.description().map(str::to_owned),
            })
            .collect();
        self.queue(SyncCommand::DuplicateList {
            board_id,
            title,
            index: position.saturating_add(1),
            cards,
        });
        Ok(OperationOutcome::Queued)
    }

    /// Deletes every card of a list after confirmation.
    pub fn clear_list(&mut self, list_id: ListId) -> OperationOutcome {
        resolve(self.try_clear_list(list_id))
    }

    fn try_clear_list(&mut self, list_id: ListId) -> OperationResult {
        let board_id = self.loaded()?.id();
        let list = self.list_of(list_id)?;
        if list.is_empty() {
            return Ok(OperationOutcome::Unchanged);
        }
        let prompt = ConfirmationPrompt::ClearList {
            title: list.title().clone(),
            card_count: list.len(),
        };
        let card_ids: Vec<CardId> = list.cards().iter().map(Card::id).collect();
        if !self.feedback.confirm(&prompt) {
            return Ok(OperationOutcome::Declined);
        }
        self.store
            .apply_list_mutation(list_id, ListMutation::Clear)
            .map_err(Rejection::Invalid)?;
        for card_id in card_ids {
            self.forget_card(card_id);
            self.queue(SyncCommand::DeleteCard { board_id, card_id });
        }
        Ok(OperationOutcome::Applied)
    }

    /// Deletes a list with its cards after confirmation.
    ///
    /// When the board must keep one list, deleting the last one is refused
    /// with a warning notice.
    pub fn remove_list(&mut self, list_id: ListId) -> OperationOutcome {
        resolve(self.try_remove_list(list_id))
    }

    fn try_remove_list(&mut self, list_id: ListId) -> OperationResult {
        let board = self.loaded()?;
        let board_id = board.id();
        let list = board.list(list_id).ok_or(Rejection::UnknownList(list_id))?;
        if self.config.require_one_list && board.list_count() <= 1 {
            self.feedback
                .notify(Notice::warning("A board must keep at least one list."));
            return Err(Rejection::LastListProtected);
        }
        let prompt = ConfirmationPrompt::DeleteList {
            title: list.title().clone(),
            card_count: list.len(),
        };
        let card_ids: Vec<CardId> = list.cards().iter().map(Card::id).collect();
        if !self.feedback.confirm(&prompt) {
            return Ok(OperationOutcome::Declined);
        }
        if self
            .store
            .board_mut()
            .and_then(|current| current.remove_list(list_id))
            .is_none()
        {
            return Err(Rejection::UnknownList(list_id));
        }
        for card_id in card_ids {
            self.forget_card(card_id);
        }
        self.queue(SyncCommand::DeleteList { board_id, list_id });
        Ok(OperationOutcome::Applied)
    }

    /// Deletes a card after confirmation.
    pub fn remove_card(&mut self, list_id: ListId, card_id: CardId) -> OperationOutcome {
        resolve(self.try_remove_card(list_id, card_id))
    }

    fn try_remove_card(&mut self, list_id: ListId, card_id: CardId) -> OperationResult {
        let board_id = self.loaded()?.id();
        let prompt = ConfirmationPrompt::DeleteCard {
            title: self.card_of(list_id, card_id)?.title().clone(),
        };
        if !self.feedback.confirm(&prompt) {
            return Ok(OperationOutcome::Declined);
        }
        let effect = self
            .store
            .apply_list_mutation(list_id, ListMutation::RemoveCard(card_id))
            .map_err(Rejection::Invalid)?;
        if effect.is_changed() {
            self.forget_card(card_id);
            self.queue(SyncCommand::DeleteCard { board_id, card_id });
        }
        Ok(OperationOutcome::from_effect(effect))
    }
}
