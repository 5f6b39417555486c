//! Card detail editing, selection, board background and member roster.

use super::{BoardSession, OperationOutcome, OperationResult, Rejection, resolve};
use crate::board::{
    domain::{
        ActivityEntry, ActivityId, Background, BoardDomainError, Card, CardId, CardMutation,
        Checklist, ChecklistItemId, Cover, LabelId, ListId, Member, MemberId, Title,
        system_activity_text,
    },
    ports::{
        CardPatch, Celebration, ConfirmationPrompt, PreferenceStore, RemoteBoardStore,
        UserFeedback,
    },
    services::{drafts::CardField, reconcile::SyncCommand},
};
use chrono::NaiveDate;
use mockable::Clock;
use tracing::debug;

impl<R, P, F, C> BoardSession<R, P, F, C>
where
    R: RemoteBoardStore,
    P: PreferenceStore,
    F: UserFeedback,
    C: Clock + Send + Sync,
{
    /// Selects a card for the detail view; returns `false` when it is not on
    /// the board.
    pub fn open_card(&mut self, card_id: CardId) -> bool {
        self.store.select_card(card_id)
    }

    /// Closes the detail view. Uncommitted drafts are kept.
    pub const fn close_card(&mut self) {
        self.store.clear_selection();
    }

    /// Returns the selected card and the list holding it.
    #[must_use]
    pub fn active_card(&self) -> Option<(ListId, &Card)> {
        let board = self.store.board()?;
        let card_id = self.store.active_card()?;
        let (list_id, _) = board.locate_card(card_id)?;
        board.card(list_id, card_id).map(|card| (list_id, card))
    }

    /// Records a keystroke in a card text field without touching the board.
    pub fn edit_card_field(&mut self, card_id: CardId, field: CardField, value: impl Into<String>) {
        self.store.drafts_mut().edit(card_id, field, value);
    }

    /// Commits the pending draft of a field, typically on blur.
    ///
    /// A blank title draft is dropped and the stored title kept.
    pub fn commit_card_field(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        field: CardField,
    ) -> OperationOutcome {
        let Some(draft) = self.store.drafts_mut().take(card_id, field) else {
            return OperationOutcome::Unchanged;
        };
        let mutation = match field {
            CardField::Title => match Title::new(draft) {
                Ok(title) => CardMutation::Rename(title),
                Err(err) => {
                    debug!(%card_id, error = %err, "discarding blank title draft");
                    return OperationOutcome::Unchanged;
                }
            },
            CardField::Description => CardMutation::Describe(Some(draft)),
        };
        self.update_card(list_id, card_id, mutation)
    }

    /// Applies a card mutation.
    ///
    /// Records a system activity entry for label, due date and cover changes
    /// and queues title and description changes for the remote store. Other
    /// fields are local.
    pub fn update_card(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        mutation: CardMutation,
    ) -> OperationOutcome {
        resolve(self.try_update_card(list_id, card_id, mutation))
    }

    fn try_update_card(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        mutation: CardMutation,
    ) -> OperationResult {
        let board_id = self.loaded()?.id();
        let card = self.card_of(list_id, card_id)?;
        match &mutation {
            CardMutation::SetLabels(labels) => {
                if let Some(label) = labels
                    .iter()
                    .find(|label| !self.config.labels.contains(label))
                {
                    return Err(Rejection::Invalid(BoardDomainError::UnknownLabel(
                        label.clone(),
                    )));
                }
            }
            CardMutation::SetCover(Some(Cover::Color(color)))
                if !self.config.cover_palette.is_empty()
                    && !self.config.cover_palette.contains(color) =>
            {
                return Err(Rejection::CoverNotInPalette(color.clone()));
            }
            CardMutation::SetMembers(members) => {
                if let Some(member_id) = members
                    .iter()
                    .find(|id| !self.roster.iter().any(|member| member.id() == **id))
                {
                    return Err(Rejection::UnknownMember(*member_id));
                }
            }
            _ => {}
        }
        let activity = system_activity_text(card, &mutation, &self.config.labels);
        let remote_patch = match &mutation {
            CardMutation::Rename(title) => Some(CardPatch::title(title.clone())),
            CardMutation::Describe(description) => Some(CardPatch::description(
                description.clone().unwrap_or_default(),
            )),
            _ => None,
        };

        let effect = self
            .store
            .apply_card_mutation(list_id, card_id, mutation)
            .map_err(Rejection::Invalid)?;
        if !effect.is_changed() {
            return Ok(OperationOutcome::from_effect(effect));
        }
        if let Some(text) = activity {
            let entry =
                ActivityEntry::system(text, self.config.current_user.as_str(), self.clock.as_ref());
            self.store
                .apply_card_mutation(list_id, card_id, CardMutation::AppendActivity(entry))
                .map_err(Rejection::Invalid)?;
        }
        if let Some(patch) = remote_patch {
            self.queue(SyncCommand::UpdateCard {
                board_id,
                card_id,
                patch,
            });
        }
        Ok(OperationOutcome::Applied)
    }

    /// Adds a comment by the current user. Local only.
    pub fn add_comment(&mut self, list_id: ListId, card_id: CardId, text: &str) -> OperationOutcome {
        resolve(self.try_add_comment(list_id, card_id, text))
    }

    fn try_add_comment(&mut self, list_id: ListId, card_id: CardId, text: &str) -> OperationResult {
        self.card_of(list_id, card_id)?;
        let entry = ActivityEntry::comment(
            text,
            self.config.current_user.as_str(),
            self.clock.as_ref(),
        )
        .map_err(Rejection::Invalid)?;
        let effect = self
            .store
            .apply_card_mutation(list_id, card_id, CardMutation::AppendActivity(entry))
            .map_err(Rejection::Invalid)?;
        Ok(OperationOutcome::from_effect(effect))
    }

    /// Deletes a comment after confirmation. System entries are refused.
    pub fn delete_comment(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        activity_id: ActivityId,
    ) -> OperationOutcome {
        resolve(self.try_delete_comment(list_id, card_id, activity_id))
    }

    fn try_delete_comment(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        activity_id: ActivityId,
    ) -> OperationResult {
        let entry = self
            .card_of(list_id, card_id)?
            .activity()
            .entries()
            .iter()
            .find(|entry| entry.id() == activity_id)
            .ok_or(Rejection::Invalid(BoardDomainError::ActivityNotFound(activity_id)))?;
        if !entry.is_deletable() {
            return Err(Rejection::Invalid(BoardDomainError::ActivityNotDeletable(
                activity_id,
            )));
        }
        if !self.feedback.confirm(&ConfirmationPrompt::DeleteComment) {
            return Ok(OperationOutcome::Declined);
        }
        let effect = self
            .store
            .apply_card_mutation(list_id, card_id, CardMutation::RemoveComment(activity_id))
            .map_err(Rejection::Invalid)?;
        Ok(OperationOutcome::from_effect(effect))
    }

    /// Appends a checklist item.
    pub fn add_checklist_item(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        text: &str,
    ) -> OperationOutcome {
        resolve(self.edit_checklist(list_id, card_id, |checklist| {
            checklist.push(text).map(|_| ())
        }))
    }

    /// Flips the completion of a checklist item.
    ///
    /// Celebrates when the toggle completes the checklist.
    pub fn toggle_checklist_item(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        item_id: ChecklistItemId,
    ) -> OperationOutcome {
        resolve(self.try_toggle_checklist_item(list_id, card_id, item_id))
    }

    fn try_toggle_checklist_item(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        item_id: ChecklistItemId,
    ) -> OperationResult {
        let was_complete = self.card_of(list_id, card_id)?.checklist().is_complete();
        let outcome = self.edit_checklist(list_id, card_id, |checklist| {
            checklist.toggle(item_id)
        })?;
        if !was_complete && self.card_of(list_id, card_id)?.checklist().is_complete() {
            self.feedback
                .celebrate(Celebration::ChecklistCompleted { card_id });
        }
        Ok(outcome)
    }

    /// Removes a checklist item.
    pub fn remove_checklist_item(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        item_id: ChecklistItemId,
    ) -> OperationOutcome {
        resolve(self.edit_checklist(list_id, card_id, |checklist| {
            checklist.remove(item_id).map(|_| ())
        }))
    }

    fn edit_checklist(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        edit: impl FnOnce(&mut Checklist) -> Result<(), BoardDomainError>,
    ) -> OperationResult {
        let mut checklist = self.card_of(list_id, card_id)?.checklist().clone();
        edit(&mut checklist).map_err(Rejection::Invalid)?;
        self.try_update_card(list_id, card_id, CardMutation::SetChecklist(checklist))
    }

    /// Adds the label when absent, removes it when present.
    pub fn toggle_label(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        label_id: &LabelId,
    ) -> OperationOutcome {
        resolve(self.try_toggle_label(list_id, card_id, label_id))
    }

    fn try_toggle_label(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        label_id: &LabelId,
    ) -> OperationResult {
        let mut labels = self.card_of(list_id, card_id)?.labels().to_vec();
        if labels.contains(label_id) {
            labels.retain(|label| label != label_id);
        } else {
            labels.push(label_id.clone());
        }
        self.try_update_card(list_id, card_id, CardMutation::SetLabels(labels))
    }

    /// Assigns the member when absent, unassigns when present.
    pub fn toggle_member(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        member_id: MemberId,
    ) -> OperationOutcome {
        resolve(self.try_toggle_member(list_id, card_id, member_id))
    }

    fn try_toggle_member(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        member_id: MemberId,
    ) -> OperationResult {
        let mut members = self.card_of(list_id, card_id)?.members().to_vec();
        if members.contains(&member_id) {
            members.retain(|member| *member != member_id);
        } else if self.roster.iter().any(|member| member.id() == member_id) {
            members.push(member_id);
        } else {
            return Err(Rejection::UnknownMember(member_id));
        }
        self.try_update_card(list_id, card_id, CardMutation::SetMembers(members))
    }

    /// Sets or clears the due date.
    pub fn set_due_date(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        due_date: Option<NaiveDate>,
    ) -> OperationOutcome {
        self.update_card(list_id, card_id, CardMutation::SetDueDate(due_date))
    }

    /// Sets or clears the cover.
    ///
    /// Color covers must come from the configured palette unless it is
    /// empty.
    pub fn set_cover(
        &mut self,
        list_id: ListId,
        card_id: CardId,
        cover: Option<Cover>,
    ) -> OperationOutcome {
        self.update_card(list_id, card_id, CardMutation::SetCover(cover))
    }

    /// Changes the board background and remembers it locally.
    pub fn set_background(&mut self, background: Background) -> OperationOutcome {
        let Some(board) = self.store.board_mut() else {
            return OperationOutcome::Rejected(Rejection::NoBoardLoaded);
        };
        if board.summary().background == background {
            return OperationOutcome::Unchanged;
        }
        let board_id = board.id();
        board.set_background(background.clone());
        self.preferences.set_background(board_id, &background);
        OperationOutcome::Applied
    }

    /// Adds a member to the board roster.
    pub fn add_member(&mut self, name: &str) -> OperationOutcome {
        resolve(self.try_add_member(name))
    }

    fn try_add_member(&mut self, name: &str) -> OperationResult {
        let board_id = self.loaded()?.id();
        let member = Member::new(name, self.config.default_member_color.as_str())
            .map_err(Rejection::Invalid)?;
        self.roster.push(member);
        self.preferences.set_roster(board_id, &self.roster);
        Ok(OperationOutcome::Applied)
    }

    /// Removes a member from the roster and from every card after
    /// confirmation.
    pub fn remove_member(&mut self, member_id: MemberId) -> OperationOutcome {
        resolve(self.try_remove_member(member_id))
    }

    fn try_remove_member(&mut self, member_id: MemberId) -> OperationResult {
        let board = self.loaded()?;
        let board_id = board.id();
        let member = self
            .roster
            .iter()
            .find(|entry| entry.id() == member_id)
            .ok_or(Rejection::UnknownMember(member_id))?;
        let prompt = ConfirmationPrompt::RemoveMember {
            name: member.name().to_owned(),
        };
        let assigned: Vec<(ListId, CardId, Vec<MemberId>)> = board
            .lists()
            .flat_map(|list| list.cards().iter().map(move |card| (list.id(), card)))
            .filter(|(_, card)| card.members().contains(&member_id))
            .map(|(list_id, card)| {
                let remaining = card
                    .members()
                    .iter()
                    .copied()
                    .filter(|id| *id != member_id)
                    .collect();
                (list_id, card.id(), remaining)
            })
            .collect();
        if !self.feedback.confirm(&prompt) {
            return Ok(OperationOutcome::Declined);
        }
        for (list_id, card_id, remaining) in assigned {
            self.store
                .apply_card_mutation(list_id, card_id, CardMutation::SetMembers(remaining))
                .map_err(Rejection::Invalid)?;
        }
        self.roster.retain(|entry| entry.id() != member_id);
        self.preferences.set_roster(board_id, &self.roster);
        Ok(OperationOutcome::Applied)
    }
}
