//! List and card lifecycle through [`BoardSession`].
//!
//! [`BoardSession`]: corkboard::board::services::BoardSession

use crate::in_memory::helpers::{loaded_session, remote_titles, runtime, titles};
use corkboard::board::{
    adapters::memory::RecordingFeedback,
    domain::{Board, SortMode},
    ports::{ConfirmationPrompt, Severity},
    services::{CompletionEffect, OperationOutcome, Rejection},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// New lists land at the end of the board once created remotely.
#[rstest]
fn added_list_is_appended_after_creation(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());

    assert_eq!(fixture.session.add_list("Review"), OperationOutcome::Queued);
    assert_eq!(fixture.session.board().map(Board::list_count), Some(3));
    rt.block_on(fixture.session.sync_pending());

    let last_title = fixture
        .session
        .board()
        .and_then(|board| board.lists().last().map(|list| list.title().to_string()));
    assert_eq!(last_title.as_deref(), Some("Review"));
}

/// Duplicating a list copies its cards, in order, into a new list.
#[rstest]
fn duplicate_list_copies_cards(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;

    assert_eq!(
        fixture.session.duplicate_list(ids.todo),
        OperationOutcome::Queued
    );
    let effects = rt.block_on(fixture.session.sync_pending());

    assert_eq!(effects, vec![CompletionEffect::Inserted]);
    let board = fixture.session.board().expect("board loaded");
    let copy_id = board.list_ids().get(1).copied().expect("copy inserted");
    assert_ne!(copy_id, ids.todo);
    assert_eq!(titles(&fixture.session, copy_id), vec!["A", "B", "C"]);
    assert_eq!(remote_titles(&fixture, copy_id), vec!["A", "B", "C"]);
    assert!(board.check_integrity().is_ok());
}

/// Deleting a list asks first and removes its cards with it.
#[rstest]
fn deleting_a_list_confirms_and_cascades(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;

    assert_eq!(fixture.session.remove_list(ids.todo), OperationOutcome::Applied);
    rt.block_on(fixture.session.sync_pending());

    assert_eq!(
        fixture.feedback.prompts(),
        vec![ConfirmationPrompt::DeleteList {
            title: crate::in_memory::helpers::title("To Do"),
            card_count: 3,
        }]
    );
    assert!(remote_titles(&fixture, ids.todo).is_empty());
    let board = fixture.session.board().expect("board loaded");
    assert_eq!(board.list_ids(), &[ids.doing, ids.done]);
    assert_eq!(board.locate_card(ids.a), None);
}

/// A board always keeps at least one list.
#[rstest]
fn last_list_cannot_be_deleted(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    fixture.session.remove_list(ids.doing);
    fixture.session.remove_list(ids.done);

    assert_eq!(
        fixture.session.remove_list(ids.todo),
        OperationOutcome::Rejected(Rejection::LastListProtected)
    );
    assert_eq!(fixture.session.board().map(Board::list_count), Some(1));
    assert!(
        fixture
            .feedback
            .notices()
            .iter()
            .any(|notice| notice.severity == Severity::Warning)
    );
}

/// Declining the prompt leaves the list and the remote untouched.
#[rstest]
fn declined_clear_keeps_cards(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::answering(false));
    let ids = fixture.ids;

    assert_eq!(fixture.session.clear_list(ids.todo), OperationOutcome::Declined);
    assert_eq!(titles(&fixture.session, ids.todo), vec!["A", "B", "C"]);
    assert!(fixture.session.pending_commands().is_empty());
}

/// Clearing a list deletes every card remotely too.
#[rstest]
fn cleared_list_is_emptied_remotely(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;

    assert_eq!(fixture.session.clear_list(ids.todo), OperationOutcome::Applied);
    let effects = rt.block_on(fixture.session.sync_pending());

    assert_eq!(effects.len(), 3);
    assert!(remote_titles(&fixture, ids.todo).is_empty());
    assert!(titles(&fixture.session, ids.todo).is_empty());
}

/// Renaming a list trims the title and persists it.
#[rstest]
fn renamed_list_is_persisted(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;

    assert_eq!(
        fixture.session.rename_list(ids.doing, "  In progress "),
        OperationOutcome::Applied
    );
    assert_eq!(
        fixture.session.rename_list(ids.doing, "In progress"),
        OperationOutcome::Unchanged
    );
    rt.block_on(fixture.session.sync_pending());

    let stored = fixture
        .remote
        .stored_board(ids.board_id)
        .expect("read remote")
        .expect("board stored");
    let renamed = stored
        .lists
        .iter()
        .find(|list| list.id == ids.doing)
        .map(|list| list.title.to_string());
    assert_eq!(renamed.as_deref(), Some("In progress"));
}

/// Sorting by name reorders locally without remote traffic.
#[rstest]
fn sort_by_name_is_local(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    fixture.session.move_card_to_list(ids.d, ids.doing, ids.todo);
    rt.block_on(fixture.session.sync_pending());
    assert_eq!(titles(&fixture.session, ids.todo), vec!["D", "A", "B", "C"]);

    assert_eq!(
        fixture.session.sort_list(ids.todo, SortMode::Name),
        OperationOutcome::Applied
    );

    assert_eq!(titles(&fixture.session, ids.todo), vec!["A", "B", "C", "D"]);
    assert!(fixture.session.pending_commands().is_empty());
    assert_eq!(
        remote_titles(&fixture, ids.todo),
        vec!["A", "B", "C", "D"]
    );
}
