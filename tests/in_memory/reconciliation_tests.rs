//! Outbox dispatch and failure recovery against the in-memory remote.

use crate::in_memory::helpers::{card_drag, loaded_session, remote_titles, runtime, titles};
use corkboard::board::{
    adapters::memory::{RecordingFeedback, RemoteCall, RemoteOperation},
    domain::{Board, CardMutation, Title},
    ports::Severity,
    services::{CompletionEffect, OperationOutcome},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// A rejected move is rolled back by refetching the canonical board.
#[rstest]
fn rejected_move_reverts_local_state(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    fixture
        .remote
        .fail_next(RemoteOperation::MoveCard)
        .expect("inject failure");
    let drag = card_drag(&fixture.session, (ids.todo, 0), (ids.doing, 0));
    fixture.session.on_drag_end(&drag);

    let effects = rt.block_on(fixture.session.sync_pending());

    assert_eq!(effects, vec![CompletionEffect::Refreshed]);
    assert_eq!(titles(&fixture.session, ids.todo), vec!["A", "B", "C"]);
    assert_eq!(titles(&fixture.session, ids.doing), vec!["D"]);
    let notices = fixture.feedback.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices.iter().all(|notice| notice.severity == Severity::Warning));
}

/// When the refetch fails too, local state is kept and an error is shown.
#[rstest]
fn failed_refetch_keeps_local_state(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    fixture
        .remote
        .fail_next(RemoteOperation::DeleteCard)
        .expect("inject failure");
    fixture
        .remote
        .fail_next(RemoteOperation::FetchBoard)
        .expect("inject failure");

    assert_eq!(
        fixture.session.remove_card(ids.todo, ids.b),
        OperationOutcome::Applied
    );
    let effects = rt.block_on(fixture.session.sync_pending());

    assert_eq!(effects, vec![CompletionEffect::Failed]);
    assert_eq!(titles(&fixture.session, ids.todo), vec!["A", "C"]);
    assert!(
        fixture
            .feedback
            .notices()
            .iter()
            .any(|notice| notice.severity == Severity::Error)
    );
}

/// Commands are dispatched in the order they were queued.
#[rstest]
fn outbox_is_drained_in_order(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    let renamed = Title::new("Alpha").expect("valid title");
    fixture
        .session
        .update_card(ids.todo, ids.a, CardMutation::Rename(renamed));
    let drag = card_drag(&fixture.session, (ids.todo, 0), (ids.done, 0));
    fixture.session.on_drag_end(&drag);
    assert_eq!(fixture.session.add_card(ids.done, "Ship it"), OperationOutcome::Queued);

    let effects = rt.block_on(fixture.session.sync_pending());

    assert_eq!(
        effects,
        vec![
            CompletionEffect::Confirmed,
            CompletionEffect::Confirmed,
            CompletionEffect::Inserted
        ]
    );
    assert_eq!(titles(&fixture.session, ids.done), vec!["Alpha", "Ship it"]);
    assert_eq!(remote_titles(&fixture, ids.done), vec!["Alpha", "Ship it"]);
    assert!(fixture.session.pending_commands().is_empty());
}

/// A completion for a board other than the loaded one is dropped.
#[rstest]
fn completion_for_other_board_is_ignored(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut first = loaded_session(&rt, RecordingFeedback::new());
    let mut second = loaded_session(&rt, RecordingFeedback::new());
    assert_eq!(first.session.add_list("Review"), OperationOutcome::Queued);
    let command = first.session.next_command().expect("create list queued");
    let completion = rt.block_on(first.session.reconciler().dispatch(command));

    assert_eq!(
        second.session.apply_completion(completion),
        CompletionEffect::Ignored
    );
    assert_eq!(second.session.board().map(Board::list_count), Some(3));
    assert_eq!(first.session.board().map(Board::list_count), Some(3));
}

/// Creation failures are reported without refetching.
#[rstest]
fn failed_creation_reports_error(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    fixture
        .remote
        .fail_next(RemoteOperation::CreateList)
        .expect("inject failure");

    fixture.session.add_list("Review");
    let effects = rt.block_on(fixture.session.sync_pending());

    assert_eq!(effects, vec![CompletionEffect::Failed]);
    assert_eq!(
        fixture.session.board().map(Board::list_count),
        Some(3)
    );
    let fetches = fixture
        .remote
        .calls()
        .expect("read journal")
        .into_iter()
        .filter(|call| matches!(call, RemoteCall::FetchBoard(id) if *id == ids.board_id))
        .count();
    assert_eq!(fetches, 1);
}
