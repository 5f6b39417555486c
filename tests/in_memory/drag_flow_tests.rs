//! Drag-and-drop flows through [`BoardSession`] and the in-memory remote.
//!
//! [`BoardSession`]: corkboard::board::services::BoardSession

use crate::in_memory::helpers::{card_drag, loaded_session, remote_titles, runtime, titles};
use corkboard::board::{
    adapters::memory::{RecordingFeedback, RemoteCall},
    domain::{DragResult, DraggedItem, DropLocation},
    ports::Celebration,
    services::{CompletionEffect, OperationOutcome, SyncCommand},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Moving A from "To Do" to the top of "Doing" updates both sides locally
/// and remotely.
#[rstest]
fn cross_list_move_is_persisted(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    let drag = card_drag(&fixture.session, (ids.todo, 0), (ids.doing, 0));

    assert_eq!(fixture.session.on_drag_end(&drag), OperationOutcome::Applied);
    assert_eq!(titles(&fixture.session, ids.todo), vec!["B", "C"]);
    assert_eq!(titles(&fixture.session, ids.doing), vec!["A", "D"]);
    assert_eq!(
        fixture.session.pending_commands().front(),
        Some(&SyncCommand::MoveCard {
            board_id: ids.board_id,
            card_id: ids.a,
            destination: ids.doing,
        })
    );

    let effects = rt.block_on(fixture.session.sync_pending());

    assert_eq!(effects, vec![CompletionEffect::Confirmed]);
    assert_eq!(remote_titles(&fixture, ids.todo), vec!["B", "C"]);
    assert!(remote_titles(&fixture, ids.doing).contains(&"A".to_owned()));
    assert!(fixture.feedback.celebrations().is_empty());
}

/// Reordering within a list keeps every other list intact.
#[rstest]
fn same_list_reorder_keeps_other_lists(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    let drag = card_drag(&fixture.session, (ids.todo, 2), (ids.todo, 0));

    assert_eq!(fixture.session.on_drag_end(&drag), OperationOutcome::Applied);

    assert_eq!(titles(&fixture.session, ids.todo), vec!["C", "A", "B"]);
    assert_eq!(titles(&fixture.session, ids.doing), vec!["D"]);
    let moved = fixture
        .session
        .board()
        .and_then(|board| board.card(ids.todo, ids.c))
        .expect("card kept");
    assert!(moved.activity().is_empty());
}

/// A reorder within a list stays local, so syncing and reloading leave the
/// remote order untouched and the reloaded board agrees with it.
#[rstest]
fn same_list_reorder_agrees_with_remote_after_reload(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    let drag = card_drag(&fixture.session, (ids.todo, 0), (ids.todo, 1));

    assert_eq!(fixture.session.on_drag_end(&drag), OperationOutcome::Applied);
    assert_eq!(titles(&fixture.session, ids.todo), vec!["B", "A", "C"]);
    assert!(fixture.session.pending_commands().is_empty());

    let effects = rt.block_on(fixture.session.sync_pending());

    assert!(effects.is_empty());
    assert_eq!(remote_titles(&fixture, ids.todo), vec!["A", "B", "C"]);
    rt.block_on(fixture.session.load(ids.board_id))
        .expect("reload board");
    assert_eq!(
        titles(&fixture.session, ids.todo),
        remote_titles(&fixture, ids.todo)
    );
    let calls = fixture.remote.calls().expect("read journal");
    assert!(
        !calls
            .iter()
            .any(|call| matches!(call, RemoteCall::MoveCard { .. }))
    );
}

/// Dropping into a list whose title reads as finished celebrates once.
#[rstest]
fn drop_into_done_celebrates(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    let drag = card_drag(&fixture.session, (ids.doing, 0), (ids.done, 0));

    fixture.session.on_drag_end(&drag);

    assert_eq!(
        fixture.feedback.celebrations(),
        vec![Celebration::CardCompleted {
            card_id: ids.d,
            list_id: ids.done,
        }]
    );
    let entry = fixture
        .session
        .board()
        .and_then(|board| board.card(ids.done, ids.d))
        .and_then(|card| card.activity().latest().cloned())
        .expect("move logged");
    assert_eq!(entry.text(), "moved this card from Doing to Done");
}

/// Cancelled and in-place drops never reach the remote store.
#[rstest]
fn cancelled_and_in_place_drops_are_ignored(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    let cancelled = DragResult {
        destination: None,
        ..card_drag(&fixture.session, (ids.todo, 0), (ids.todo, 0))
    };
    let in_place = card_drag(&fixture.session, (ids.todo, 1), (ids.todo, 1));

    assert_eq!(
        fixture.session.on_drag_end(&cancelled),
        OperationOutcome::Unchanged
    );
    assert_eq!(
        fixture.session.on_drag_end(&in_place),
        OperationOutcome::Unchanged
    );
    assert!(fixture.session.pending_commands().is_empty());
    let calls = fixture.remote.calls().expect("read journal");
    assert_eq!(calls, vec![RemoteCall::FetchBoard(ids.board_id)]);
}

/// Lists can be reordered, and the new order is only local.
#[rstest]
fn list_reorder_is_local(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let mut fixture = loaded_session(&rt, RecordingFeedback::new());
    let ids = fixture.ids;
    let drag = DragResult {
        item: DraggedItem::List(ids.todo),
        source: DropLocation::board(0),
        destination: Some(DropLocation::board(2)),
    };

    assert_eq!(fixture.session.on_drag_end(&drag), OperationOutcome::Applied);
    assert_eq!(
        fixture
            .session
            .board()
            .map(|board| board.list_ids().to_vec()),
        Some(vec![ids.doing, ids.done, ids.todo])
    );
    assert!(fixture.session.pending_commands().is_empty());
}
