//! Shared test helpers for in-memory board integration tests.

use corkboard::board::{
    adapters::memory::{InMemoryPreferenceStore, InMemoryRemoteStore, RecordingFeedback},
    config::BoardConfig,
    domain::{
        Background, Board, BoardId, BoardSummary, Card, CardId, DragResult, DraggedItem,
        DropLocation, List, ListId, TeamId, Title,
    },
    services::BoardSession,
};
use mockable::DefaultClock;
use rstest::fixture;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Session type wired to the in-memory adapters.
pub type TestSession =
    BoardSession<InMemoryRemoteStore, InMemoryPreferenceStore, RecordingFeedback, DefaultClock>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Identifiers of the seeded board.
///
/// "To Do" holds A, B and C, "Doing" holds D and "Done" is empty.
#[derive(Debug, Clone, Copy)]
pub struct Seeded {
    pub board_id: BoardId,
    pub todo: ListId,
    pub doing: ListId,
    pub done: ListId,
    pub a: CardId,
    pub b: CardId,
    pub c: CardId,
    pub d: CardId,
}

/// Session, adapters and identifiers for one test.
pub struct Fixture {
    pub session: TestSession,
    pub remote: Arc<InMemoryRemoteStore>,
    pub feedback: Arc<RecordingFeedback>,
    pub ids: Seeded,
}

/// Builds a validated title.
///
/// # Panics
///
/// Panics when `value` is blank.
pub fn title(value: &str) -> Title {
    Title::new(value).expect("valid title")
}

fn seeded_board() -> (Board, Seeded) {
    let cards = ["A", "B", "C", "D"].map(|name| Card::new(title(name)));
    let [a, b, c, d] = cards.each_ref().map(Card::id);
    let [first, second, third, fourth] = cards;
    let todo = List::new(ListId::new(), title("To Do")).with_cards(vec![first, second, third]);
    let doing = List::new(ListId::new(), title("Doing")).with_cards(vec![fourth]);
    let done = List::new(ListId::new(), title("Done"));
    let ids = Seeded {
        board_id: BoardId::new(),
        todo: todo.id(),
        doing: doing.id(),
        done: done.id(),
        a,
        b,
        c,
        d,
    };
    let mut board = Board::new(BoardSummary {
        id: ids.board_id,
        name: title("Roadmap"),
        background: Background::default(),
        team_id: TeamId::new(),
    });
    for list in [todo, doing, done] {
        board.push_list(list).expect("push list");
    }
    (board, ids)
}

/// Seeds the remote store and loads the board into a fresh session.
///
/// # Panics
///
/// Panics when seeding or loading fails.
pub fn loaded_session(rt: &Runtime, feedback: RecordingFeedback) -> Fixture {
    let (board, ids) = seeded_board();
    let remote = Arc::new(InMemoryRemoteStore::new());
    remote.seed(board.to_snapshot()).expect("seed remote");
    let shared_feedback = Arc::new(feedback);
    let mut session = BoardSession::new(
        Arc::clone(&remote),
        Arc::new(InMemoryPreferenceStore::new()),
        Arc::clone(&shared_feedback),
        Arc::new(DefaultClock),
        BoardConfig::default(),
    );
    rt.block_on(session.load(ids.board_id)).expect("load board");
    Fixture {
        session,
        remote,
        feedback: shared_feedback,
        ids,
    }
}

/// Card titles of a list in the session's board.
pub fn titles(session: &TestSession, list_id: ListId) -> Vec<String> {
    session
        .board()
        .and_then(|board| board.list(list_id))
        .map(|list| {
            list.cards()
                .iter()
                .map(|card| card.title().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Card titles of a list as stored remotely.
///
/// # Panics
///
/// Panics when the remote board cannot be read.
pub fn remote_titles(fixture: &Fixture, list_id: ListId) -> Vec<String> {
    let snapshot = fixture
        .remote
        .stored_board(fixture.ids.board_id)
        .expect("read remote")
        .expect("board stored");
    snapshot
        .cards
        .iter()
        .filter(|card| card.list_id == list_id)
        .map(|card| card.title.to_string())
        .collect()
}

/// Drag of the card currently at `from` to `to`.
///
/// # Panics
///
/// Panics when no card sits at `from`.
pub fn card_drag(session: &TestSession, from: (ListId, usize), to: (ListId, usize)) -> DragResult {
    let (source, index) = from;
    let (destination, position) = to;
    let card_id = session
        .board()
        .and_then(|board| board.list(source))
        .and_then(|list| list.cards().get(index))
        .map(Card::id)
        .expect("card at source position");
    DragResult {
        item: DraggedItem::Card(card_id),
        source: DropLocation::list(source, index),
        destination: Some(DropLocation::list(destination, position)),
    }
}
