//! Shared fixtures for board unit tests.

use crate::board::domain::{
    Background, Board, BoardId, BoardSummary, Card, CardId, List, ListId, TeamId, Title,
};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock frozen at a known instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[fixture]
pub fn clock() -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
    )
}

pub fn title(value: &str) -> Title {
    Title::new(value).expect("valid title")
}

pub fn summary(name: &str) -> BoardSummary {
    BoardSummary {
        id: BoardId::new(),
        name: title(name),
        background: Background::default(),
        team_id: TeamId::new(),
    }
}

/// Board with "To Do" holding A, B and C, "Doing" holding D, and an empty
/// "Done" list.
#[derive(Debug, Clone)]
pub struct SampleBoard {
    pub board: Board,
    pub todo: ListId,
    pub doing: ListId,
    pub done: ListId,
    pub a: CardId,
    pub b: CardId,
    pub c: CardId,
    pub d: CardId,
}

impl SampleBoard {
    pub fn titles(&self, list_id: ListId) -> Vec<String> {
        self.board
            .list(list_id)
            .expect("list exists")
            .cards()
            .iter()
            .map(|card| card.title().to_string())
            .collect()
    }
}

#[fixture]
pub fn sample() -> SampleBoard {
    let (a, b, c, d) = (
        Card::new(title("A")),
        Card::new(title("B")),
        Card::new(title("C")),
        Card::new(title("D")),
    );
    let (a_id, b_id, c_id, d_id) = (a.id(), b.id(), c.id(), d.id());
    let todo = List::new(ListId::new(), title("To Do")).with_cards(vec![a, b, c]);
    let doing = List::new(ListId::new(), title("Doing")).with_cards(vec![d]);
    let done = List::new(ListId::new(), title("Done"));
    let (todo_id, doing_id, done_id) = (todo.id(), doing.id(), done.id());
    let mut board = Board::new(summary("Roadmap"));
    board.push_list(todo).expect("push to do");
    board.push_list(doing).expect("push doing");
    board.push_list(done).expect("push done");
    SampleBoard {
        board,
        todo: todo_id,
        doing: doing_id,
        done: done_id,
        a: a_id,
        b: b_id,
        c: c_id,
        d: d_id,
    }
}
