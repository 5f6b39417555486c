//! Given steps for board drag BDD scenarios.

use super::world::{BoardWorld, run_async, split_titles};
use corkboard::board::{
    adapters::memory::RemoteOperation,
    domain::{Background, Board, BoardId, BoardSummary, Card, List, ListId, TeamId, Title},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn build_list(
    world: &mut BoardWorld,
    name: &str,
    card_titles: &str,
) -> Result<List, eyre::Report> {
    let mut cards = Vec::new();
    for card_title in split_titles(card_titles) {
        let card = Card::new(Title::new(card_title.as_str())?);
        world.cards.insert(card_title, card.id());
        cards.push(card);
    }
    let list = List::new(ListId::new(), Title::new(name)?).with_cards(cards);
    world.lists.insert(name.to_owned(), list.id());
    Ok(list)
}

#[given(r#"a board where list "{first}" holds "{first_cards}" and list "{second}" holds "{second_cards}""#)]
fn board_with_two_lists(
    world: &mut BoardWorld,
    first: String,
    first_cards: String,
    second: String,
    second_cards: String,
) -> Result<(), eyre::Report> {
    let board_id = BoardId::new();
    let mut board = Board::new(BoardSummary {
        id: board_id,
        name: Title::new("Scenario board")?,
        background: Background::default(),
        team_id: TeamId::new(),
    });
    let first_list = build_list(world, &first, &first_cards)?;
    let second_list = build_list(world, &second, &second_cards)?;
    board.push_list(first_list)?;
    board.push_list(second_list)?;
    world
        .remote
        .seed(board.to_snapshot())
        .wrap_err("seed remote board")?;
    run_async(world.session.load(board_id)).wrap_err("load scenario board")?;
    Ok(())
}

#[given("the remote store rejects the next card move")]
fn remote_rejects_next_move(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world
        .remote
        .fail_next(RemoteOperation::MoveCard)
        .wrap_err("inject move failure")
}
