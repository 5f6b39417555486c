//! Then steps for board drag BDD scenarios.

use super::world::{BoardWorld, split_titles};
use corkboard::board::{
    ports::Severity,
    services::{OperationOutcome, Rejection, SyncCommand},
};
use rstest_bdd_macros::then;

#[then(r#"list "{name}" shows "{expected}""#)]
fn list_shows(world: &BoardWorld, name: String, expected: String) -> Result<(), eyre::Report> {
    let list_id = world.list_id(&name)?;
    let actual: Vec<String> = world
        .board()?
        .list(list_id)
        .ok_or_else(|| eyre::eyre!("list {name} is missing from the board"))?
        .cards()
        .iter()
        .map(|card| card.title().to_string())
        .collect();
    let wanted = split_titles(&expected);
    if actual != wanted {
        return Err(eyre::eyre!(
            "list {name} shows {actual:?}, expected {wanted:?}"
        ));
    }
    Ok(())
}

#[then(r#"card "{card}" has {count:usize} activity entry"#)]
fn card_activity_count(
    world: &BoardWorld,
    card: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let card_id = world.card_id(&card)?;
    let board = world.board()?;
    let (list_id, _) = board
        .locate_card(card_id)
        .ok_or_else(|| eyre::eyre!("card {card} is missing from the board"))?;
    let entries = board
        .card(list_id, card_id)
        .map_or(0, |found| found.activity().len());
    if entries != count {
        return Err(eyre::eyre!(
            "card {card} has {entries} activity entries, expected {count}"
        ));
    }
    Ok(())
}

#[then(r#"a move of "{card}" to list "{destination}" is queued"#)]
fn move_is_queued(
    world: &BoardWorld,
    card: String,
    destination: String,
) -> Result<(), eyre::Report> {
    let expected = SyncCommand::MoveCard {
        board_id: world.board()?.id(),
        card_id: world.card_id(&card)?,
        destination: world.list_id(&destination)?,
    };
    if !world.session.pending_commands().contains(&expected) {
        return Err(eyre::eyre!(
            "expected {expected:?} in {:?}",
            world.session.pending_commands()
        ));
    }
    Ok(())
}

#[then("a warning notice is shown")]
fn warning_notice_shown(world: &BoardWorld) -> Result<(), eyre::Report> {
    let notices = world.feedback.notices();
    if !notices
        .iter()
        .any(|notice| notice.severity == Severity::Warning)
    {
        return Err(eyre::eyre!("expected a warning notice, got {notices:?}"));
    }
    Ok(())
}

#[then("the deletion is refused because a board needs a list")]
fn deletion_refused(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.outcomes.last() {
        Some(OperationOutcome::Rejected(Rejection::LastListProtected)) => Ok(()),
        other => Err(eyre::eyre!("expected the last list to be protected, got {other:?}")),
    }
}

#[then("the board keeps {count:usize} list")]
fn board_keeps_lists(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = world.board()?.list_count();
    if actual != count {
        return Err(eyre::eyre!("board has {actual} lists, expected {count}"));
    }
    Ok(())
}
