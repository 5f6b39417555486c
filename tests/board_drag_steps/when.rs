//! When steps for board drag BDD scenarios.

use super::world::{BoardWorld, run_async};
use corkboard::board::domain::{DragResult, DraggedItem, DropLocation};
use rstest_bdd_macros::when;

#[when(r#"card "{card}" is dragged from list "{source}" to position {index:usize} of list "{destination}""#)]
fn drag_card(
    world: &mut BoardWorld,
    card: String,
    source: String,
    index: usize,
    destination: String,
) -> Result<(), eyre::Report> {
    let card_id = world.card_id(&card)?;
    let source_id = world.list_id(&source)?;
    let destination_id = world.list_id(&destination)?;
    let from = world
        .board()?
        .list(source_id)
        .and_then(|list| list.position_of(card_id))
        .ok_or_else(|| eyre::eyre!("card {card} is not in list {source}"))?;
    let drag = DragResult {
        item: DraggedItem::Card(card_id),
        source: DropLocation::list(source_id, from),
        destination: Some(DropLocation::list(destination_id, index)),
    };
    let outcome = world.session.on_drag_end(&drag);
    world.outcomes.push(outcome);
    Ok(())
}

#[when("pending changes are synchronised")]
fn synchronise(world: &mut BoardWorld) {
    run_async(world.session.sync_pending());
}

#[when(r#"list "{name}" is deleted"#)]
fn delete_list(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    let list_id = world.list_id(&name)?;
    let outcome = world.session.remove_list(list_id);
    world.outcomes.push(outcome);
    Ok(())
}
