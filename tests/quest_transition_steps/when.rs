//! When steps for quest transition BDD scenarios.

use super::world::{QuestWorld, run_async};
use eyre::WrapErr;
use questboard::quest::{domain::QuestId, services::BoardQuery};
use rstest_bdd_macros::when;

#[when(r#"the user begins quest "{quest_id}""#)]
fn user_begins_quest(world: &mut QuestWorld, quest_id: String) -> Result<(), eyre::Report> {
    let workspace = world.workspace()?.clone();
    let id = QuestId::backend(quest_id)?;
    let result = run_async(world.controller.begin(workspace.as_str(), &id));
    world.last_transition_result = Some(result);
    Ok(())
}

#[when(r#"the user submits quest "{quest_id}" for review"#)]
fn user_submits_quest(world: &mut QuestWorld, quest_id: String) -> Result<(), eyre::Report> {
    let workspace = world.workspace()?.clone();
    let id = QuestId::backend(quest_id)?;
    let result = run_async(world.controller.submit_for_review(workspace.as_str(), &id));
    world.last_transition_result = Some(result);
    Ok(())
}

#[when("the quest board is loaded")]
fn quest_board_is_loaded(world: &mut QuestWorld) -> Result<(), eyre::Report> {
    let workspace = world.workspace()?.clone();
    let view = run_async(
        world
            .controller
            .board(workspace.as_str(), &BoardQuery::default()),
    )
    .wrap_err("load quest board")?;
    world.board = view.quests;
    Ok(())
}
