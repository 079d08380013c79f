//! Given steps for quest transition BDD scenarios.

use super::world::{QuestWorld, run_async};
use eyre::WrapErr;
use questboard::quest::{
    adapters::memory::ScriptedFailure,
    domain::{RawTask, WorkspaceId},
};
use rstest_bdd_macros::given;

#[given(r#"a workspace "{workspace}" with a "{status}" quest "{quest_id}" titled "{title}""#)]
fn workspace_with_quest(
    world: &mut QuestWorld,
    workspace: String,
    status: String,
    quest_id: String,
    title: String,
) -> Result<(), eyre::Report> {
    let workspace_id = WorkspaceId::new(workspace)?;
    world
        .api
        .seed(&workspace_id, vec![RawTask::new(quest_id, title, status)])
        .wrap_err("seed task service")?;
    world.workspace = Some(workspace_id);
    Ok(())
}

#[given(r#"a workspace "{workspace}" whose task service is unreachable"#)]
fn workspace_with_unreachable_service(
    world: &mut QuestWorld,
    workspace: String,
) -> Result<(), eyre::Report> {
    world
        .api
        .fail_listing(Some(ScriptedFailure::Transport(
            "connection refused".to_owned(),
        )))
        .wrap_err("script listing failure")?;
    world.workspace = Some(WorkspaceId::new(workspace)?);
    Ok(())
}

#[given("the quest board has been loaded")]
fn board_has_been_loaded(world: &mut QuestWorld) -> Result<(), eyre::Report> {
    let workspace = world.workspace()?.clone();
    world.board = run_async(world.controller.refresh(workspace.as_str()))
        .wrap_err("load quest board")?;
    Ok(())
}

#[given(r#"the task service rejects status changes with "{message}""#)]
fn service_rejects_changes(world: &mut QuestWorld, message: String) -> Result<(), eyre::Report> {
    world
        .api
        .fail_changes(Some(ScriptedFailure::Rejected(Some(message))))
        .wrap_err("script status change failure")?;
    Ok(())
}
