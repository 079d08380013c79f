//! In-memory integration tests for quest transitions.

use super::helpers::{Board, board};
use questboard::quest::{
    adapters::memory::ScriptedFailure,
    domain::{QuestId, QuestStatus},
    ports::NoticeKind,
    services::{TransitionError, TransitionRejection},
};
use rstest::rstest;

fn quest_id(value: &str) -> QuestId {
    QuestId::backend(value).expect("valid quest id")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn begin_then_submit_walks_the_workflow(board: Board) {
    let workspace = board.workspace.as_str();
    board
        .controller
        .refresh(workspace)
        .await
        .expect("load should succeed");

    let started = board
        .controller
        .begin(workspace, &quest_id("q-closures"))
        .await
        .expect("begin succeeds");
    assert_eq!((started.status(), started.progress()), (QuestStatus::InProgress, 50));

    let submitted = board
        .controller
        .submit_for_review(workspace, &quest_id("q-closures"))
        .await
        .expect("submit succeeds");
    assert_eq!((submitted.status(), submitted.progress()), (QuestStatus::InReview, 90));

    let stored = board.api.tasks(&board.workspace).expect("tasks");
    assert!(
        stored
            .iter()
            .any(|task| task.id == "q-closures" && task.status == "In Review")
    );
    let kinds: Vec<NoticeKind> = board
        .notifier
        .notices()
        .into_iter()
        .map(|notice| notice.kind)
        .collect();
    assert_eq!(kinds, vec![NoticeKind::Success, NoticeKind::Success]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn locked_quest_cannot_be_started(board: Board) {
    let workspace = board.workspace.as_str();
    board
        .controller
        .refresh(workspace)
        .await
        .expect("load should succeed");

    let result = board
        .controller
        .begin(workspace, &quest_id("q-lifetimes"))
        .await;

    assert_eq!(
        result,
        Err(TransitionError::PreconditionFailed(
            TransitionRejection::Locked
        ))
    );
    assert!(board.api.change_calls().expect("call log").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_submission_keeps_previous_state(board: Board) {
    let workspace = board.workspace.as_str();
    board
        .controller
        .refresh(workspace)
        .await
        .expect("load should succeed");
    let before = board
        .cache
        .find(&board.workspace, &quest_id("q-iterators"))
        .expect("quest cached");
    board
        .api
        .fail_changes(Some(ScriptedFailure::Rejected(Some(
            "Reviewer queue is full".to_owned(),
        ))))
        .expect("scripting should succeed");

    let result = board
        .controller
        .submit_for_review(workspace, &quest_id("q-iterators"))
        .await;

    assert_eq!(
        result,
        Err(TransitionError::MutationFailed {
            message: "Reviewer queue is full".to_owned()
        })
    );
    assert_eq!(
        board.cache.find(&board.workspace, &quest_id("q-iterators")),
        Some(before)
    );
    assert!(
        board
            .notifier
            .notices()
            .last()
            .is_some_and(|notice| notice.kind == NoticeKind::Error)
    );
}
