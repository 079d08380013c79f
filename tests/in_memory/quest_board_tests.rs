//! In-memory integration tests for loading and board views.

use super::helpers::{Board, board};
use questboard::quest::{
    adapters::memory::ScriptedFailure,
    cache::CacheEventKind,
    ports::NoticeKind,
    services::{BoardFilter, BoardQuery, BoardSort, DEGRADED_NOTICE},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_lists_backend_quests_in_board_order(board: Board) {
    let view = board
        .controller
        .board(board.workspace.as_str(), &BoardQuery::default())
        .await
        .expect("board should load");

    let ids: Vec<String> = view.quests.iter().map(|quest| quest.id().to_string()).collect();
    assert_eq!(ids, vec!["q-cargo", "q-closures", "q-iterators", "q-lifetimes"]);
    assert!(view.quests.iter().all(|quest| !quest.is_synthetic()));
    assert_eq!(view.stats.completed, 1);
    assert_eq!(view.stats.total_stars, 30);
    assert!(board.notifier.notices().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_backend_shows_sample_board_once(board: Board) {
    board
        .api
        .fail_listing(Some(ScriptedFailure::Transport("dns failure".to_owned())))
        .expect("scripting should succeed");

    let view = board
        .controller
        .board(
            board.workspace.as_str(),
            &BoardQuery::default().with_sort(BoardSort::Reward),
        )
        .await
        .expect("board should load");
    let cached = board
        .controller
        .board(board.workspace.as_str(), &BoardQuery::default())
        .await
        .expect("board should load");

    assert!(view.quests.iter().all(|quest| quest.is_synthetic()));
    assert_eq!(view.quests.len(), cached.quests.len());
    let notices = board.notifier.notices();
    assert_eq!(notices.len(), 1, "cached fallback does not notify again");
    assert!(
        notices
            .first()
            .is_some_and(|notice| notice.kind == NoticeKind::Info && notice.text == DEGRADED_NOTICE)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recovered_backend_replaces_sample_board_on_refresh(board: Board) {
    board
        .api
        .fail_listing(Some(ScriptedFailure::Timeout))
        .expect("scripting should succeed");
    board
        .controller
        .board(board.workspace.as_str(), &BoardQuery::default())
        .await
        .expect("board should load");

    board.api.fail_listing(None).expect("scripting should succeed");
    board.controller.refresh_all();
    let view = board
        .controller
        .board(
            board.workspace.as_str(),
            &BoardQuery::new("rust").with_filter(BoardFilter::InProgress),
        )
        .await
        .expect("board should load");

    let titles: Vec<&str> = view.quests.iter().map(|quest| quest.title()).collect();
    assert_eq!(titles, vec!["Closures", "Iterators"]);
    assert_eq!(board.api.list_calls().expect("call count"), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_publishes_cache_events(board: Board) {
    let mut events = board.controller.subscribe();

    board
        .controller
        .refresh(board.workspace.as_str())
        .await
        .expect("refresh should succeed");

    let first = events.recv().await.expect("invalidation event");
    let second = events.recv().await.expect("load event");
    assert_eq!(first.kind, CacheEventKind::Invalidated);
    assert_eq!(second.kind, CacheEventKind::Loaded);
    assert!(second.generation > first.generation);
    assert_eq!(board.cache.generation(&board.workspace), second.generation);
}
