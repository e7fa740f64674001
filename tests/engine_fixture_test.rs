use std::io::Write;
use std::time::Duration;

use flowhub::engine::{Engine, Event, FixtureEngine, Request};
use flowhub::types::{CandidateLists, PullRequest};

fn load_fixture_prs() -> Vec<PullRequest> {
    let json = include_str!("fixtures/board.json");
    serde_json::from_str(json).expect("valid board.json fixture")
}

#[test]
fn fixture_engine_serves_the_loaded_board() {
    let prs = load_fixture_prs();
    assert_eq!(prs.len(), 3, "fixture should have exactly three PRs");

    let engine = FixtureEngine { prs: prs.clone() };
    let handle = engine.start();
    let (tx, rx) = std::sync::mpsc::channel::<Event>();

    handle.send(Request::FetchBoard { reply_tx: tx });

    let event = rx
        .recv_timeout(Duration::from_secs(2))
        .expect("engine should reply within 2 seconds");

    match event {
        Event::BoardFetched { prs: fetched } => {
            assert_eq!(fetched.len(), prs.len());
            assert_eq!(fetched[0].number, 101);
            assert_eq!(fetched[0].title, "Fix login redirect loop");
        }
        Event::FetchError { .. } => panic!("expected BoardFetched, got FetchError"),
    }
}

#[test]
fn fixture_engine_answers_repeated_fetches() {
    let engine = FixtureEngine {
        prs: load_fixture_prs(),
    };
    let handle = engine.start();

    for _ in 0..3 {
        let (tx, rx) = std::sync::mpsc::channel::<Event>();
        handle.send(Request::FetchBoard { reply_tx: tx });
        let event = rx
            .recv_timeout(Duration::from_secs(2))
            .expect("engine should reply within 2 seconds");
        assert!(matches!(event, Event::BoardFetched { .. }));
    }
}

#[test]
fn from_json_file_round_trips() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{
            "number": 7,
            "title": "Rotate credentials",
            "author": "priyak",
            "repo": "acme/infra",
            "state": "closed",
            "updated_at": "2026-08-01T08:00:00Z"
        }}]"#
    )
    .unwrap();

    let engine = FixtureEngine::from_json_file(file.path()).unwrap();
    assert_eq!(engine.prs.len(), 1);
    assert_eq!(engine.prs[0].author, "priyak");
}

#[test]
fn from_json_file_rejects_bad_input() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    assert!(FixtureEngine::from_json_file(file.path()).is_err());

    let missing = std::path::Path::new("tests/fixtures/nonexistent.json");
    assert!(FixtureEngine::from_json_file(missing).is_err());
}

#[test]
fn demo_board_feeds_all_three_candidate_pools() {
    let engine = FixtureEngine::demo();
    let lists = CandidateLists::from_board(&engine.prs);
    assert!(!lists.user.is_empty());
    assert!(!lists.repo.is_empty());
    assert!(!lists.title.is_empty());
    // Authors appear once each regardless of how many PRs they own.
    let mut deduped = lists.user.clone();
    deduped.dedup();
    assert_eq!(deduped, lists.user);
}
