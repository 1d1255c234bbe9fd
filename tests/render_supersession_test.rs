mod common;

use common::{fixed_clock, memory_persistence, TestEnvironment};
use pretty_assertions::assert_eq;
use sitelog::core::photo::PhotoRef;
use sitelog::report::Renderer;
use sitelog::ReportStore;

async fn report_with_photo(persistence: &sitelog::Persistence) -> ReportStore {
    assert!(persistence.put_blob("blob-1", b"jpeg-bytes".to_vec(), 1).await);
    let mut report = ReportStore::new();
    report.upsert_tasks("YAMATO", "Unit2", ["Pour slab"]);
    report.append_photo("YAMATO", "Unit2", PhotoRef::stored("blob-1", 1));
    report
}

#[tokio::test]
async fn test_newer_render_supersedes_blocked_one() {
    let env = TestEnvironment::new();
    let (backend, persistence) = memory_persistence(&env, fixed_clock(3, 7));
    let report = report_with_photo(&persistence).await;
    let renderer = Renderer::new(persistence.clone(), vec![]);

    let release = backend.hold_next_blob();
    let first = renderer.render_all(&report);

    let second = async {
        // Let the first render reach the held photo lookup
        tokio::task::yield_now().await;
        let second = renderer.render_all(&report);
        release.send(()).unwrap();
        second.await
    };

    let (first_published, second_published) = tokio::join!(first, second);

    assert!(!first_published);
    assert!(second_published);
    assert_eq!(renderer.board().generation(), 2);

    let reports = renderer.board().reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].contractor, "YAMATO");
    assert_eq!(reports[0].photos.len(), 1);
}

#[tokio::test]
async fn test_sequential_renders_each_publish() {
    let env = TestEnvironment::new();
    let (_backend, persistence) = memory_persistence(&env, fixed_clock(3, 7));
    let report = report_with_photo(&persistence).await;
    let renderer = Renderer::new(persistence.clone(), vec![]);

    assert!(renderer.render_all(&report).await);
    assert_eq!(renderer.board().generation(), 1);
    assert!(renderer.render_all(&report).await);
    assert_eq!(renderer.board().generation(), 2);
}

#[tokio::test]
async fn test_superseded_render_keeps_previous_board() {
    let env = TestEnvironment::new();
    let (backend, persistence) = memory_persistence(&env, fixed_clock(3, 7));
    let report = report_with_photo(&persistence).await;
    let renderer = Renderer::new(persistence.clone(), vec![]);

    assert!(renderer.render_all(&report).await);
    let before = renderer.board().reports();

    // Start a render and supersede it before it is ever polled
    let release = backend.hold_next_blob();
    let stale = renderer.render_all(&report);
    let _fresh = renderer.render_all(&report);
    drop(release);

    assert!(!stale.await);
    assert_eq!(renderer.board().generation(), 1);
    assert_eq!(renderer.board().reports().len(), before.len());
}
