use taskdag::errors::TaskdagError;
use taskdag::graph::GraphCache;
use taskdag::store::SqliteStore;
use taskdag::sync;
use taskdag::types::{OwnerId, TaskFields, TaskMap};
use taskdag_test_utils::init_tracing;

const OWNER: OwnerId = 1;
const OTHER_OWNER: OwnerId = 2;

fn open_store(dir: &tempfile::TempDir) -> SqliteStore {
    SqliteStore::open(dir.path().join("tasks.db")).expect("open store")
}

fn fields(title: &str) -> TaskFields {
    TaskFields {
        title: title.to_string(),
        ..TaskFields::default()
    }
}

/// Reload the owner's graph the way a client would: full fetch, then mirror.
fn reload(store: &SqliteStore, owner: OwnerId) -> TaskMap {
    GraphCache::from_tasks(store.find_tasks_by_owner(owner).expect("fetch"))
        .tasks()
        .clone()
}

#[test]
fn create_persists_scalars_and_edges() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let first = sync::create_task(&mut store, OWNER, fields("write draft"), vec![], vec![])
        .expect("create first");
    let second = sync::create_task(
        &mut store,
        OWNER,
        TaskFields {
            title: "send draft".to_string(),
            date: Some("2026-03-01".to_string()),
            time: Some("09:30".to_string()),
            ..TaskFields::default()
        },
        vec![],
        vec![first.id],
    )
    .expect("create second");

    let tasks = reload(&store, OWNER);
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[&first.id].next_task_ids, vec![second.id]);
    assert_eq!(tasks[&second.id].previous_task_ids, vec![first.id]);
    assert_eq!(tasks[&second.id].fields.date.as_deref(), Some("2026-03-01"));
}

#[test]
fn update_replaces_edges_wholesale() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let a = sync::create_task(&mut store, OWNER, fields("a"), vec![], vec![]).unwrap();
    let b = sync::create_task(&mut store, OWNER, fields("b"), vec![], vec![a.id]).unwrap();
    let c = sync::create_task(&mut store, OWNER, fields("c"), vec![], vec![]).unwrap();

    // b stops following a and follows c instead.
    sync::update_task(&mut store, OWNER, b.id, fields("b"), vec![], vec![c.id])
        .expect("update b");

    let tasks = reload(&store, OWNER);
    assert!(tasks[&a.id].next_task_ids.is_empty());
    assert_eq!(tasks[&c.id].next_task_ids, vec![b.id]);
    assert_eq!(tasks[&b.id].previous_task_ids, vec![c.id]);
}

#[test]
fn closing_edge_over_existing_path_is_rejected_and_rolled_back() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let a = sync::create_task(&mut store, OWNER, fields("a"), vec![], vec![]).unwrap();
    let b = sync::create_task(&mut store, OWNER, fields("b"), vec![], vec![a.id]).unwrap();
    let c = sync::create_task(&mut store, OWNER, fields("c"), vec![], vec![b.id]).unwrap();

    let before = reload(&store, OWNER);

    // c already reaches back to a through b; a must not also follow c.
    let err = sync::update_task(
        &mut store,
        OWNER,
        a.id,
        fields("a renamed"),
        vec![b.id],
        vec![c.id],
    )
    .expect_err("cycle must be rejected");
    assert!(matches!(err, TaskdagError::DependencyCycle));

    // Nothing from the aborted transaction survives: not the edges, and not
    // the scalar rename either.
    let after = reload(&store, OWNER);
    assert_eq!(before, after);
    assert_eq!(after[&a.id].fields.title, "a");
}

#[test]
fn jointly_submitted_two_cycle_is_rejected() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let a = sync::create_task(&mut store, OWNER, fields("a"), vec![], vec![]).unwrap();
    let b = sync::create_task(&mut store, OWNER, fields("b"), vec![], vec![]).unwrap();

    // One call submits both directions at once: a→b and b→a.
    let err = sync::update_task(&mut store, OWNER, a.id, fields("a"), vec![b.id], vec![b.id])
        .expect_err("1⇄2 must be rejected");
    assert!(matches!(err, TaskdagError::DependencyCycle));

    let tasks = reload(&store, OWNER);
    assert!(tasks[&a.id].next_task_ids.is_empty());
    assert!(tasks[&b.id].next_task_ids.is_empty());
}

#[test]
fn create_that_closes_a_cycle_leaves_no_row_behind() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let a = sync::create_task(&mut store, OWNER, fields("a"), vec![], vec![]).unwrap();
    let b = sync::create_task(&mut store, OWNER, fields("b"), vec![], vec![a.id]).unwrap();

    // With a→b already stored, a task following b and preceding a closes
    // a→b→new→a.
    let err = sync::create_task(&mut store, OWNER, fields("new"), vec![a.id], vec![b.id])
        .expect_err("cycle through the new task must be rejected");
    assert!(matches!(err, TaskdagError::DependencyCycle));

    let tasks = reload(&store, OWNER);
    assert_eq!(tasks.len(), 2, "aborted create must not persist the task row");
}

#[test]
fn self_loop_is_rejected() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let a = sync::create_task(&mut store, OWNER, fields("a"), vec![], vec![]).unwrap();

    let err = sync::update_task(&mut store, OWNER, a.id, fields("a"), vec![a.id], vec![])
        .expect_err("self-loop must be rejected");
    assert!(matches!(err, TaskdagError::DependencyCycle));
}

#[test]
fn unknown_task_and_foreign_owner_surface_as_not_found() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let mine = sync::create_task(&mut store, OWNER, fields("mine"), vec![], vec![]).unwrap();
    let theirs =
        sync::create_task(&mut store, OTHER_OWNER, fields("theirs"), vec![], vec![]).unwrap();

    let err = sync::update_task(&mut store, OWNER, 999, fields("x"), vec![], vec![])
        .expect_err("unknown id");
    assert!(matches!(err, TaskdagError::TaskNotFound(999)));

    // An edge can never leave the owner's graph, even though the target row
    // exists in the store.
    let err = sync::update_task(
        &mut store,
        OWNER,
        mine.id,
        fields("mine"),
        vec![theirs.id],
        vec![],
    )
    .expect_err("cross-owner edge");
    assert!(matches!(err, TaskdagError::TaskNotFound(id) if id == theirs.id));

    let err = sync::delete_task(&mut store, OWNER, theirs.id).expect_err("foreign delete");
    assert!(matches!(err, TaskdagError::TaskNotFound(id) if id == theirs.id));
}

#[test]
fn delete_cascades_edges_to_surviving_endpoints() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let a = sync::create_task(&mut store, OWNER, fields("a"), vec![], vec![]).unwrap();
    let b = sync::create_task(&mut store, OWNER, fields("b"), vec![], vec![a.id]).unwrap();
    let c = sync::create_task(&mut store, OWNER, fields("c"), vec![], vec![b.id]).unwrap();

    sync::delete_task(&mut store, OWNER, b.id).expect("delete middle task");

    let tasks = reload(&store, OWNER);
    assert_eq!(tasks.len(), 2);
    assert!(tasks[&a.id].next_task_ids.is_empty());
    assert!(tasks[&c.id].previous_task_ids.is_empty());
}

#[test]
fn owners_do_not_see_each_other() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    sync::create_task(&mut store, OWNER, fields("mine"), vec![], vec![]).unwrap();
    sync::create_task(&mut store, OTHER_OWNER, fields("theirs"), vec![], vec![]).unwrap();

    assert_eq!(reload(&store, OWNER).len(), 1);
    assert_eq!(reload(&store, OTHER_OWNER).len(), 1);
}
