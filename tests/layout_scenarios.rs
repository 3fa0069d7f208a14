use std::collections::HashMap;

use taskdag::graph::{root_ids, task_levels};
use taskdag::types::{TaskId, TaskMap};
use taskdag_test_utils::builders::graph;
use taskdag_test_utils::init_tracing;

const OWNER: i64 = 1;

fn level_of(levels: &[Vec<TaskId>]) -> HashMap<TaskId, usize> {
    let mut map = HashMap::new();
    for (depth, ids) in levels.iter().enumerate() {
        for &id in ids {
            map.insert(id, depth);
        }
    }
    map
}

#[test]
fn chain_layers_one_per_level() {
    init_tracing();
    let tasks = graph(OWNER, &[1, 2, 3], &[(1, 2), (2, 3)]);
    assert_eq!(task_levels(&tasks), vec![vec![1], vec![2], vec![3]]);
}

#[test]
fn roots_are_level_zero() {
    init_tracing();
    let tasks = graph(OWNER, &[1, 2, 3, 4], &[(1, 3), (2, 3)]);

    let mut roots = root_ids(&tasks);
    roots.sort_unstable();
    assert_eq!(roots, vec![1, 2, 4]);

    let levels = task_levels(&tasks);
    assert_eq!(levels[0], vec![1, 2, 4]);
}

#[test]
fn longest_path_wins_over_shortest() {
    init_tracing();
    // 1→4 directly, but also 1→2→3→4; 4 must sit at depth 3 so that the
    // direct edge still points strictly downward.
    let tasks = graph(OWNER, &[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4), (1, 4)]);
    let levels = task_levels(&tasks);
    assert_eq!(levels, vec![vec![1], vec![2], vec![3], vec![4]]);
}

#[test]
fn every_edge_descends() {
    init_tracing();
    let tasks = graph(
        OWNER,
        &[1, 2, 3, 4, 5, 6],
        &[(1, 2), (1, 3), (2, 4), (3, 4), (4, 5), (2, 6), (6, 5)],
    );
    let by_id = level_of(&task_levels(&tasks));

    for task in tasks.values() {
        for next in &task.next_task_ids {
            assert!(
                by_id[next] > by_id[&task.id],
                "edge {}→{} does not descend",
                task.id,
                next
            );
        }
    }
}

#[test]
fn layers_sorted_by_ascending_id() {
    init_tracing();
    let tasks = graph(OWNER, &[5, 3, 9, 1], &[(1, 5), (1, 3), (1, 9)]);
    let levels = task_levels(&tasks);
    assert_eq!(levels, vec![vec![1], vec![3, 5, 9]]);
}

#[test]
fn every_task_appears_exactly_once() {
    init_tracing();
    let tasks = graph(OWNER, &[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);
    let levels = task_levels(&tasks);

    let mut seen: Vec<TaskId> = levels.into_iter().flatten().collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2, 3, 4]);
}

#[test]
fn single_task_graph() {
    init_tracing();
    let tasks: TaskMap = graph(OWNER, &[7], &[]);
    assert_eq!(task_levels(&tasks), vec![vec![7]]);
}
