//! Unweighted shortest-path search over an adjacency map.

use std::collections::{HashMap, VecDeque};

use crate::graph::SystemId;

/// Find a minimum-hop route between `start` and `goal` using breadth-first
/// search. Returns the full step sequence including `start`, or `None` when
/// the goal is unreachable.
pub fn find_route_bfs(
    adjacency: &HashMap<SystemId, Vec<SystemId>>,
    start: SystemId,
    goal: SystemId,
) -> Option<Vec<SystemId>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut parents: HashMap<SystemId, Option<SystemId>> = HashMap::new();
    let mut queue = VecDeque::new();

    parents.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let neighbours = adjacency
            .get(&current)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for &next in neighbours {
            if parents.contains_key(&next) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == goal {
                return Some(reconstruct_path(&parents, start, goal));
            }
            queue.push_back(next);
        }
    }

    None
}

fn reconstruct_path(
    parents: &HashMap<SystemId, Option<SystemId>>,
    start: SystemId,
    goal: SystemId,
) -> Vec<SystemId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}
