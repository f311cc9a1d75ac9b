// Dijkstra shortest-path search over the navigation graph.
//
// Uses a `BinaryHeap` as a min-heap via reversed ordering. Best-known costs,
// predecessors and the closed set live in `Vec`s indexed by `NavNodeId`.
// The search stops as soon as the goal is popped, which is sound because
// every edge weight is non-negative.
//
// No heuristic: a floor change costs a flat `floor_change_cost` that has no
// relation to pixel distance, so straight-line distance to the goal would
// not be a safe lower bound across floors.
//
// See also: `nav.rs` for the `NavGraph` being searched, `route.rs` for what
// happens to the node path afterwards.
//
// **Critical constraint: determinism.** Frontier entries with equal cost pop
// in lexicographic order of node label, and a node's predecessor is only
// replaced on a strictly lower cost. Together these make the chosen path a
// pure function of the graph, independent of platform or heap internals.

use crate::nav::NavGraph;
use crate::types::NavNodeId;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// The result of a successful search.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    /// Sequence of node IDs from start to goal (inclusive).
    pub nodes: Vec<NavNodeId>,
    /// Total traversal cost.
    pub total_cost: f64,
}

/// Entry in the frontier (min-heap via reversed ordering).
struct OpenEntry<'g> {
    node: NavNodeId,
    cost: f64,
    label: &'g str,
}

impl PartialEq for OpenEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry<'_> {}

impl PartialOrd for OpenEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest (cost, label) is "greatest".
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.label.cmp(self.label))
    }
}

/// Find the cheapest path from `start` to `goal`.
///
/// `start == goal` yields the single-node path `[start]` at cost 0. Returns
/// `None` if the goal is unreachable; callers treat that as "no route".
pub fn dijkstra(graph: &NavGraph, start: NavNodeId, goal: NavNodeId) -> Option<PathResult> {
    if start == goal {
        return Some(PathResult {
            nodes: vec![start],
            total_cost: 0.0,
        });
    }

    let n = graph.node_count();
    let mut best = vec![f64::INFINITY; n];
    let mut came_from: Vec<Option<NavNodeId>> = vec![None; n];
    let mut closed = vec![false; n];

    best[start.0 as usize] = 0.0;

    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        node: start,
        cost: 0.0,
        label: &graph.node(start).label,
    });

    let mut popped = 0usize;
    while let Some(current) = open.pop() {
        let ci = current.node.0 as usize;

        if current.node == goal {
            debug!(popped, cost = current.cost, "goal reached");
            return Some(reconstruct_path(&came_from, start, goal, best[ci]));
        }

        if closed[ci] {
            continue;
        }
        closed[ci] = true;
        popped += 1;

        for &edge_idx in graph.neighbors(current.node) {
            let edge = graph.edge(edge_idx);
            let ni = edge.to.0 as usize;

            if closed[ni] {
                continue;
            }

            let tentative = best[ci] + edge.cost;
            if tentative < best[ni] {
                best[ni] = tentative;
                came_from[ni] = Some(current.node);
                open.push(OpenEntry {
                    node: edge.to,
                    cost: tentative,
                    label: &graph.node(edge.to).label,
                });
            }
        }
    }

    trace!(
        start = %graph.node(start).label,
        goal = %graph.node(goal).label,
        "goal unreachable"
    );
    None
}

/// Reconstruct the path from predecessor links, walking back from the goal.
fn reconstruct_path(
    came_from: &[Option<NavNodeId>],
    start: NavNodeId,
    goal: NavNodeId,
    total_cost: f64,
) -> PathResult {
    let mut nodes = vec![goal];
    let mut current = goal;

    while current != start {
        match came_from[current.0 as usize] {
            Some(prev) => {
                nodes.push(prev);
                current = prev;
            }
            None => break,
        }
    }

    nodes.reverse();
    PathResult { nodes, total_cost }
}

/// Sum of edge weights along a node sequence, taking the cheapest edge
/// between each consecutive pair. Returns `None` if two consecutive nodes
/// are not adjacent.
pub fn path_cost(graph: &NavGraph, nodes: &[NavNodeId]) -> Option<f64> {
    nodes.windows(2).try_fold(0.0, |acc, pair| {
        graph
            .neighbors(pair[0])
            .iter()
            .map(|&idx| graph.edge(idx))
            .filter(|e| e.to == pair[1])
            .map(|e| e.cost)
            .min_by(f64::total_cmp)
            .map(|c| acc + c)
    })
}
