//! Search cores over implicit graphs. Both cores take the start node, a
//! successor closure yielding `(node, step cost, action)` triples and a
//! success predicate, and return whether the goal was dequeued together
//! with the [SearchRecord] accumulated along the way.

use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::hash::Hash;

/// How a node was reached: the accumulated cost, the node it was reached
/// from and the action that made the step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch<N, C, A> {
    pub cost: C,
    pub parent: N,
    pub action: A,
}

/// Parent-and-cost map recorded during a search, keyed by node. The start
/// node has no entry. Read-only once the search returns.
#[derive(Clone, Debug)]
pub struct SearchRecord<N, C, A> {
    entries: FxIndexMap<N, Branch<N, C, A>>,
}

impl<N, C, A> SearchRecord<N, C, A>
where
    N: Eq + Hash + Copy,
    C: Zero + Copy,
    A: Copy,
{
    fn new() -> SearchRecord<N, C, A> {
        SearchRecord {
            entries: FxIndexMap::default(),
        }
    }

    pub fn get(&self, node: &N) -> Option<&Branch<N, C, A>> {
        self.entries.get(node)
    }

    pub fn contains(&self, node: &N) -> bool {
        self.entries.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visited nodes and their branches, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &Branch<N, C, A>)> {
        self.entries.iter()
    }

    /// Walks the record backward from `goal` and returns the start-to-goal
    /// action sequence with its total cost. An absent goal (not reached)
    /// and `start == goal` both yield an empty sequence at zero cost.
    pub fn reconstruct(&self, start: N, goal: N) -> (Vec<A>, C) {
        if start == goal {
            return (Vec::new(), C::zero());
        }
        let Some(goal_branch) = self.entries.get(&goal) else {
            return (Vec::new(), C::zero());
        };
        let total = goal_branch.cost;
        let mut actions: Vec<A> = itertools::unfold(goal, |node| {
            (*node != start).then(|| {
                let branch = &self.entries[&*node];
                *node = branch.parent;
                branch.action
            })
        })
        .collect();
        actions.reverse();
        (actions, total)
    }
}

/// Explores the graph from `start` in FIFO order, marking nodes visited at
/// the moment they are enqueued. Terminates successfully when `success`
/// holds for a dequeued node, or unsuccessfully once the frontier drains.
///
/// Each node's branch carries the cost accumulated along its
/// first-discovered path. That cost is minimal only when all step costs
/// are equal; with mixed costs a dearer path found in fewer hops wins.
pub fn breadth_first<N, C, A, FN, IN, FS>(
    start: N,
    mut successors: FN,
    mut success: FS,
) -> (bool, SearchRecord<N, C, A>)
where
    N: Eq + Hash + Copy,
    C: Zero + Copy,
    A: Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C, A)>,
    FS: FnMut(&N) -> bool,
{
    let mut frontier: VecDeque<(N, C)> = VecDeque::new();
    frontier.push_back((start, C::zero()));
    let mut visited: FxHashSet<N> = FxHashSet::default();
    visited.insert(start);
    let mut record = SearchRecord::new();
    while let Some((node, cost)) = frontier.pop_front() {
        if success(&node) {
            return (true, record);
        }
        for (next, step, action) in successors(&node) {
            if visited.insert(next) {
                let next_cost = cost + step;
                record.entries.insert(
                    next,
                    Branch {
                        cost: next_cost,
                        parent: node,
                        action,
                    },
                );
                frontier.push_back((next, next_cost));
            }
        }
    }
    (false, record)
}

struct FrontierNode<N, C> {
    cost: C,
    node: N,
}

impl<N, C: PartialEq> PartialEq for FrontierNode<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost)
    }
}

impl<N, C: PartialEq> Eq for FrontierNode<N, C> {}

impl<N, C: Ord> PartialOrd for FrontierNode<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, C: Ord> Ord for FrontierNode<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest accumulated cost.
        other.cost.cmp(&self.cost)
    }
}

/// Cost-ordered variant: a [BinaryHeap] frontier expanded by smallest
/// accumulated cost, with nodes re-inserted whenever a cheaper path to
/// them turns up. Branches report true minimum costs.
pub fn uniform_cost<N, C, A, FN, IN, FS>(
    start: N,
    mut successors: FN,
    mut success: FS,
) -> (bool, SearchRecord<N, C, A>)
where
    N: Eq + Hash + Copy,
    C: Zero + Ord + Copy,
    A: Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C, A)>,
    FS: FnMut(&N) -> bool,
{
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierNode {
        cost: C::zero(),
        node: start,
    });
    let mut best: FxIndexMap<N, C> = FxIndexMap::default();
    best.insert(start, C::zero());
    let mut record = SearchRecord::new();
    while let Some(FrontierNode { cost, node }) = frontier.pop() {
        if success(&node) {
            return (true, record);
        }
        // A node may sit in the heap several times if cheaper ways to it
        // were found after it was pushed; only its cheapest entry expands.
        if best.get(&node).is_some_and(|&c| cost > c) {
            continue;
        }
        for (next, step, action) in successors(&node) {
            let next_cost = cost + step;
            match best.entry(next) {
                Vacant(e) => {
                    e.insert(next_cost);
                }
                Occupied(mut e) => {
                    if *e.get() <= next_cost {
                        continue;
                    }
                    e.insert(next_cost);
                }
            }
            record.entries.insert(
                next,
                Branch {
                    cost: next_cost,
                    parent: node,
                    action,
                },
            );
            frontier.push(FrontierNode {
                cost: next_cost,
                node: next,
            });
        }
    }
    (false, record)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 --10/a--> 1 --1/c--> 3
    // 0 --1/b---> 2 --1/d--> 1
    fn successors(node: &u32) -> Vec<(u32, i32, char)> {
        match node {
            0 => vec![(1, 10, 'a'), (2, 1, 'b')],
            1 => vec![(3, 1, 'c')],
            2 => vec![(1, 1, 'd')],
            _ => vec![],
        }
    }

    #[test]
    fn fifo_keeps_first_discovery() {
        let (found, record) = breadth_first(0, successors, |node| *node == 3);
        assert!(found);
        // Node 1 was enqueued via the dear direct edge before the cheap
        // two-step path could reach it.
        let (actions, cost) = record.reconstruct(0, 3);
        assert_eq!(actions, vec!['a', 'c']);
        assert_eq!(cost, 11);
    }

    #[test]
    fn cost_ordered_finds_minimum() {
        let (found, record) = uniform_cost(0, successors, |node| *node == 3);
        assert!(found);
        let (actions, cost) = record.reconstruct(0, 3);
        assert_eq!(actions, vec!['b', 'd', 'c']);
        assert_eq!(cost, 3);
    }

    #[test]
    fn exhaustion_reports_not_found() {
        let (found, record) = breadth_first(0, successors, |node| *node == 9);
        assert!(!found);
        assert_eq!(record.len(), 3);
        assert_eq!(record.reconstruct(0, 9), (vec![], 0));
    }

    #[test]
    fn equal_start_and_goal_reconstructs_empty() {
        let (found, record) = breadth_first(0, successors, |node| *node == 0);
        assert!(found);
        assert!(record.is_empty());
        assert_eq!(record.reconstruct(0, 0), (vec![], 0));
    }
}
