// Property tests over randomly generated object graphs

use super::{Collector, ObjectId};
use proptest::prelude::*;
use std::collections::{BTreeSet, VecDeque};

#[derive(Debug, Clone)]
struct Graph {
    nodes: usize,
    edges: Vec<(usize, usize)>,
    roots: Vec<usize>,
}

fn graph_strategy() -> impl Strategy<Value = Graph> {
    (1usize..40).prop_flat_map(|nodes| {
        (
            Just(nodes),
            prop::collection::vec((0..nodes, 0..nodes), 0..nodes * 3),
            prop::collection::vec(0..nodes, 0..4),
        )
            .prop_map(|(nodes, edges, roots)| Graph {
                nodes,
                edges,
                roots,
            })
    })
}

/// Breadth-first closure over plain indices, independent of the collector
fn reachable(graph: &Graph) -> BTreeSet<usize> {
    let mut seen: BTreeSet<usize> = graph.roots.iter().copied().collect();
    let mut queue: VecDeque<usize> = seen.iter().copied().collect();
    while let Some(node) = queue.pop_front() {
        for &(from, to) in &graph.edges {
            if from == node && seen.insert(to) {
                queue.push_back(to);
            }
        }
    }
    seen
}

fn build(graph: &Graph) -> (Collector<usize>, Vec<ObjectId>) {
    let mut gc = Collector::new();
    let ids: Vec<ObjectId> = (0..graph.nodes)
        .map(|i| gc.allocate(format!("n{}", i), i))
        .collect();
    for &(from, to) in &graph.edges {
        gc.add_reference(ids[from], ids[to]).unwrap();
    }
    for &root in &graph.roots {
        gc.add_root(ids[root]).unwrap();
    }
    (gc, ids)
}

#[derive(Debug, Clone)]
enum Op {
    Allocate,
    Reference(usize, usize),
    Unreference(usize, usize),
    Root(usize),
    Unroot(usize),
    Collect,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Allocate),
        3 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Reference(a, b)),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Unreference(a, b)),
        2 => any::<usize>().prop_map(Op::Root),
        1 => any::<usize>().prop_map(Op::Unroot),
        1 => Just(Op::Collect),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn collects_exactly_the_unreachable(graph in graph_strategy()) {
        let (mut gc, ids) = build(&graph);
        let expected = reachable(&graph);

        let stats = gc.collect().unwrap();
        prop_assert_eq!(stats.marked, expected.len());
        prop_assert_eq!(stats.collected_this_cycle, graph.nodes - expected.len());

        for (index, id) in ids.iter().enumerate() {
            prop_assert_eq!(gc.contains(*id), expected.contains(&index));
            prop_assert_eq!(gc.is_collected(*id), !expected.contains(&index));
        }

        let again = gc.collect().unwrap();
        prop_assert_eq!(again.collected_this_cycle, 0);
        prop_assert_eq!(again.remaining_live, expected.len());
    }

    #[test]
    fn stats_are_conserved_across_cycles(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let mut gc: Collector<()> = Collector::new();
        let mut live: Vec<ObjectId> = Vec::new();
        let mut allocated_since = 0usize;
        let mut remaining_before = 0usize;
        let mut seen_ids = BTreeSet::new();

        for op in ops {
            match op {
                Op::Allocate => {
                    let id = gc.allocate("obj", ());
                    prop_assert!(seen_ids.insert(id));
                    live.push(id);
                    allocated_since += 1;
                }
                Op::Reference(a, b) if !live.is_empty() => {
                    let (from, to) = (live[a % live.len()], live[b % live.len()]);
                    gc.add_reference(from, to).unwrap();
                }
                Op::Unreference(a, b) if !live.is_empty() => {
                    let (from, to) = (live[a % live.len()], live[b % live.len()]);
                    gc.remove_reference(from, to).unwrap();
                }
                Op::Root(a) if !live.is_empty() => {
                    gc.add_root(live[a % live.len()]).unwrap();
                }
                Op::Unroot(a) if !live.is_empty() => {
                    gc.remove_root(live[a % live.len()]);
                }
                Op::Collect => {
                    let stats = gc.collect().unwrap();
                    prop_assert_eq!(
                        stats.remaining_live,
                        remaining_before + allocated_since - stats.collected_this_cycle
                    );
                    live.retain(|id| gc.contains(*id));
                    prop_assert_eq!(live.len(), stats.remaining_live);
                    remaining_before = stats.remaining_live;
                    allocated_since = 0;
                }
                _ => {}
            }
        }

        let history = gc.collection_history();
        for (index, stats) in history.iter().enumerate() {
            prop_assert_eq!(stats.cycle_number, index as u64 + 1);
        }
        let total: u64 = history.iter().map(|s| s.collected_this_cycle as u64).sum();
        prop_assert_eq!(gc.get_stats().total_collected, total);
    }
}
