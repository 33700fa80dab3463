// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use arbitrary::Arbitrary;
use campusnav::graph::GraphStore;
use campusnav::pathfinder::shortest_path;
use campusnav::types::{EdgeRecord, NodeRecord};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    coords: Vec<(i16, i16)>,
    edges: Vec<(u8, u8, Option<u16>)>,
    start: u8,
    end: u8,
}

fuzz_target!(|input: Input| {
    if input.coords.is_empty() {
        return;
    }
    let n = input.coords.len();
    let id = |i: u8| format!("N{}", usize::from(i) % n);

    let nodes = input
        .coords
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| NodeRecord::new(format!("N{i}"), f64::from(x), f64::from(y)));
    let edges = input.edges.iter().map(|&(a, b, len)| match len {
        Some(len) => EdgeRecord::with_length(id(a), id(b), f64::from(len)),
        None => EdgeRecord::new(id(a), id(b)),
    });

    let graph = GraphStore::build(nodes, edges).expect("non-empty finite nodes always build");
    let forward = shortest_path(&graph, &id(input.start), &id(input.end));
    let backward = shortest_path(&graph, &id(input.end), &id(input.start));

    assert_eq!(forward.is_reachable(), backward.is_reachable());
    if forward.is_reachable() {
        assert!((forward.cost - backward.cost).abs() <= 1e-6 * forward.cost.max(1.0));
    }
});
