// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use campusnav::graph::GraphStore;
use campusnav::pathfinder::shortest_path;
use campusnav::types::MapData;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(map) = serde_json::from_slice::<MapData>(data) else {
        return;
    };
    let first = map.nodes.first().map(|n| n.id.clone());
    let last = map.nodes.last().map(|n| n.id.clone());

    if let Ok(graph) = GraphStore::build(map.nodes, map.edges) {
        if let (Some(a), Some(b)) = (first, last) {
            let route = shortest_path(&graph, &a, &b);
            assert_eq!(route.is_reachable(), route.cost.is_finite());
        }
    }
});
