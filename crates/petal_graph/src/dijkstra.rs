use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::FxHashMap;

use crate::{
    constants::{INVALID_EDGE, INVALID_NODE},
    distance::{Distance, Meters},
    road_network::RoadNetwork,
    types::{EdgeId, NodeId},
};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
struct HeapItem {
    node_id: NodeId,
    distance: Distance<Meters>,
}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip distance to make this a min-heap, lowest node id first on ties
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.node_id.cmp(&self.node_id))
    }
}

struct NodeData {
    distance: Distance<Meters>,
    settled: bool,
    parent: NodeId,
    edge_id: EdgeId, // Edge ID from parent to current node
}

/// Single-query Dijkstra over edge length. Each query owns its own state so
/// any number of them can run concurrently against the same network.
pub(crate) struct Dijkstra<'a> {
    network: &'a RoadNetwork,
    heap: BinaryHeap<HeapItem>,
    data: FxHashMap<NodeId, NodeData>,
}

impl<'a> Dijkstra<'a> {
    pub(crate) fn new(network: &'a RoadNetwork) -> Self {
        Dijkstra {
            network,
            heap: BinaryHeap::with_capacity(1024),
            data: FxHashMap::default(),
        }
    }

    fn update_node_data(
        &mut self,
        node: NodeId,
        distance: Distance<Meters>,
        parent: NodeId,
        edge_id: EdgeId,
    ) {
        self.data.insert(
            node,
            NodeData {
                distance,
                settled: false,
                parent,
                edge_id,
            },
        );
    }

    fn is_settled(&self, node: NodeId) -> bool {
        self.data.get(&node).is_some_and(|data| data.settled)
    }

    fn current_shortest_distance(&self, node: NodeId) -> Option<Distance<Meters>> {
        self.data.get(&node).map(|data| data.distance)
    }

    /// Returns the node sequence from `start` to `end` and its length,
    /// or `None` when `end` cannot be reached.
    pub(crate) fn calc_path(
        &mut self,
        start: NodeId,
        end: NodeId,
    ) -> Option<(Vec<NodeId>, Distance<Meters>)> {
        self.heap.push(HeapItem {
            node_id: start,
            distance: Distance::ZERO,
        });
        self.update_node_data(start, Distance::ZERO, INVALID_NODE, INVALID_EDGE);

        while let Some(HeapItem { node_id, distance }) = self.heap.pop() {
            if self.is_settled(node_id) {
                continue;
            }

            if self
                .current_shortest_distance(node_id)
                .is_some_and(|best| distance > best)
            {
                continue;
            }

            if let Some(data) = self.data.get_mut(&node_id) {
                data.settled = true;
            }

            if node_id == end {
                break;
            }

            for &edge_id in self.network.node_edges(node_id) {
                if !self.network.can_traverse(edge_id, node_id) {
                    continue;
                }

                let edge = self.network.edge(edge_id);
                let adj_node = edge.adj_node(node_id);

                if self.is_settled(adj_node) {
                    continue;
                }

                let next_distance = distance + edge.distance();

                let improves = self
                    .current_shortest_distance(adj_node)
                    .is_none_or(|best| next_distance < best);

                if improves {
                    self.update_node_data(adj_node, next_distance, node_id, edge_id);
                    self.heap.push(HeapItem {
                        node_id: adj_node,
                        distance: next_distance,
                    });
                }
            }
        }

        if !self.is_settled(end) {
            return None;
        }

        self.build_path(end)
    }

    fn build_path(&self, end: NodeId) -> Option<(Vec<NodeId>, Distance<Meters>)> {
        let total = self.current_shortest_distance(end)?;
        let mut nodes = Vec::with_capacity(32);

        let mut node = end;
        nodes.push(node);
        while let Some(data) = self.data.get(&node) {
            if data.parent == INVALID_NODE {
                break;
            }
            node = data.parent;
            nodes.push(node);
        }

        nodes.reverse();

        Some((nodes, total))
    }
}
