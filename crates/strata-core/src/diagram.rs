//! # Diagram Assembly
//!
//! Splices the diagram fragments of the selected layers into one directed
//! graph ending in a single backend node.
//!
//! ## Assembly Order
//!
//! 1. Edge layers, left to right. Node ids get an `edge{index}-` prefix only
//!    when more than one edge layer is present.
//! 2. The buffering fragment, when the buffering layer has one (Kafka). Every
//!    edge-layer terminal connects to its entry node.
//! 3. Active processing layers, each chained from the previous terminal(s).
//! 4. The `backend` node, with `OTLP` edges from the current terminal(s).
//!
//! "Terminal" is a list: it holds one entry per edge layer right after step 1
//! and collapses to a single entry at the first downstream fragment.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::primitives::{BACKEND_EDGE_LABEL, BACKEND_NODE_ID};
use crate::{DiagramEdge, DiagramNode, Layer, NodeKind};

/// A composed directed graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiagramGraph {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

impl DiagramGraph {
    /// Assemble the graph for a selection of layers.
    ///
    /// `processing` must hold active layers only.
    #[must_use]
    pub fn assemble(edge: &[&Layer], buffering: &Layer, processing: &[&Layer]) -> Self {
        let mut builder = GraphBuilder::default();
        let mut terminals: Vec<String> = Vec::new();

        let multiple = edge.len() > 1;
        for (idx, layer) in edge.iter().enumerate() {
            let prefix = multiple.then(|| format!("edge{}", idx));
            let scoped = |id: &str| match &prefix {
                Some(p) => format!("{}-{}", p, id),
                None => id.to_string(),
            };

            for node in &layer.diagram_nodes {
                builder.add_node(node, scoped(&node.id));
            }
            for e in &layer.diagram_edges {
                builder.add_edge(scoped(&e.from), scoped(&e.to), e.label.clone());
            }
            if let Some(last) = layer.terminal_node() {
                terminals.push(scoped(&last.id));
            }
        }

        // Buffering sits between edge and processing when it has a fragment.
        builder.splice(buffering, &mut terminals);

        for layer in processing {
            builder.splice(layer, &mut terminals);
        }

        let backend = DiagramNode::new(BACKEND_NODE_ID, NodeKind::Backend, "Backend");
        builder.add_node(&backend, backend.id.clone());
        for from in terminals {
            builder.add_edge(
                from,
                BACKEND_NODE_ID.to_string(),
                Some(BACKEND_EDGE_LABEL.to_string()),
            );
        }

        builder.graph
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All nodes of one kind, in insertion order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &DiagramNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Direct successors of a node, in edge order.
    pub fn successors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> {
        self.edges
            .iter()
            .filter(move |e| e.from == id)
            .map(|e| e.to.as_str())
    }

    /// Check if a directed path leads from `from` to `to`.
    #[must_use]
    pub fn reaches(&self, from: &str, to: &str) -> bool {
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(from);
        visited.insert(from);

        while let Some(current) = queue.pop_front() {
            if current == to {
                return true;
            }
            for next in self.successors(current) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Nodes with no incoming edge.
    pub fn sources(&self) -> impl Iterator<Item = &DiagramNode> {
        self.nodes
            .iter()
            .filter(|n| !self.edges.iter().any(|e| e.to == n.id))
    }
}

#[derive(Default)]
struct GraphBuilder {
    graph: DiagramGraph,
    added: BTreeSet<String>,
}

impl GraphBuilder {
    /// First insertion of an id wins.
    fn add_node(&mut self, node: &DiagramNode, id: String) {
        if self.added.insert(id.clone()) {
            self.graph.nodes.push(DiagramNode {
                id,
                kind: node.kind,
                label: node.label.clone(),
            });
        }
    }

    fn add_edge(&mut self, from: String, to: String, label: Option<String>) {
        self.graph.edges.push(DiagramEdge { from, to, label });
    }

    /// Append an unprefixed fragment and chain it from the current terminals.
    ///
    /// Layers without diagram nodes leave the graph and terminals untouched.
    fn splice(&mut self, layer: &Layer, terminals: &mut Vec<String>) {
        let (Some(entry), Some(last)) = (layer.entry_node(), layer.terminal_node()) else {
            return;
        };

        for node in &layer.diagram_nodes {
            self.add_node(node, node.id.clone());
        }
        for e in &layer.diagram_edges {
            self.add_edge(e.from.clone(), e.to.clone(), e.label.clone());
        }
        for from in terminals.drain(..) {
            self.add_edge(from, entry.id.clone(), None);
        }
        terminals.push(last.id.clone());
    }
}

// =============================================================================
// TESTS
// =============================================================================
