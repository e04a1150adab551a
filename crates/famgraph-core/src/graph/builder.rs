use super::{
    DiagramKind, Edge, GraphDescription, LayoutEngine, Legend, Node, RankGroup,
};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// Append-only arena for one build.
///
/// Node ids are unique: re-adding an id keeps the first node. Edges keep insertion order and may
/// repeat (the description is a multigraph).
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    kind: DiagramKind,
    engine: LayoutEngine,
    title: Option<String>,
    attributes: IndexMap<String, String>,
    nodes: Vec<Node>,
    node_index: FxHashMap<String, usize>,
    edges: Vec<Edge>,
    rank_groups: Vec<RankGroup>,
    legend: Option<Legend>,
}

impl GraphBuilder {
    pub fn new(kind: DiagramKind, engine: LayoutEngine) -> Self {
        Self {
            kind,
            engine,
            title: None,
            attributes: IndexMap::new(),
            nodes: Vec::new(),
            node_index: FxHashMap::default(),
            edges: Vec::new(),
            rank_groups: Vec::new(),
            legend: None,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Returns the arena index of the node with this id.
    pub fn add_node(&mut self, node: Node) -> usize {
        if let Some(&idx) = self.node_index.get(&node.id) {
            tracing::debug!(id = %node.id, "duplicate node id; keeping the first definition");
            return idx;
        }
        let idx = self.nodes.len();
        self.node_index.insert(node.id.clone(), idx);
        self.nodes.push(node);
        idx
    }

    /// Adds an edge. Both endpoints must already exist; dangling edges are dropped.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if !self.has_node(&edge.from) || !self.has_node(&edge.to) {
            tracing::warn!(from = %edge.from, to = %edge.to, "dropping edge with unknown endpoint");
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn add_rank_group(&mut self, rank: u8, nodes: Vec<String>) {
        if !nodes.is_empty() {
            self.rank_groups.push(RankGroup { rank, nodes });
        }
    }

    pub fn set_legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }

    pub fn finish(self) -> GraphDescription {
        GraphDescription {
            kind: self.kind,
            engine: self.engine,
            title: self.title,
            attributes: self.attributes,
            nodes: self.nodes,
            edges: self.edges,
            rank_groups: self.rank_groups,
            legend: self.legend,
        }
    }
}
