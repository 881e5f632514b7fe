use catalog_protocol::{CategoryId, CategoryRecord, ClassificationTag};
use once_cell::sync::OnceCell;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Category as indexed by the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: CategoryId,

    /// Resolved parent. `None` for roots, including nodes whose declared
    /// parent was unknown or had to be cut to break a cycle.
    pub parent_id: Option<CategoryId>,

    pub name: String,

    /// Tag as declared on the record. Classification uses the root's tag.
    pub classification_tag: ClassificationTag,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_count: Option<u64>,
}

impl CategoryNode {
    pub(crate) fn from_record(record: &CategoryRecord) -> Self {
        Self {
            id: record.id,
            parent_id: None,
            name: record.name.clone(),
            classification_tag: record.classification_tag.clone(),
            content_count: record.content_count,
        }
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Immutable category forest built from one snapshot
pub struct CategoryGraph {
    /// Directed forest (parent -> child)
    pub(crate) graph: DiGraph<CategoryNode, ()>,

    /// Category id -> NodeIndex mapping
    pub(crate) id_index: HashMap<CategoryId, NodeIndex>,

    /// Ordered children per node, in input order
    pub(crate) children: Vec<Vec<NodeIndex>>,

    /// Forest roots in input order
    pub(crate) roots: Vec<NodeIndex>,

    /// Root ancestor per node
    pub(crate) root_of: Vec<NodeIndex>,

    /// Lazily computed descendant sets, one slot per node
    pub(crate) descendants: Vec<OnceCell<HashSet<CategoryId>>>,

    /// Distinct root tags, first seen first
    pub(crate) tags: Vec<ClassificationTag>,

    /// Nodes promoted to roots because their parent chain looped
    pub(crate) broken_cycles: Vec<CategoryId>,
}

impl CategoryGraph {
    /// Find node index by category id
    pub(crate) fn index_of(&self, id: CategoryId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub(crate) fn weight(&self, idx: NodeIndex) -> &CategoryNode {
        &self.graph[idx]
    }

    /// Get node data
    pub fn node(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.index_of(id).map(|idx| self.weight(idx))
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// All nodes in input order
    pub fn nodes(&self) -> impl Iterator<Item = &CategoryNode> {
        self.graph.node_indices().map(move |idx| self.weight(idx))
    }

    /// Closed tag set: distinct root tags, then any configured extras
    pub fn tags(&self) -> &[ClassificationTag] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &ClassificationTag) -> bool {
        self.tags.contains(tag)
    }

    /// Ids that were cut loose from a parent cycle during build
    pub fn broken_cycles(&self) -> &[CategoryId] {
        &self.broken_cycles
    }

    /// Get node count
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for CategoryGraph {
    fn default() -> Self {
        Self::build(&[])
    }
}

impl std::fmt::Debug for CategoryGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryGraph")
            .field("nodes", &self.len())
            .field("roots", &self.roots.len())
            .field("tags", &self.tags)
            .field("broken_cycles", &self.broken_cycles)
            .finish()
    }
}
