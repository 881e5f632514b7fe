use crate::types::{CategoryGraph, CategoryNode};
use catalog_protocol::{CategoryId, ClassificationTag};
use once_cell::sync::Lazy;
use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;
use petgraph::Direction;
use std::collections::HashSet;

static NO_DESCENDANTS: Lazy<HashSet<CategoryId>> = Lazy::new(HashSet::new);

impl CategoryGraph {
    /// Children of a node in input order; `None` yields the forest roots
    pub fn children_of(&self, id: Option<CategoryId>) -> Vec<&CategoryNode> {
        let indices = match id {
            None => &self.roots,
            Some(id) => match self.index_of(id) {
                Some(idx) => &self.children[idx.index()],
                None => return Vec::new(),
            },
        };
        indices.iter().map(|&idx| self.weight(idx)).collect()
    }

    /// Chain from the root down to `id`, inclusive. Empty for unknown ids.
    ///
    /// The walk stops after `len()` steps, so a corrupt parent chain yields a
    /// truncated path instead of looping.
    pub fn ancestors_of(&self, id: CategoryId) -> Vec<&CategoryNode> {
        let Some(mut current) = self.index_of(id) else {
            return Vec::new();
        };

        let mut chain = vec![self.weight(current)];
        for _ in 0..self.len() {
            let Some(parent) = self.parent_index(current) else {
                break;
            };
            current = parent;
            chain.push(self.weight(current));
        }

        chain.reverse();
        chain
    }

    /// Every id strictly below `id`. Computed on first request, then cached
    /// for the lifetime of the snapshot.
    pub fn descendants_of(&self, id: CategoryId) -> &HashSet<CategoryId> {
        let Some(idx) = self.index_of(id) else {
            return &NO_DESCENDANTS;
        };

        self.descendants[idx.index()].get_or_init(|| {
            let mut found = HashSet::new();
            let mut dfs = Dfs::new(&self.graph, idx);
            while let Some(next) = dfs.next(&self.graph) {
                if next != idx {
                    found.insert(self.weight(next).id);
                }
            }
            found
        })
    }

    /// `id` itself or one of its descendants
    pub fn is_within(&self, candidate: CategoryId, ancestor: CategoryId) -> bool {
        (candidate == ancestor && self.contains(ancestor))
            || self.descendants_of(ancestor).contains(&candidate)
    }

    /// Roots carrying `tag`, in input order
    pub fn roots_for_tag(&self, tag: &ClassificationTag) -> Vec<&CategoryNode> {
        self.roots
            .iter()
            .map(|&idx| self.weight(idx))
            .filter(|node| &node.classification_tag == tag)
            .collect()
    }

    pub fn parent_of(&self, id: CategoryId) -> Option<&CategoryNode> {
        let idx = self.index_of(id)?;
        self.parent_index(idx).map(|parent| self.weight(parent))
    }

    /// Root ancestor of `id` (the node itself for roots)
    pub fn root_of(&self, id: CategoryId) -> Option<&CategoryNode> {
        let idx = self.index_of(id)?;
        Some(self.weight(self.root_of[idx.index()]))
    }

    /// Effective classification of `id`: the tag of its root
    pub fn tag_of(&self, id: CategoryId) -> Option<&ClassificationTag> {
        self.root_of(id).map(|root| &root.classification_tag)
    }

    /// Number of edges between the root and `id` (roots are at depth 0)
    pub fn depth(&self, id: CategoryId) -> Option<usize> {
        let chain = self.ancestors_of(id);
        chain.len().checked_sub(1)
    }

    pub fn is_leaf(&self, id: CategoryId) -> bool {
        self.index_of(id)
            .is_some_and(|idx| self.children[idx.index()].is_empty())
    }

    fn parent_index(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph.neighbors_directed(idx, Direction::Incoming).next()
    }
}
