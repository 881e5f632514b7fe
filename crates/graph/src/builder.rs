use crate::types::{CategoryGraph, CategoryNode};
use catalog_protocol::{CategoryRecord, ClassificationTag};
use once_cell::sync::OnceCell;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    OnPath,
    Done,
}

impl CategoryGraph {
    /// Index a flat category snapshot.
    ///
    /// Never fails: a record whose parent does not resolve (or points at
    /// itself) becomes a root, a repeated id keeps its first record, and a
    /// parent cycle is cut at its earliest member in input order.
    pub fn build(records: &[CategoryRecord]) -> Self {
        let mut graph: DiGraph<CategoryNode, ()> =
            DiGraph::with_capacity(records.len(), records.len());
        let mut id_index = HashMap::with_capacity(records.len());
        let mut accepted: Vec<&CategoryRecord> = Vec::with_capacity(records.len());

        // Phase 1: one node per distinct id
        for record in records {
            if id_index.contains_key(&record.id) {
                log::warn!(
                    "Duplicate category id {} ({:?}) ignored; keeping first record",
                    record.id,
                    record.name
                );
                continue;
            }
            let idx = graph.add_node(CategoryNode::from_record(record));
            id_index.insert(record.id, idx);
            accepted.push(record);
        }

        // Phase 2: resolve declared parents
        let mut parents: Vec<Option<usize>> = accepted
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let parent_id = record.parent_id?;
                match id_index.get(&parent_id) {
                    Some(p) if p.index() != i => Some(p.index()),
                    Some(_) => {
                        log::debug!("Category {} is its own parent; treated as root", record.id);
                        None
                    }
                    None => {
                        log::debug!(
                            "Category {} references unknown parent {}; treated as root",
                            record.id,
                            parent_id
                        );
                        None
                    }
                }
            })
            .collect();

        // Phase 3: cut parent cycles
        let broken = break_cycles(&mut parents);
        let broken_cycles: Vec<_> = broken.iter().map(|&i| accepted[i].id).collect();
        for id in &broken_cycles {
            log::warn!("Category {id} is part of a parent cycle; promoted to root");
        }

        // Phase 4: edges and ordered adjacency
        let mut children = vec![Vec::new(); accepted.len()];
        let mut roots = Vec::new();
        for (i, parent) in parents.iter().enumerate() {
            let idx = NodeIndex::new(i);
            match *parent {
                Some(p) => {
                    let parent_idx = NodeIndex::new(p);
                    let parent_id = graph[parent_idx].id;
                    graph[idx].parent_id = Some(parent_id);
                    graph.add_edge(parent_idx, idx, ());
                    children[p].push(idx);
                }
                None => roots.push(idx),
            }
        }

        let root_of = resolve_roots(&parents);

        let mut tags: Vec<ClassificationTag> = Vec::new();
        for &root in &roots {
            let tag = &graph[root].classification_tag;
            if tag.is_reserved() {
                log::warn!(
                    "Root category {} has reserved tag {:?}; its subtree is only listed under all",
                    graph[root].id,
                    tag.as_str()
                );
                continue;
            }
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        for (i, &root) in root_of.iter().enumerate() {
            let node = &graph[NodeIndex::new(i)];
            let root_tag = &graph[root].classification_tag;
            if &node.classification_tag != root_tag {
                log::debug!(
                    "Category {} declares tag {:?} but its root {} is {:?}; using the root tag",
                    node.id,
                    node.classification_tag.as_str(),
                    graph[root].id,
                    root_tag.as_str()
                );
            }
        }

        let descendants = (0..accepted.len()).map(|_| OnceCell::new()).collect();

        log::info!(
            "Built category graph: {} nodes, {} roots, {} tags",
            graph.node_count(),
            roots.len(),
            tags.len()
        );

        Self {
            graph,
            id_index,
            children,
            roots,
            root_of,
            descendants,
            tags,
            broken_cycles,
        }
    }

    /// Extend the tag set with configured tags that have no categories yet.
    /// Snapshot order comes first; reserved spellings are skipped.
    #[must_use]
    pub fn with_tags<I>(mut self, configured: I) -> Self
    where
        I: IntoIterator<Item = ClassificationTag>,
    {
        for tag in configured {
            if tag.is_reserved() {
                log::warn!("Configured tag {:?} is reserved; skipped", tag.as_str());
                continue;
            }
            if !self.tags.contains(&tag) {
                log::debug!("Configured tag {:?} has no categories in this snapshot", tag.as_str());
                self.tags.push(tag);
            }
        }
        self
    }
}

/// Walk every parent chain once; when a chain revisits a node on the
/// current path, detach the earliest cycle member from its parent.
/// Returns the detached positions.
fn break_cycles(parents: &mut [Option<usize>]) -> Vec<usize> {
    let mut state = vec![Visit::Pending; parents.len()];
    let mut broken = Vec::new();
    let mut path = Vec::new();

    for start in 0..parents.len() {
        if state[start] == Visit::Done {
            continue;
        }

        path.clear();
        let mut current = start;
        loop {
            match state[current] {
                Visit::Done => break,
                Visit::OnPath => {
                    let entry = path
                        .iter()
                        .position(|&p| p == current)
                        .unwrap_or_default();
                    if let Some(&earliest) = path[entry..].iter().min() {
                        parents[earliest] = None;
                        broken.push(earliest);
                    }
                    break;
                }
                Visit::Pending => {
                    state[current] = Visit::OnPath;
                    path.push(current);
                    match parents[current] {
                        Some(parent) => current = parent,
                        None => break,
                    }
                }
            }
        }

        for &p in &path {
            state[p] = Visit::Done;
        }
    }

    broken.sort_unstable();
    broken
}

/// Root ancestor per position over an acyclic parent table
fn resolve_roots(parents: &[Option<usize>]) -> Vec<NodeIndex> {
    let mut root_of: Vec<Option<usize>> = vec![None; parents.len()];
    let mut chain = Vec::new();

    for start in 0..parents.len() {
        if root_of[start].is_some() {
            continue;
        }

        chain.clear();
        let mut current = start;
        let root = loop {
            if let Some(root) = root_of[current] {
                break root;
            }
            chain.push(current);
            match parents[current] {
                // Bounded by the node count even if the table were cyclic
                Some(parent) if chain.len() <= parents.len() => current = parent,
                _ => break current,
            }
        };

        for &p in &chain {
            root_of[p] = Some(root);
        }
    }

    root_of
        .into_iter()
        .enumerate()
        .map(|(i, root)| NodeIndex::new(root.unwrap_or(i)))
        .collect()
}
