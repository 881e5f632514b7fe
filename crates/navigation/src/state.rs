use crate::labels::TagCatalog;
use catalog_graph::{CategoryGraph, CategoryNode};
use catalog_protocol::{ActiveTag, CategoryId, ClassificationTag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Browsing position of one session
///
/// Every transition is total: input that does not fit the current graph
/// leaves the state untouched and returns `false`. Transitions take the
/// graph by reference; the state itself only stores ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    active_tag: ActiveTag,
    selected_category_id: Option<CategoryId>,
    search_term: String,
    expanded_ids: BTreeSet<CategoryId>,

    /// Opaque route fields of screens outside the browser (forum, admin, ...)
    view: Option<String>,
    slug: Option<String>,
}

/// Leading crumb naming the active tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCrumb {
    pub tag: ClassificationTag,
    pub label: String,
}

/// Path shown above the browser: tab label, then root → selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb<'g> {
    pub tag: Option<TagCrumb>,
    pub trail: Vec<&'g CategoryNode>,
}

impl Breadcrumb<'_> {
    pub fn labels(&self) -> Vec<&str> {
        self.tag
            .iter()
            .map(|crumb| crumb.label.as_str())
            .chain(self.trail.iter().map(|node| node.name.as_str()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.trail.is_empty()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn active_tag(&self) -> &ActiveTag {
        &self.active_tag
    }

    pub const fn selected_category_id(&self) -> Option<CategoryId> {
        self.selected_category_id
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub const fn expanded_ids(&self) -> &BTreeSet<CategoryId> {
        &self.expanded_ids
    }

    pub fn is_expanded(&self, id: CategoryId) -> bool {
        self.expanded_ids.contains(&id)
    }

    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn is_searching(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// Switch tab; clears the selection and the search term.
    /// Only tags in the graph's closed set are accepted.
    pub fn select_tag(&mut self, graph: &CategoryGraph, tag: ActiveTag) -> bool {
        if let ActiveTag::Tag(ref t) = tag {
            if !graph.has_tag(t) {
                log::debug!("Ignoring unknown tag {:?}", t.as_str());
                return false;
            }
        }

        let changed = self.active_tag != tag
            || self.selected_category_id.is_some()
            || !self.search_term.is_empty();
        self.active_tag = tag;
        self.selected_category_id = None;
        self.search_term.clear();
        changed
    }

    /// Drill into `id`; it must classify under the active tag.
    /// A branch with children is also expanded in the sidebar.
    pub fn select_category(&mut self, graph: &CategoryGraph, id: CategoryId) -> bool {
        let Some(tag) = self.active_tag.as_tag() else {
            log::debug!("Ignoring category {id}: no tag selected");
            return false;
        };
        if graph.tag_of(id) != Some(tag) {
            log::debug!("Ignoring category {id}: not under tag {:?}", tag.as_str());
            return false;
        }

        let mut changed = self.selected_category_id != Some(id);
        self.selected_category_id = Some(id);
        if !graph.is_leaf(id) {
            changed |= self.expanded_ids.insert(id);
        }
        changed
    }

    /// Move the selection to its parent, or clear it at a root
    pub fn go_up(&mut self, graph: &CategoryGraph) -> bool {
        let Some(current) = self.selected_category_id else {
            return false;
        };
        self.selected_category_id = graph.parent_of(current).map(|parent| parent.id);
        true
    }

    /// Flip sidebar expansion of `id`; never touches the selection
    pub fn toggle_expand(&mut self, graph: &CategoryGraph, id: CategoryId) -> bool {
        if !graph.contains(id) {
            return false;
        }
        if !self.expanded_ids.remove(&id) {
            self.expanded_ids.insert(id);
        }
        true
    }

    /// Narrow the current scope by text; the selection is kept
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.search_term == term {
            return false;
        }
        self.search_term = term;
        true
    }

    /// Attach the opaque route of an out-of-browser screen; blank values
    /// count as absent, others are stored untouched
    pub fn set_route(&mut self, view: Option<String>, slug: Option<String>) -> bool {
        let view = view.filter(|v| !v.trim().is_empty());
        let slug = slug.filter(|s| !s.trim().is_empty());
        let changed = self.view != view || self.slug != slug;
        self.view = view;
        self.slug = slug;
        changed
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Re-check the state against a freshly built snapshot
    pub fn revalidate(&mut self, graph: &CategoryGraph) -> bool {
        let mut changed = false;

        if let Some(tag) = self.active_tag.as_tag() {
            if !graph.has_tag(tag) {
                log::debug!("Tag {:?} vanished from snapshot; falling back to all", tag.as_str());
                self.active_tag = ActiveTag::All;
                changed = true;
            }
        }

        if let Some(id) = self.selected_category_id {
            if graph.tag_of(id) != self.active_tag.as_tag() {
                log::debug!("Selected category {id} no longer valid; clearing selection");
                self.selected_category_id = None;
                changed = true;
            }
        }

        let before = self.expanded_ids.len();
        self.expanded_ids.retain(|id| graph.contains(*id));
        changed |= self.expanded_ids.len() != before;

        changed
    }

    /// Tab crumb (unless `All`) followed by root → selection
    pub fn breadcrumb<'g>(&self, graph: &'g CategoryGraph, labels: &TagCatalog) -> Breadcrumb<'g> {
        let tag = self.active_tag.as_tag().map(|tag| TagCrumb {
            tag: tag.clone(),
            label: labels.label_for(tag).to_string(),
        });
        let trail = self
            .selected_category_id
            .map(|id| graph.ancestors_of(id))
            .unwrap_or_default();
        Breadcrumb { tag, trail }
    }

    /// Single root of the active tag, skipped over when nothing is selected
    pub fn drilldown_target<'g>(&self, graph: &'g CategoryGraph) -> Option<&'g CategoryNode> {
        if self.selected_category_id.is_some() {
            return None;
        }
        let tag = self.active_tag.as_tag()?;
        match graph.roots_for_tag(tag).as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Nodes of the grid/sidebar level currently being browsed
    pub fn browse_nodes<'g>(&self, graph: &'g CategoryGraph) -> Vec<&'g CategoryNode> {
        if let Some(id) = self.selected_category_id {
            return graph.children_of(Some(id));
        }
        match &self.active_tag {
            ActiveTag::All => graph.children_of(None),
            ActiveTag::Tag(tag) => match self.drilldown_target(graph) {
                Some(root) => graph.children_of(Some(root.id)),
                None => graph.roots_for_tag(tag),
            },
        }
    }

    /// Whether to list content rather than a grid of sub-categories
    pub fn shows_content(&self, graph: &CategoryGraph) -> bool {
        if self.is_searching() || self.active_tag.is_all() {
            return true;
        }
        match self.selected_category_id {
            Some(id) => graph.descendants_of(id).is_empty(),
            // nothing left to drill into
            None => self.browse_nodes(graph).is_empty(),
        }
    }
}
