use crate::labels::TagCatalog;
use crate::query::to_query_string;
use crate::state::{Breadcrumb, NavigationState};
use catalog_graph::{CategoryGraph, CategoryNode};
use catalog_protocol::{ActiveTag, CategoryId, ContentItem};
use catalog_search::{ContentClassifier, TagCount, TextQuery};
use serde::Serialize;

/// Everything the rendering layer needs for one screen
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView<'a> {
    pub active_tag: ActiveTag,
    pub selected_category_id: Option<CategoryId>,
    pub search_term: String,
    pub breadcrumb: Breadcrumb<'a>,

    /// Single root skipped by auto-drilldown, if any
    pub drilldown_target: Option<CategoryId>,

    /// Grid / sidebar level being browsed
    pub browse: Vec<&'a CategoryNode>,

    pub expanded: Vec<CategoryId>,

    /// `true`: render `items`; `false`: render the `browse` grid
    pub shows_content: bool,

    pub items: Vec<&'a ContentItem>,
    pub tag_counts: Vec<TagCount>,

    /// Shareable query string for the address bar (no leading `?`)
    pub query: String,
}

impl<'a> CatalogView<'a> {
    pub fn resolve(
        state: &NavigationState,
        graph: &'a CategoryGraph,
        content: &'a [ContentItem],
        labels: &TagCatalog,
    ) -> Self {
        let classifier = ContentClassifier::new(graph);
        let shows_content = state.shows_content(graph);

        let items = if shows_content {
            let scope =
                classifier.items_for(state.active_tag(), state.selected_category_id(), content);
            TextQuery::new(state.search_term()).filter(scope)
        } else {
            Vec::new()
        };

        log::debug!(
            "Resolved view tag={} category={:?} items={} grid={}",
            state.active_tag(),
            state.selected_category_id(),
            items.len(),
            !shows_content
        );

        Self {
            active_tag: state.active_tag().clone(),
            selected_category_id: state.selected_category_id(),
            search_term: state.search_term().to_string(),
            breadcrumb: state.breadcrumb(graph, labels),
            drilldown_target: state.drilldown_target(graph).map(|node| node.id),
            browse: state.browse_nodes(graph),
            expanded: state.expanded_ids().iter().copied().collect(),
            shows_content,
            items,
            tag_counts: classifier.counts_by_tag(content),
            query: to_query_string(state),
        }
    }
}
