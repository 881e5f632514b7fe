//! Address-bar mapping for [`NavigationState`].
//!
//! Only the shareable part of the state is written: route (`view`, `slug`),
//! tab (`type`) and selection (`category_id`). Search text and sidebar
//! expansion stay local to the session.

use crate::state::NavigationState;
use catalog_graph::CategoryGraph;
use catalog_protocol::{ActiveTag, CategoryId};
use url::form_urlencoded;

pub const VIEW_KEY: &str = "view";
pub const SLUG_KEY: &str = "slug";
pub const TYPE_KEY: &str = "type";
pub const CATEGORY_KEY: &str = "category_id";

/// Key/value pairs for the shareable fields, in a fixed order
pub fn to_query(state: &NavigationState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::with_capacity(4);
    if let Some(view) = state.view() {
        pairs.push((VIEW_KEY, view.to_string()));
    }
    if let Some(slug) = state.slug() {
        pairs.push((SLUG_KEY, slug.to_string()));
    }
    if let Some(tag) = state.active_tag().as_tag() {
        pairs.push((TYPE_KEY, tag.to_string()));
    }
    if let Some(id) = state.selected_category_id() {
        pairs.push((CATEGORY_KEY, id.to_string()));
    }
    pairs
}

/// `application/x-www-form-urlencoded` rendering of [`to_query`], without `?`
pub fn to_query_string(state: &NavigationState) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(to_query(state))
        .finish()
}

/// Rebuild a state from query pairs.
///
/// Each field recovers on its own: an unknown `type` falls back to all, a
/// malformed or foreign `category_id` is dropped, and a valid `category_id`
/// with no usable `type` brings its own tag along. Unknown keys are ignored
/// and a repeated key keeps its last value. `view` and `slug` are opaque and
/// come back exactly as written.
pub fn from_query<I, K, V>(pairs: I, graph: &CategoryGraph) -> NavigationState
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut view = None;
    let mut slug = None;
    let mut tag_raw = None;
    let mut category_raw = None;

    for (key, value) in pairs {
        // blank means absent; anything else is kept as decoded
        let value = value.as_ref();
        let value = (!value.trim().is_empty()).then(|| value.to_string());
        match key.as_ref() {
            VIEW_KEY => view = value,
            SLUG_KEY => slug = value,
            TYPE_KEY => tag_raw = value,
            CATEGORY_KEY => category_raw = value,
            _ => {}
        }
    }

    let mut state = NavigationState::new();
    state.set_route(view, slug);

    let mut tag = tag_raw.as_deref().map_or(ActiveTag::All, ActiveTag::parse);
    if let ActiveTag::Tag(ref t) = tag {
        if !graph.has_tag(t) {
            log::debug!("Query names unknown tag {:?}; using all", t.as_str());
            tag = ActiveTag::All;
        }
    }

    let category = category_raw.as_deref().and_then(|raw| match raw.parse::<CategoryId>() {
        Ok(id) if graph.contains(id) => Some(id),
        Ok(id) => {
            log::debug!("Query names unknown category {id}; ignoring");
            None
        }
        Err(_) => {
            log::debug!("Malformed category_id {raw:?}; ignoring");
            None
        }
    });

    if tag.is_all() {
        if let Some(own) = category.and_then(|id| graph.tag_of(id)) {
            tag = ActiveTag::Tag(own.clone());
        }
    }

    state.select_tag(graph, tag);
    if let Some(id) = category {
        state.select_category(graph, id);
    }
    state
}

/// Parse a raw query string (leading `?` allowed)
pub fn from_query_string(query: &str, graph: &CategoryGraph) -> NavigationState {
    let query = query.strip_prefix('?').unwrap_or(query);
    from_query(form_urlencoded::parse(query.as_bytes()), graph)
}
