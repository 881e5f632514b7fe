//! # Catalog CLI
//!
//! Loads repository snapshots from disk, replays a shareable query string
//! into a [`NavigationState`], and prints what the portal would render.

use anyhow::{Context as AnyhowContext, Result};
use catalog_graph::CategoryGraph;
use catalog_navigation::{from_query_string, CatalogView, NavigationState, TagCatalog};
use catalog_protocol::{ActiveTag, CategoryId, CategorySnapshot, ContentItem, ContentSnapshot};
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

pub mod config;

pub use config::{CatalogConfig, ConfigError, SnapshotPaths};

/// One category snapshot indexed, plus the content snapshot beside it
pub struct Snapshot {
    pub graph: CategoryGraph,
    pub content: Vec<ContentItem>,
}

impl Snapshot {
    /// Configured tags join the snapshot's own tags in the closed tag set
    pub fn load(categories: &Path, content: Option<&Path>, labels: &TagCatalog) -> Result<Self> {
        let records = CategorySnapshot::from_path(categories)
            .with_context(|| format!("Failed to load categories from {}", categories.display()))?;
        let graph = CategoryGraph::build(&records.records).with_tags(labels.keys().cloned());
        if !graph.broken_cycles().is_empty() {
            log::warn!(
                "Category snapshot {} has parent cycles; promoted to roots: {:?}",
                categories.display(),
                graph.broken_cycles()
            );
        }

        let content = match content {
            Some(path) => {
                ContentSnapshot::from_path(path)
                    .with_context(|| format!("Failed to load content from {}", path.display()))?
                    .items
            }
            None => Vec::new(),
        };

        log::debug!(
            "Loaded snapshot: {} categories, {} content items",
            graph.len(),
            content.len()
        );

        Ok(Self { graph, content })
    }
}

/// Command-line path wins over the configured one
pub fn pick_path(cli: Option<PathBuf>, configured: Option<&PathBuf>, what: &str) -> Result<PathBuf> {
    cli.or_else(|| configured.cloned()).with_context(|| {
        format!("No {what} snapshot given (pass --{what} or set [snapshot].{what} in the config)")
    })
}

/// Replay a query string plus an optional search term
pub fn navigate(graph: &CategoryGraph, query: &str, search: Option<&str>) -> NavigationState {
    let mut state = from_query_string(query, graph);
    if let Some(term) = search {
        state.set_search(term);
    }
    state
}

pub fn render_view(
    snapshot: &Snapshot,
    state: &NavigationState,
    labels: &TagCatalog,
    pretty: bool,
) -> Result<String> {
    let view = CatalogView::resolve(state, &snapshot.graph, &snapshot.content, labels);
    let json = if pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    Ok(json)
}

/// Indented outline of the forest, optionally limited to one tag
pub fn render_tree(graph: &CategoryGraph, tag: &ActiveTag) -> String {
    let roots = match tag.as_tag() {
        Some(tag) => graph.roots_for_tag(tag),
        None => graph.children_of(None),
    };

    let mut out = String::new();
    let mut stack: Vec<(CategoryId, usize)> = roots.iter().rev().map(|n| (n.id, 0)).collect();
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = graph.node(id) else {
            continue;
        };
        let _ = write!(out, "{}{} #{}", "  ".repeat(depth), node.name, node.id);
        if depth == 0 {
            let _ = write!(out, " [{}]", node.classification_tag);
        }
        if let Some(count) = node.content_count {
            let _ = write!(out, " ({count})");
        }
        out.push('\n');

        for child in graph.children_of(Some(id)).iter().rev() {
            stack.push((child.id, depth + 1));
        }
    }
    out
}

pub fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_navigation::TagLabel;
    use catalog_protocol::CategoryRecord;
    use pretty_assertions::assert_eq;

    fn graph() -> CategoryGraph {
        CategoryGraph::build(&[
            CategoryRecord::root(1, "Akademik", "akademik").with_content_count(4),
            CategoryRecord::child(2, 1, "Nöroloji", "akademik"),
            CategoryRecord::child(3, 2, "Sinir Sistemi", "akademik"),
            CategoryRecord::child(4, 1, "Kardiyoloji", "akademik"),
            CategoryRecord::root(5, "Seminerler", "seminer"),
        ])
    }

    #[test]
    fn tree_is_depth_first_in_input_order() {
        let tree = render_tree(&graph(), &ActiveTag::All);
        assert_eq!(
            tree,
            "Akademik #1 [akademik] (4)\n  Nöroloji #2\n    Sinir Sistemi #3\n  Kardiyoloji #4\nSeminerler #5 [seminer]\n"
        );
    }

    #[test]
    fn tree_can_be_limited_to_a_tag() {
        let tree = render_tree(&graph(), &ActiveTag::from("seminer"));
        assert_eq!(tree, "Seminerler #5 [seminer]\n");
    }

    #[test]
    fn navigate_applies_search_after_query() {
        let state = navigate(&graph(), "type=akademik&category_id=2", Some("sinir"));
        assert_eq!(state.selected_category_id(), Some(CategoryId(2)));
        assert_eq!(state.search_term(), "sinir");
    }

    #[test]
    fn pick_path_prefers_command_line() {
        let configured = PathBuf::from("conf.json");
        let picked = pick_path(Some(PathBuf::from("cli.json")), Some(&configured), "categories");
        assert_eq!(picked.unwrap(), PathBuf::from("cli.json"));
        assert_eq!(pick_path(None, Some(&configured), "categories").unwrap(), configured);
        assert!(pick_path(None, None, "categories").is_err());
    }

    #[test]
    fn snapshot_load_adds_configured_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        std::fs::write(&path, r#"[{"id": 1, "parentId": null, "name": "A", "type": "akademik"}]"#)
            .unwrap();

        let labels = TagCatalog::new(vec![TagLabel::new("video", "Video")]);
        let snapshot = Snapshot::load(&path, None, &labels).unwrap();
        let tags: Vec<_> = snapshot.graph.tags().iter().map(|t| t.as_str()).collect();
        assert_eq!(tags, vec!["akademik", "video"]);

        let state = navigate(&snapshot.graph, "type=video", None);
        assert_eq!(state.active_tag(), &ActiveTag::from("video"));
    }
}
