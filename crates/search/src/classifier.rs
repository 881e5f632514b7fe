use catalog_graph::CategoryGraph;
use catalog_protocol::{ActiveTag, CategoryId, ClassificationTag, ContentItem};
use serde::Serialize;

/// Resolves a tag/category selection into content items
///
/// Holds the graph read-only; the content list is passed per call so the
/// same classifier serves any content snapshot of the same category tree.
#[derive(Debug, Clone, Copy)]
pub struct ContentClassifier<'g> {
    graph: &'g CategoryGraph,
}

/// Number of classified items under one tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: ClassificationTag,
    pub count: usize,
}

impl<'g> ContentClassifier<'g> {
    pub const fn new(graph: &'g CategoryGraph) -> Self {
        Self { graph }
    }

    pub const fn graph(&self) -> &'g CategoryGraph {
        self.graph
    }

    /// Items visible for a selection, in input order.
    ///
    /// * no category, `All`: the raw list, unclassifiable items included
    /// * no category, a tag: items whose category resolves under that tag
    /// * a category: items filed at the category or anywhere beneath it;
    ///   a category outside the requested tag yields nothing
    pub fn items_for<'a>(
        &self,
        tag: &ActiveTag,
        category: Option<CategoryId>,
        items: &'a [ContentItem],
    ) -> Vec<&'a ContentItem> {
        match (tag, category) {
            (ActiveTag::All, None) => items.iter().collect(),
            (ActiveTag::Tag(tag), None) => items
                .iter()
                .filter(|item| self.graph.tag_of(item.category_id) == Some(tag))
                .collect(),
            (tag, Some(category)) => {
                if !self.graph.contains(category) {
                    log::debug!("Category {category} not in snapshot; nothing to classify");
                    return Vec::new();
                }
                if let Some(tag) = tag.as_tag() {
                    if self.graph.tag_of(category) != Some(tag) {
                        return Vec::new();
                    }
                }

                items
                    .iter()
                    .filter(|item| self.graph.is_within(item.category_id, category))
                    .collect()
            }
        }
    }

    /// Classified item count per tag, in the graph's tag order
    pub fn counts_by_tag(&self, items: &[ContentItem]) -> Vec<TagCount> {
        let mut counts: Vec<TagCount> = self
            .graph
            .tags()
            .iter()
            .map(|tag| TagCount {
                tag: tag.clone(),
                count: 0,
            })
            .collect();

        for item in items {
            let Some(tag) = self.graph.tag_of(item.category_id) else {
                continue;
            };
            if let Some(slot) = counts.iter_mut().find(|c| &c.tag == tag) {
                slot.count += 1;
            }
        }

        counts
    }

    /// Items whose category is not in the snapshot
    pub fn unclassified<'a>(&self, items: &'a [ContentItem]) -> Vec<&'a ContentItem> {
        items
            .iter()
            .filter(|item| !self.graph.contains(item.category_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_protocol::{CategoryRecord, ContentId};
    use pretty_assertions::assert_eq;

    fn graph() -> CategoryGraph {
        CategoryGraph::build(&[
            CategoryRecord::root(1, "Akademik", "akademik"),
            CategoryRecord::child(2, 1, "Nöroloji", "akademik"),
            CategoryRecord::child(3, 2, "Sinir Sistemi", "akademik"),
            CategoryRecord::root(20, "Dokümanlar", "dokuman"),
        ])
    }

    fn ids(items: &[&ContentItem]) -> Vec<i64> {
        items.iter().map(|item| item.id.0).collect()
    }

    #[test]
    fn parent_category_includes_descendants() {
        let graph = graph();
        let classifier = ContentClassifier::new(&graph);
        let content = vec![ContentItem::new(10, 3, "Vaka A")];
        let tag = ActiveTag::from("akademik");

        assert_eq!(ids(&classifier.items_for(&tag, Some(CategoryId(1)), &content)), vec![10]);
        assert_eq!(ids(&classifier.items_for(&tag, Some(CategoryId(2)), &content)), vec![10]);
        assert_eq!(ids(&classifier.items_for(&tag, Some(CategoryId(3)), &content)), vec![10]);
    }

    #[test]
    fn direct_assignment_to_inner_node_counts() {
        let graph = graph();
        let classifier = ContentClassifier::new(&graph);
        let content = vec![ContentItem::new(11, 2, "Genel nöroloji")];
        let tag = ActiveTag::from("akademik");

        assert_eq!(ids(&classifier.items_for(&tag, Some(CategoryId(1)), &content)), vec![11]);
        assert!(classifier.items_for(&tag, Some(CategoryId(3)), &content).is_empty());
    }

    #[test]
    fn tag_scope_excludes_other_tags_and_unknown_categories() {
        let graph = graph();
        let classifier = ContentClassifier::new(&graph);
        let content = vec![
            ContentItem::new(1, 3, "akademik"),
            ContentItem::new(2, 20, "dokuman"),
            ContentItem::new(3, 999, "kayıp"),
        ];

        let academic = classifier.items_for(&ActiveTag::from("akademik"), None, &content);
        assert_eq!(ids(&academic), vec![1]);

        let all = classifier.items_for(&ActiveTag::All, None, &content);
        assert_eq!(ids(&all), vec![1, 2, 3]);

        assert_eq!(
            classifier.unclassified(&content).iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![ContentId(3)]
        );
    }

    #[test]
    fn category_outside_tag_yields_nothing() {
        let graph = graph();
        let classifier = ContentClassifier::new(&graph);
        let content = vec![ContentItem::new(2, 20, "dokuman")];

        assert!(classifier
            .items_for(&ActiveTag::from("akademik"), Some(CategoryId(20)), &content)
            .is_empty());
        assert_eq!(
            ids(&classifier.items_for(&ActiveTag::All, Some(CategoryId(20)), &content)),
            vec![2]
        );
        assert!(classifier
            .items_for(&ActiveTag::All, Some(CategoryId(404)), &content)
            .is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let graph = graph();
        let classifier = ContentClassifier::new(&graph);
        let content = vec![
            ContentItem::new(5, 3, "e"),
            ContentItem::new(1, 2, "a"),
            ContentItem::new(3, 1, "c"),
        ];

        let found = classifier.items_for(&ActiveTag::from("akademik"), Some(CategoryId(1)), &content);
        assert_eq!(ids(&found), vec![5, 1, 3]);
    }

    #[test]
    fn counts_follow_tag_order() {
        let graph = graph();
        let classifier = ContentClassifier::new(&graph);
        let content = vec![
            ContentItem::new(1, 3, "x"),
            ContentItem::new(2, 2, "y"),
            ContentItem::new(3, 20, "z"),
            ContentItem::new(4, 77, "lost"),
        ];

        assert_eq!(
            classifier.counts_by_tag(&content),
            vec![
                TagCount { tag: "akademik".into(), count: 2 },
                TagCount { tag: "dokuman".into(), count: 1 },
            ]
        );
    }
}
