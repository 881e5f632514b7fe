use catalog_protocol::ContentItem;

/// Case-insensitive substring query over title and description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.trim().to_lowercase(),
        }
    }

    /// A blank query matches everything
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, item: &ContentItem) -> bool {
        self.is_empty()
            || item.title.to_lowercase().contains(&self.needle)
            || item.description.to_lowercase().contains(&self.needle)
    }

    /// Narrow an already scoped list, keeping its order
    pub fn filter<'a>(&self, scope: Vec<&'a ContentItem>) -> Vec<&'a ContentItem> {
        if self.is_empty() {
            return scope;
        }
        scope.into_iter().filter(|item| self.matches(item)).collect()
    }
}

/// Search inside `scope`, which should come from
/// [`ContentClassifier::items_for`](crate::ContentClassifier::items_for)
pub fn search<'a>(term: &str, scope: Vec<&'a ContentItem>) -> Vec<&'a ContentItem> {
    TextQuery::new(term).filter(scope)
}
