use catalog_protocol::ClassificationTag;
use serde::{Deserialize, Serialize};

/// Display label of one classification tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagLabel {
    pub key: ClassificationTag,
    pub label: String,
}

impl TagLabel {
    pub fn new(key: impl Into<ClassificationTag>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Ordered tag → label table used for tabs and the leading breadcrumb
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagCatalog {
    entries: Vec<TagLabel>,
}

impl TagCatalog {
    pub fn new(entries: Vec<TagLabel>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TagLabel] {
        &self.entries
    }

    /// Configured tags in tab order
    pub fn keys(&self) -> impl Iterator<Item = &ClassificationTag> {
        self.entries.iter().map(|e| &e.key)
    }

    /// Configured label, or the raw tag when none is configured
    pub fn label_for<'a>(&'a self, tag: &'a ClassificationTag) -> &'a str {
        self.entries
            .iter()
            .find(|e| &e.key == tag)
            .map_or(tag.as_str(), |e| e.label.as_str())
    }
}

impl Default for TagCatalog {
    fn default() -> Self {
        Self::new(vec![
            TagLabel::new("akademik", "Akademik"),
            TagLabel::new("dokuman", "Doküman"),
            TagLabel::new("seminer", "Seminer"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_raw_tag() {
        let catalog = TagCatalog::default();
        let seminer = ClassificationTag::new("seminer");
        let video = ClassificationTag::new("video");
        assert_eq!(catalog.label_for(&seminer), "Seminer");
        assert_eq!(catalog.label_for(&video), "video");
        assert_eq!(
            catalog.keys().map(ClassificationTag::as_str).collect::<Vec<_>>(),
            vec!["akademik", "dokuman", "seminer"]
        );
    }
}
