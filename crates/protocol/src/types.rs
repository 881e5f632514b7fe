use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Reserved spelling of the "every classification" tab
pub const ALL_TAG: &str = "all";

/// Identifier of a category node, as assigned by the content repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for CategoryId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Identifier of a content item (article, document, seminar)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(pub i64);

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ContentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Top-level content kind partitioning the category forest (e.g. "akademik")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationTag(String);

impl ClassificationTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank, or spelled exactly like the `all` tab; such a tag cannot be
    /// told apart from [`ActiveTag::All`] once written to a query string
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.0 == ALL_TAG || self.0.trim().is_empty()
    }
}

impl fmt::Display for ClassificationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassificationTag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Tab selected in the portal: one classification, or all of them
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActiveTag {
    #[default]
    All,
    Tag(ClassificationTag),
}

impl ActiveTag {
    /// Parse a raw tag; blank input and exactly `all` map to [`ActiveTag::All`].
    /// Anything else is kept verbatim, padding and case included.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() || raw == ALL_TAG {
            Self::All
        } else {
            Self::Tag(ClassificationTag::new(raw))
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    #[must_use]
    pub const fn as_tag(&self) -> Option<&ClassificationTag> {
        match self {
            Self::All => None,
            Self::Tag(tag) => Some(tag),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_TAG,
            Self::Tag(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for ActiveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ActiveTag {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ActiveTag> for String {
    fn from(value: ActiveTag) -> Self {
        value.as_str().to_string()
    }
}

impl From<ClassificationTag> for ActiveTag {
    fn from(value: ClassificationTag) -> Self {
        Self::Tag(value)
    }
}

impl From<&str> for ActiveTag {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Flat category record as delivered by the content repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,

    /// Absent for roots. A parent that does not resolve also yields a root.
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<CategoryId>,

    /// Display label, never interpreted by the engine
    pub name: String,

    #[serde(alias = "classificationTag", alias = "type")]
    pub classification_tag: ClassificationTag,

    /// Denormalized count supplied by the repository (pass-through)
    #[serde(
        default,
        alias = "contentCount",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_count: Option<u64>,
}

impl CategoryRecord {
    pub fn root(id: i64, name: impl Into<String>, tag: impl Into<ClassificationTag>) -> Self {
        Self {
            id: CategoryId(id),
            parent_id: None,
            name: name.into(),
            classification_tag: tag.into(),
            content_count: None,
        }
    }

    pub fn child(
        id: i64,
        parent: i64,
        name: impl Into<String>,
        tag: impl Into<ClassificationTag>,
    ) -> Self {
        Self {
            parent_id: Some(CategoryId(parent)),
            ..Self::root(id, name, tag)
        }
    }

    /// Builder: set content count
    #[must_use]
    pub const fn with_content_count(mut self, count: u64) -> Self {
        self.content_count = Some(count);
        self
    }
}

/// Content item classified under exactly one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,

    #[serde(alias = "categoryId")]
    pub category_id: CategoryId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Display fields owned by the rendering layer (slug, author, dates, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContentItem {
    pub fn new(id: i64, category_id: i64, title: impl Into<String>) -> Self {
        Self {
            id: ContentId(id),
            category_id: CategoryId(category_id),
            title: title.into(),
            description: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Builder: set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: attach an opaque display field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
