//! # Catalog Protocol
//!
//! Record types exchanged between the classification engine and its
//! collaborators: the content repository that supplies category and content
//! snapshots, and the rendering layer that consumes filtered views.
//!
//! ```text
//! content repository ──> CategoryRecord[] ──> catalog-graph
//!                    └─> ContentItem[]    ──> catalog-search
//! ```

mod error;
mod snapshot;
mod types;

pub use error::{ProtocolError, Result};
pub use snapshot::{CategorySnapshot, ContentSnapshot};
pub use types::{
    ActiveTag, CategoryId, CategoryRecord, ClassificationTag, ContentId, ContentItem, ALL_TAG,
};
