//! # Catalog Navigation
//!
//! Session-scoped browsing state over an immutable [`CategoryGraph`]
//! snapshot.
//!
//! ```text
//! user action ──> NavigationState (select_tag / select_category / go_up /
//!                 toggle_expand / set_search / reset)
//!                     │
//!                     ├──> derived: breadcrumb, drilldown target,
//!                     │             browse level, content visibility
//!                     ├──> query::to_query  <──>  query::from_query
//!                     └──> CatalogView (state + graph + content)
//! ```
//!
//! [`CategoryGraph`]: catalog_graph::CategoryGraph

mod labels;
pub mod query;
mod state;
mod view;

pub use labels::{TagCatalog, TagLabel};
pub use query::{from_query, from_query_string, to_query, to_query_string};
pub use state::{Breadcrumb, NavigationState, TagCrumb};
pub use view::CatalogView;
