//! # Catalog Graph
//!
//! In-memory index of the category forest (sections → categories →
//! sub-categories) built once per repository snapshot.
//!
//! ## Architecture
//!
//! ```text
//! CategoryRecord[]
//!     │
//!     ├──> build (one linear pass)
//!     │      ├─ id → node index
//!     │      ├─ resolve parents (unknown parent = root)
//!     │      └─ break parent cycles (earliest member becomes a root)
//!     │
//!     └──> CategoryGraph (petgraph, edges parent → child)
//!            ├─ children_of / roots_for_tag   (input order)
//!            ├─ ancestors_of                  (root → node, bounded walk)
//!            └─ descendants_of                (lazy, cached per node)
//! ```
//!
//! A graph is immutable after `build`; share it read-only and rebuild when
//! the repository delivers a new snapshot.

mod builder;
mod graph;
mod types;

pub use types::{CategoryGraph, CategoryNode};
