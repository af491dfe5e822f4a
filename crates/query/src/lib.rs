//! # Record Bridge Query
//!
//! Turns a structured record request into a query expression that is safe to
//! hand to the application's runtime.
//!
//! ## Pipeline
//!
//! ```text
//! QueryRequest
//!     │
//!     ├──> classify        "blog_posts" -> "BlogPost"
//!     │
//!     ├──> sanitize        denylist for filter/aggregate fragments,
//!     │                    allowlist grammar for ordering fragments
//!     │
//!     └──> compiler        CompiledQuery { entity, filter, Terminal }
//!                            Terminal::RowListing { order, limit }
//!                            Terminal::Scalar(Aggregate)
//! ```
//!
//! The filter sanitizer is a denylist. It narrows the attack surface but is
//! not a parser and does not prove a fragment harmless.

mod classify;
mod compiler;
mod error;
mod request;
mod sanitize;

pub use classify::{camelize, classify, is_valid_collection_name, singularize, underscore};
pub use compiler::{compile, try_compile, Aggregate, CompiledQuery, Terminal};
pub use error::{QueryError, Result};
pub use request::{resolve_entity_type, resolve_table_entity_type, QueryRequest};
pub use sanitize::{is_safe_fragment, parse_aggregate, sanitize_order};
