//! SQL fragment building blocks for the rql compiler.
//!
//! Fragments are flat lists of [`SQLChunk`]s. Parameters are always positional
//! and are rendered in textual order, so the rendered placeholder sequence and
//! the collected parameter list can never disagree.

pub mod dialect;
pub mod expr;
pub mod param;
pub mod sql;
pub mod statement;
pub mod traits;

#[macro_use]
pub mod tracing;

// Re-export key types and traits
pub use dialect::PlaceholderStyle;
pub use param::Param;
pub use sql::{SQL, SQLChunk, Token};
pub use statement::Statement;
pub use traits::*;
