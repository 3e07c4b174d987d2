//! Source positions for blueprint documents
//!
//! Every position in this workspace is 1-based in both line and column,
//! matching how YAML and JSONC tooling reports locations to users. Columns
//! count characters, not bytes. Conversion to a 0-based wire convention is
//! the transport's job.
//!
//! # Example
//!
//! ```rust
//! use blueprint_source_map::{Position, Range};
//!
//! let range = Range::new(Position::new(2, 5), Position::new(2, 9));
//! assert!(range.contains(Position::new(2, 9)));
//! assert!(!range.contains(Position::new(2, 4)));
//! assert!(range.contains_with_leeway(Position::new(2, 4), 1));
//! ```

pub mod types;
pub mod utils;

pub use types::{Position, Range};
pub use utils::{LineIndex, line_count, offset_to_position};
