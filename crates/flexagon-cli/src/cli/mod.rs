//! CLI command implementations.
//!
//! - `generate` (default) - Build a template from three images
//! - `layout` - Print the fixed wedge placement table

pub mod generate;
pub mod layout;

pub use generate::cmd_generate;
pub use layout::cmd_layout;
