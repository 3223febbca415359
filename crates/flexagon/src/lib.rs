//! # flexagon
//!
//! Geometry and raster pipeline for printable hexaflexagon templates.
//!
//! Three square faces go in; each is cut into the six triangles of its
//! inscribed hexagon, and the eighteen triangles are laid out on a
//! two-row strip that folds into a hexa-tri-hexaflexagon.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Every module has to be declared explicitly; nothing is picked up
//! from the directory on its own.

pub mod error;
pub mod geometry;
pub mod hexagon;
pub mod layout;
pub mod lines;
pub mod normalize;
pub mod raster;
pub mod template;

// Re-export common types at crate root for convenience.
pub use error::{FlexagonError, Result};
pub use geometry::{Line, Point};
pub use hexagon::{decompose, GuideStyle, Hexagon, Wedge};
pub use layout::{Placement, WedgeId, ROW_1, ROW_2};
pub use lines::{dash_segments, draw_dashed_line, draw_line, DashStyle};
pub use normalize::rotate_and_crop;
pub use template::{
    assemble, canvas_size, generate, PlacedWedge, Template, TemplateConfig, DEFAULT_FACE_WIDTH,
};
