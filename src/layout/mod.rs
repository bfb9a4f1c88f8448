//! Geometry of a practice sheet.
//!
//! The engines are pure functions of their inputs: they return a fresh, ordered list of
//! line records and share no state, so sheets can be computed independently (and in
//! parallel) and always come out identical for identical inputs.
//!
//! - [`layout_guides`](crate::layout::layout_guides) - the horizontal guide lines of each
//!   line of writing, top to bottom
//! - [`slant_lines`](crate::layout::slant_lines) - slanted construction lines, left to right
//! - [`grid_lines`](crate::layout::grid_lines) - plain square grids and ruled lines, for
//!   sheets that aren't tied to a hand
//!
//! All lengths are physical millimetres measured from the top-left corner of the sheet;
//! conversion to drawing pixels happens when the sheet is emitted.
//!
//! # Example
//!
//! ```
//! use italic_sheets::{HandProportions, Mm};
//! use italic_sheets::layout::{layout_guides, slant_lines};
//!
//! let hand = HandProportions::default()
//!     .slant_angle(80.0)
//!     .with_nib_width(Mm(2.0))
//!     .expect("valid hand");
//!
//! // one 30mm group of five lines fits into 50mm
//! let guides = layout_guides(&hand, Mm(50.0), None);
//! assert_eq!(guides.len(), 5);
//!
//! let slants = slant_lines(&hand, 3.0, Mm(50.0), Mm(50.0));
//! assert!(!slants.is_empty());
//! ```

mod grid;
mod guides;
mod slant;

pub use grid::*;
pub use guides::*;
pub use slant::*;
