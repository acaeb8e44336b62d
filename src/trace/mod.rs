//! Trace restructuring and timeline scaling.
//!
//! The algorithmic core of tracelens: nesting the flat resolver list
//! into a renderable forest, choosing a readable time-axis scale,
//! classifying short spans, and mapping spans onto columns. Everything
//! here is a pure function over immutable input; recomputing is always
//! safe.

#![warn(missing_docs)]

pub mod layout;
pub mod nest;
pub mod scale;
pub mod units;
pub mod visibility;

// Re-export the operations the rest of the crate drives
pub use layout::{bar_geometry, BarGeometry};
pub use nest::{nest, span_appearances};
pub use scale::{select_scale, Scale};
pub use units::nanos_to_millis;
pub use visibility::{has_visible_children, is_insignificant, is_visible};
