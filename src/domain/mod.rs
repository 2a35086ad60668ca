//! Pure domain types with minimal dependencies
//!
//! This module contains the geometry and drag-tracking types shared by the
//! selector, the display backend and the output formatter.
//! Types here should have no display-protocol dependencies.

pub mod geometry;
pub mod selection;

pub use geometry::*;
pub use selection::*;
