//! Grid algorithms for hydrological rasters.
//!
//! The centerpiece is [`reconcile`]: it walks a D8 flow-direction grid and
//! turns every cell that would drain into a cell without drainage-density
//! coverage into an outlet, then masks upstream area outside the coverage.
//!
//! # Example
//!
//! ```
//! use hydro_common::Grid2D;
//! use hydro_core::reconcile;
//!
//! let mut dir = Grid2D::filled(3, 3, 1u8); // everything drains east
//! let mut upa = Grid2D::filled(3, 3, 5.0f32);
//! let mut den = Grid2D::filled(3, 3, 0.8f32);
//! den[(1, 2)] = f32::NAN;
//!
//! reconcile(&mut dir, &mut upa, &den);
//!
//! assert_eq!(dir[(1, 1)], 0);
//! assert!(upa[(1, 2)].is_nan());
//! ```

pub mod d8;
pub mod extent;
pub mod merge;
pub mod reconcile;
pub mod resample;

pub use d8::{is_valid_code, D8Direction, NO_FLOW};
pub use extent::{coordinate_slice, non_empty_extent};
pub use merge::merge_density;
pub use reconcile::{
    check_alignment, is_undefined, reconcile, reconcile_parallel, ReconcileStats,
};
pub use resample::{bilinear_interpolate, nearest_interpolate, resample, InterpolationMethod};
