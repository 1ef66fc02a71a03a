//! One module per subcommand.

pub mod empty_raster;
pub mod mask_flow_direction;
pub mod merge_density;
pub mod reproject_density;
pub mod to_geotiff;

use hydro_common::GridCoords;
use tracing::warn;

/// Warn when a grid file's coordinates break the north-up assumptions of
/// raster export.
pub(crate) fn check_coordinate_layout(coords: &GridCoords) {
    if !coords.lat_descending() {
        warn!("Latitude is ascending; raster rows are written in file order under a north-up transform");
    }
}
