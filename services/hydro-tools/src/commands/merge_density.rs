//! `merge-density`: combine modeled and surveyed drainage density.

use std::path::Path;

use anyhow::{Context, Result};
use geotiff::read_geotiff_u8;
use gridfile::{write_density, GridFile};
use hydro_common::{BoundingBox, GridCoords};
use hydro_core::{coordinate_slice, merge_density};
use tracing::{info, warn};

use crate::config::ToolsConfig;

const DENSITY: &str = "den";

pub fn run(
    modeled: &Path,
    surveyed: &Path,
    survey_mask: &Path,
    output: &Path,
    config: &ToolsConfig,
) -> Result<()> {
    let modeled_file = GridFile::open(modeled)
        .with_context(|| format!("Failed to open {}", modeled.display()))?;
    let coords = modeled_file.read_coords()?;
    let modeled_den = modeled_file.read_f32(DENSITY)?;

    let surveyed_den = GridFile::open(surveyed)
        .and_then(|f| f.read_f32(DENSITY))
        .with_context(|| format!("Failed to read {DENSITY} from {}", surveyed.display()))?;

    let mask = read_geotiff_u8(survey_mask)
        .with_context(|| format!("Failed to read survey mask {}", survey_mask.display()))?;

    let exclude = config
        .merge_exclude
        .as_ref()
        .and_then(|bbox| exclusion_window(&coords, bbox));

    let merged = merge_density(&modeled_den, &surveyed_den, &mask.grid, exclude)
        .context("Inputs are not on the same grid")?;

    write_density(output, &coords, &merged, &config.write_options())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(rows = merged.rows(), cols = merged.cols(), "Merged drainage density");
    Ok(())
}

/// Row and column ranges covering `bbox`, widened by one cell.
fn exclusion_window(
    coords: &GridCoords,
    bbox: &BoundingBox,
) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
    let rows = coordinate_slice(coords.lat(), Some(bbox.y_range()));
    let cols = coordinate_slice(coords.lon(), Some(bbox.x_range()));
    match (rows, cols) {
        (Some(rows), Some(cols)) => {
            info!(rows = ?rows, cols = ?cols, "Excluding survey window");
            Some((rows, cols))
        }
        _ => {
            warn!(bbox = ?bbox, "Exclusion region does not intersect the grid");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::generators::create_coords;

    #[test]
    fn test_exclusion_window_widened() {
        // cell centers at 120.05, 120.15, ... and 24.95, 24.85, ...
        let coords = create_coords(10, 10, 25.0, 120.0, 0.1);
        let bbox = BoundingBox::new(120.3, 24.4, 120.5, 24.6);
        let (rows, cols) = exclusion_window(&coords, &bbox).unwrap();
        assert_eq!(cols, 2..6);
        assert_eq!(rows, 3..7);
    }

    #[test]
    fn test_exclusion_window_outside_grid() {
        let coords = create_coords(4, 4, 25.0, 120.0, 0.1);
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(exclusion_window(&coords, &bbox).is_none());
    }
}
