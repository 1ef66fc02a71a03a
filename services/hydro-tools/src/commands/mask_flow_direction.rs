//! `mask-flow-direction`: reconcile flow grids with drainage density coverage.

use std::path::Path;

use anyhow::{bail, Context, Result};
use gridfile::{update_flow_grids, GridFile};
use hydro_core::{check_alignment, is_valid_code, reconcile_parallel};
use tracing::info;

pub fn run(d8_file: &Path, den_file: &Path) -> Result<()> {
    let den = GridFile::open(den_file)
        .and_then(|f| f.read_f32("den"))
        .with_context(|| format!("Failed to read den from {}", den_file.display()))?;

    let (mut dir, mut upa) = {
        let d8 = GridFile::open(d8_file)
            .with_context(|| format!("Failed to open {}", d8_file.display()))?;
        (d8.read_u8("dir")?, d8.read_f64("upa")?)
    };

    check_alignment(&dir, &upa, &den)?;
    if let Some(pos) = dir.data().iter().position(|&c| !is_valid_code(c)) {
        let (row, col) = (pos / dir.cols(), pos % dir.cols());
        bail!("Invalid D8 code {} at row {row}, col {col}", dir.data()[pos]);
    }

    let stats = reconcile_parallel(&mut dir, &mut upa, &den);

    update_flow_grids(d8_file, &dir, &upa)
        .with_context(|| format!("Failed to update {}", d8_file.display()))?;

    info!(
        gated = stats.gated,
        outlets = stats.outlets,
        area_masked = stats.area_masked,
        "Masked flow direction"
    );
    Ok(())
}
