//! The GeoKey directory (tag 34735) and the EPSG keys it carries.

use hydro_common::CrsCode;

const GT_MODEL_TYPE: u16 = 1024;
const GT_RASTER_TYPE: u16 = 1025;
const GEOGRAPHIC_TYPE: u16 = 2048;
const PROJECTED_CS_TYPE: u16 = 3072;

const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;
const USER_DEFINED: u16 = 32767;

/// GeoKey directory declaring `crs` with pixel-is-area semantics.
#[rustfmt::skip]
pub fn directory_for(crs: CrsCode) -> Vec<u16> {
    let (model_type, crs_key) = if crs.is_geographic() {
        (MODEL_TYPE_GEOGRAPHIC, GEOGRAPHIC_TYPE)
    } else {
        (MODEL_TYPE_PROJECTED, PROJECTED_CS_TYPE)
    };

    vec![
        1, 1, 0, 3, // version 1.1.0, 3 keys
        GT_MODEL_TYPE, 0, 1, model_type,
        GT_RASTER_TYPE, 0, 1, RASTER_PIXEL_IS_AREA,
        crs_key, 0, 1, crs.epsg(),
    ]
}

/// The EPSG CRS declared by a GeoKey directory, if any.
pub fn crs_from_directory(directory: &[u16]) -> Option<CrsCode> {
    let header = directory.get(..4)?;
    let count = header[3] as usize;

    directory[4..]
        .chunks_exact(4)
        .take(count)
        // location 0 means the value is stored inline
        .filter(|key| key[1] == 0 && key[3] != 0 && key[3] != USER_DEFINED)
        .find_map(|key| match key[0] {
            GEOGRAPHIC_TYPE => Some(CrsCode::geographic(key[3])),
            PROJECTED_CS_TYPE => Some(CrsCode::projected(key[3])),
            _ => None,
        })
}
