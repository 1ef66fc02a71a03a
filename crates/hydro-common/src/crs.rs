//! Coordinate Reference System codes and definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An EPSG coordinate reference system as declared in raster metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrsCode {
    epsg: u16,
    geographic: bool,
}

impl CrsCode {
    /// WGS84 Geographic (lat/lon in degrees)
    pub const WGS84: CrsCode = CrsCode::geographic(4326);

    /// Geographic (angular) CRS with the given EPSG code.
    pub const fn geographic(epsg: u16) -> Self {
        Self {
            epsg,
            geographic: true,
        }
    }

    /// Projected CRS with the given EPSG code.
    pub const fn projected(epsg: u16) -> Self {
        Self {
            epsg,
            geographic: false,
        }
    }

    pub fn epsg(&self) -> u16 {
        self.epsg
    }

    /// Check if this is a geographic (lat/lon) CRS.
    pub fn is_geographic(&self) -> bool {
        self.geographic
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}

/// WKT2 definition of WGS 84, stored as the `crs_wkt` attribute of grid files.
pub const WGS84_WKT: &str = r#"GEOGCRS["WGS 84",
    ENSEMBLE["World Geodetic System 1984 ensemble",
        MEMBER["World Geodetic System 1984 (Transit)"],
        MEMBER["World Geodetic System 1984 (G730)"],
        MEMBER["World Geodetic System 1984 (G873)"],
        MEMBER["World Geodetic System 1984 (G1150)"],
        MEMBER["World Geodetic System 1984 (G1674)"],
        MEMBER["World Geodetic System 1984 (G1762)"],
        MEMBER["World Geodetic System 1984 (G2139)"],
        ELLIPSOID["WGS 84",6378137,298.257223563,
            LENGTHUNIT["metre",1]],
        ENSEMBLEACCURACY[2.0]],
    PRIMEM["Greenwich",0,
        ANGLEUNIT["degree",0.0174532925199433]],
    CS[ellipsoidal,2],
        AXIS["geodetic latitude (Lat)",north,
            ORDER[1],
            ANGLEUNIT["degree",0.0174532925199433]],
        AXIS["geodetic longitude (Lon)",east,
            ORDER[2],
            ANGLEUNIT["degree",0.0174532925199433]],
    USAGE[
        SCOPE["Horizontal component of 3D system."],
        AREA["World."],
        BBOX[-90,-180,90,180]],
    ID["EPSG",4326]]"#;
