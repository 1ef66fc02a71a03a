//! Single-band GeoTIFF I/O for north-up rasters.
//!
//! Georeferencing is carried by ModelPixelScale + ModelTiepoint and a GeoKey
//! directory naming the EPSG code. Nodata uses the GDAL ASCII tag (42113).

pub mod error;
pub mod geokeys;
pub mod reader;
pub mod writer;

pub use error::{GeoTiffError, GeoTiffResult};
pub use reader::{read_geotiff, read_geotiff_f32, read_geotiff_u8, GeoRaster};
pub use writer::{write_geotiff, GeoTiffOptions};
