//! Reading single-band GeoTIFFs.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use hydro_common::{CrsCode, GeoTransform, Grid2D};
use num_traits::NumCast;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;
use tracing::debug;

use crate::error::{GeoTiffError, GeoTiffResult};
use crate::geokeys;

/// A decoded band with its georeferencing.
#[derive(Debug, Clone)]
pub struct GeoRaster<T> {
    pub grid: Grid2D<T>,
    pub transform: GeoTransform,
    pub nodata: Option<f64>,
    /// `None` when the file declares no EPSG code.
    pub crs: Option<CrsCode>,
}

impl<T: Copy> GeoRaster<T> {
    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }
}

/// Read the first band as f32.
pub fn read_geotiff_f32(path: impl AsRef<Path>) -> GeoTiffResult<GeoRaster<f32>> {
    read_geotiff(path)
}

/// Read the first band as u8.
///
/// Samples matching the file's nodata that u8 cannot hold read as 0; any
/// other out-of-range sample is an error.
pub fn read_geotiff_u8(path: impl AsRef<Path>) -> GeoTiffResult<GeoRaster<u8>> {
    read_geotiff(path)
}

/// Read the first band, converting samples to `T`.
pub fn read_geotiff<T, P>(path: P) -> GeoTiffResult<GeoRaster<T>>
where
    T: NumCast + Copy,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let raster = decode(reader)?;
    debug!(
        path = %path.display(),
        rows = raster.grid.rows(),
        cols = raster.grid.cols(),
        crs = ?raster.crs,
        "Read GeoTIFF"
    );
    Ok(raster)
}

fn decode<T, R>(reader: R) -> GeoTiffResult<GeoRaster<T>>
where
    T: NumCast + Copy,
    R: Read + Seek,
{
    let mut decoder = Decoder::new(reader)?.with_limits(Limits::unlimited());
    let (width, height) = decoder.dimensions()?;
    let (rows, cols) = (height as usize, width as usize);

    let transform = read_transform(&mut decoder)?;
    let nodata = decoder
        .find_tag(Tag::GdalNodata)?
        .map(|value| value.into_string())
        .transpose()?
        .and_then(|s| parse_nodata(&s));
    let crs = decoder
        .find_tag(Tag::GeoKeyDirectoryTag)?
        .map(|value| value.into_u16_vec())
        .transpose()?
        .and_then(|dir| geokeys::crs_from_directory(&dir));

    let data = match decoder.read_image()? {
        DecodingResult::F32(buf) => convert(buf, nodata)?,
        DecodingResult::F64(buf) => convert(buf, nodata)?,
        DecodingResult::U8(buf) => convert(buf, nodata)?,
        DecodingResult::U16(buf) => convert(buf, nodata)?,
        DecodingResult::U32(buf) => convert(buf, nodata)?,
        DecodingResult::I8(buf) => convert(buf, nodata)?,
        DecodingResult::I16(buf) => convert(buf, nodata)?,
        DecodingResult::I32(buf) => convert(buf, nodata)?,
        _ => {
            return Err(GeoTiffError::UnsupportedFormat(
                "unsupported TIFF pixel format".to_string(),
            ))
        }
    };

    Ok(GeoRaster {
        grid: Grid2D::from_vec(data, rows, cols)?,
        transform,
        nodata,
        crs,
    })
}

fn convert<S, T>(buf: Vec<S>, nodata: Option<f64>) -> GeoTiffResult<Vec<T>>
where
    S: NumCast + Copy + std::fmt::Debug,
    T: NumCast,
{
    buf.into_iter()
        .map(|v| {
            if let Some(t) = num_traits::cast(v) {
                return Ok(t);
            }
            let is_nodata = match (num_traits::cast::<S, f64>(v), nodata) {
                (Some(x), Some(nd)) => x == nd || (x.is_nan() && nd.is_nan()),
                _ => false,
            };
            is_nodata
                .then(|| <T as NumCast>::from(0u8))
                .flatten()
                .ok_or_else(|| {
                    GeoTiffError::UnsupportedFormat(format!("sample {v:?} is out of range"))
                })
        })
        .collect()
}

/// Transform from ModelTiepoint + ModelPixelScale (north-up only).
fn read_transform<R: Read + Seek>(decoder: &mut Decoder<R>) -> GeoTiffResult<GeoTransform> {
    let scale = decoder
        .find_tag(Tag::ModelPixelScaleTag)?
        .ok_or_else(|| GeoTiffError::MissingGeoreference("no pixel scale tag".into()))?
        .into_f64_vec()?;
    let tiepoint = decoder
        .find_tag(Tag::ModelTiepointTag)?
        .ok_or_else(|| GeoTiffError::MissingGeoreference("no tiepoint tag".into()))?
        .into_f64_vec()?;

    match (scale.as_slice(), tiepoint.as_slice()) {
        ([sx, sy, ..], [i, j, _, x, y, ..]) => Ok(GeoTransform::new(
            x - i * sx,
            y + j * sy,
            *sx,
            -sy,
        )),
        _ => Err(GeoTiffError::MissingGeoreference(format!(
            "malformed scale {scale:?} / tiepoint {tiepoint:?}"
        ))),
    }
}

fn parse_nodata(text: &str) -> Option<f64> {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    if text.eq_ignore_ascii_case("nan") {
        Some(f64::NAN)
    } else {
        text.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nodata() {
        assert!(parse_nodata("nan").is_some_and(f64::is_nan));
        assert!(parse_nodata("NaN\0").is_some_and(f64::is_nan));
        assert_eq!(parse_nodata("-1"), Some(-1.0));
        assert_eq!(parse_nodata(" -9999 "), Some(-9999.0));
        assert_eq!(parse_nodata("none"), None);
    }

    #[test]
    fn test_convert_rejects_out_of_range() {
        let ok: Vec<u8> = convert(vec![0.0f32, 1.0, 255.0], None).unwrap();
        assert_eq!(ok, vec![0, 1, 255]);
        assert!(convert::<f32, u8>(vec![f32::NAN], None).is_err());
        assert!(convert::<i16, u8>(vec![-1], None).is_err());
        assert!(convert::<i16, u8>(vec![-2], Some(-1.0)).is_err());
    }

    #[test]
    fn test_convert_maps_nodata_to_zero() {
        let mask: Vec<u8> = convert(vec![1.0f32, f32::NAN, 0.0], Some(f64::NAN)).unwrap();
        assert_eq!(mask, vec![1, 0, 0]);
        let mask: Vec<u8> = convert(vec![-9999i16, 1], Some(-9999.0)).unwrap();
        assert_eq!(mask, vec![0, 1]);
        // representable nodata passes through unchanged
        let floats: Vec<f32> = convert(vec![f32::NAN, 2.0], Some(f64::NAN)).unwrap();
        assert!(floats[0].is_nan());
        assert_eq!(floats[1], 2.0);
    }
}
