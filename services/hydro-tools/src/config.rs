//! Tool configuration read from environment variables.

use hydro_common::BoundingBox;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tunables shared by the subcommands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Region where the density merge always takes the modeled value
    pub merge_exclude: Option<BoundingBox>,

    /// Multiplier applied to resampled density (km/km² to m/m²)
    pub density_scale: f32,

    /// Sentinel assigned to negative source pixels before resampling
    pub source_nodata: f32,

    /// Element count above which the density variable is chunked
    pub chunk_threshold: usize,

    /// Chunk edge length for large density variables
    pub chunk_size: usize,

    /// Deflate-compress GeoTIFF output
    pub deflate: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            merge_exclude: Some(BoundingBox::new(118.835, 21.733, 122.267, 25.365)),
            density_scale: 1e-3,
            source_nodata: -1.0,
            chunk_threshold: 100_000_000,
            chunk_size: 4096,
            deflate: true,
        }
    }
}

impl ToolsConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("HYDRO_MERGE_EXCLUDE_BBOX") {
            match val.trim().to_lowercase().as_str() {
                "" | "none" => config.merge_exclude = None,
                _ => match BoundingBox::from_csv(&val) {
                    Ok(bbox) => config.merge_exclude = Some(bbox),
                    Err(e) => warn!(error = %e, "Ignoring HYDRO_MERGE_EXCLUDE_BBOX"),
                },
            }
        }

        if let Some(val) = lookup("HYDRO_DENSITY_SCALE") {
            parse_into(&val, "HYDRO_DENSITY_SCALE", &mut config.density_scale);
        }

        if let Some(val) = lookup("HYDRO_SOURCE_NODATA") {
            parse_into(&val, "HYDRO_SOURCE_NODATA", &mut config.source_nodata);
        }

        if let Some(val) = lookup("HYDRO_CHUNK_THRESHOLD") {
            // accepts scientific notation such as 1e8
            match val.trim().parse::<f64>() {
                Ok(n) if n.is_finite() && n >= 0.0 => config.chunk_threshold = n as usize,
                _ => warn!(value = %val, "Ignoring invalid HYDRO_CHUNK_THRESHOLD"),
            }
        }

        if let Some(val) = lookup("HYDRO_CHUNK_SIZE") {
            parse_into(&val, "HYDRO_CHUNK_SIZE", &mut config.chunk_size);
        }

        if let Some(val) = lookup("HYDRO_DEFLATE") {
            match val.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => config.deflate = true,
                "false" | "0" | "no" | "off" => config.deflate = false,
                _ => warn!(value = %val, "Ignoring invalid HYDRO_DEFLATE"),
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be > 0".to_string());
        }

        if !self.density_scale.is_finite() {
            return Err("density_scale must be finite".to_string());
        }

        if let Some(bbox) = &self.merge_exclude {
            if !bbox.is_valid() {
                return Err(format!("merge exclusion bbox is inverted: {bbox:?}"));
            }
        }

        Ok(())
    }

    /// Grid-file write options derived from the chunking settings.
    pub fn write_options(&self) -> gridfile::WriteOptions {
        gridfile::WriteOptions {
            chunk_threshold: self.chunk_threshold,
            chunk_size: self.chunk_size,
            ..Default::default()
        }
    }
}

fn parse_into<T: std::str::FromStr>(val: &str, key: &str, target: &mut T) {
    match val.trim().parse() {
        Ok(parsed) => *target = parsed,
        Err(_) => warn!(key, value = %val, "Ignoring invalid value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ToolsConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ToolsConfig::default());
        assert!(config.validate().is_ok());
        let (min_x, min_y, max_x, max_y) = test_utils::fixtures::bbox::MERGE_EXCLUDE;
        assert_eq!(config.merge_exclude, Some(BoundingBox::new(min_x, min_y, max_x, max_y)));
    }

    #[test]
    fn test_overrides() {
        let config = ToolsConfig::from_lookup(lookup(&[
            ("HYDRO_MERGE_EXCLUDE_BBOX", "100, 10, 101, 11"),
            ("HYDRO_DENSITY_SCALE", "1"),
            ("HYDRO_SOURCE_NODATA", "-9999"),
            ("HYDRO_CHUNK_THRESHOLD", "1e6"),
            ("HYDRO_CHUNK_SIZE", "512"),
            ("HYDRO_DEFLATE", "false"),
        ]));
        assert_eq!(config.merge_exclude, Some(BoundingBox::new(100.0, 10.0, 101.0, 11.0)));
        assert_eq!(config.density_scale, 1.0);
        assert_eq!(config.source_nodata, -9999.0);
        assert_eq!(config.chunk_threshold, 1_000_000);
        assert_eq!(config.chunk_size, 512);
        assert!(!config.deflate);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ToolsConfig::from_lookup(lookup(&[
            ("HYDRO_MERGE_EXCLUDE_BBOX", "1,2,3"),
            ("HYDRO_DENSITY_SCALE", "abc"),
            ("HYDRO_CHUNK_THRESHOLD", "-5"),
            ("HYDRO_CHUNK_SIZE", "big"),
            ("HYDRO_DEFLATE", "garbage"),
        ]));
        assert_eq!(config, ToolsConfig::default());
        assert!(config.deflate);
    }

    #[test]
    fn test_deflate_spellings() {
        for (raw, expected) in [("0", false), ("OFF", false), ("yes", true), (" 1 ", true)] {
            let config = ToolsConfig::from_lookup(lookup(&[("HYDRO_DEFLATE", raw)]));
            assert_eq!(config.deflate, expected, "HYDRO_DEFLATE={raw:?}");
        }
    }

    #[test]
    fn test_exclusion_can_be_disabled() {
        let config = ToolsConfig::from_lookup(lookup(&[("HYDRO_MERGE_EXCLUDE_BBOX", "none")]));
        assert!(config.merge_exclude.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ToolsConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.chunk_size = 16;
        config.merge_exclude = Some(BoundingBox::new(10.0, 0.0, 5.0, 1.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_write_options_follow_chunking() {
        let config = ToolsConfig {
            chunk_threshold: 10,
            chunk_size: 2,
            ..Default::default()
        };
        let options = config.write_options();
        assert_eq!(options.chunk_threshold, 10);
        assert_eq!(options.chunk_size, 2);
    }
}
