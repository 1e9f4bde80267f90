//! Configuration options for screenshot capture.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::file_name::{keeps_transparency, ImageFileFormat};

/// How a capture without an explicit file name picks its output name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DefaultNamePolicy {
    /// Ask the platform save dialog for a base name.
    #[default]
    Dialog,
    /// Use `screenshot_NNNNNN` with the persistent screenshot index.
    Index,
}

/// What to do when the save dialog returns an empty path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmptyNamePolicy {
    /// Treat the empty result as a cancellation; nothing is written.
    #[default]
    Cancel,
    /// Write a file named only by the default extension (e.g. `.png`).
    ExtensionOnly,
}

/// Options controlling screenshot naming and encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    /// Extension appended to default names, including the dot.
    pub screenshot_extension: String,

    /// Default-name strategy when no file name is given.
    pub default_name_policy: DefaultNamePolicy,

    /// Handling of an empty save-dialog result.
    pub empty_name_policy: EmptyNamePolicy,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            screenshot_extension: ".png".to_string(),
            default_name_policy: DefaultNamePolicy::Dialog,
            empty_name_policy: EmptyNamePolicy::Cancel,
        }
    }
}

impl CaptureOptions {
    /// Parses options from JSON. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Encoder selected by the default extension.
    pub fn default_format(&self) -> ImageFileFormat {
        ImageFileFormat::from_file_name(&self.screenshot_extension)
    }

    /// Whether a transparent background can be honored for default-named captures.
    pub fn default_supports_transparency(&self) -> bool {
        keeps_transparency(&self.screenshot_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = CaptureOptions::default();
        assert_eq!(opts.screenshot_extension, ".png");
        assert_eq!(opts.default_name_policy, DefaultNamePolicy::Dialog);
        assert_eq!(opts.empty_name_policy, EmptyNamePolicy::Cancel);
        assert!(opts.default_supports_transparency());
    }

    #[test]
    fn test_jpeg_extension_disables_transparency() {
        let opts = CaptureOptions {
            screenshot_extension: ".JPG".to_string(),
            ..CaptureOptions::default()
        };
        assert_eq!(opts.default_format(), ImageFileFormat::Jpeg);
        assert!(!opts.default_supports_transparency());
    }

    #[test]
    fn test_fallback_extension_disables_transparency() {
        let opts = CaptureOptions {
            screenshot_extension: ".xyz".to_string(),
            ..CaptureOptions::default()
        };
        assert_eq!(opts.default_format(), ImageFileFormat::Png);
        assert!(!opts.default_supports_transparency());
    }

    #[test]
    fn test_json_partial() {
        let opts =
            CaptureOptions::from_json_str(r#"{ "default_name_policy": "Index" }"#).unwrap();
        assert_eq!(opts.default_name_policy, DefaultNamePolicy::Index);
        assert_eq!(opts.screenshot_extension, ".png");
    }

    #[test]
    fn test_json_round_trip() {
        let opts = CaptureOptions {
            screenshot_extension: ".jpeg".to_string(),
            default_name_policy: DefaultNamePolicy::Index,
            empty_name_policy: EmptyNamePolicy::ExtensionOnly,
        };
        let json = opts.to_json_string().unwrap();
        assert_eq!(CaptureOptions::from_json_str(&json).unwrap(), opts);
    }

    #[test]
    fn test_json_error() {
        assert!(CaptureOptions::from_json_str("{ not json").is_err());
    }
}
