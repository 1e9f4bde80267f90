//! File-name helpers: suffix matching, output-format dispatch and
//! index-based default names.

use serde::{Deserialize, Serialize};

/// Returns true if `name` ends with `ext`, ignoring ASCII case.
///
/// `ext` is matched verbatim, so `".png"` and `"png"` are both accepted but
/// mean slightly different things (`"apng"` matches the latter).
#[must_use]
pub fn has_extension(name: &str, ext: &str) -> bool {
    if name.len() < ext.len() {
        return false;
    }
    let tail = &name.as_bytes()[name.len() - ext.len()..];
    tail.eq_ignore_ascii_case(ext.as_bytes())
}

/// Image encodings the capture pipeline can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFileFormat {
    /// Lossless 8-bit RGBA.
    Png,
    /// Quality-100 JPEG; alpha is dropped.
    Jpeg,
}

/// Suffix table consulted by [`ImageFileFormat::from_file_name`].
/// Anything not listed falls back to [`ImageFileFormat::FALLBACK`].
const SUFFIX_TABLE: &[(&str, ImageFileFormat)] = &[
    (".png", ImageFileFormat::Png),
    (".jpg", ImageFileFormat::Jpeg),
    (".jpeg", ImageFileFormat::Jpeg),
];

impl ImageFileFormat {
    /// Format used for missing or unrecognized suffixes.
    pub const FALLBACK: Self = Self::Png;

    /// Selects the encoder for a file name by case-insensitive suffix.
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        SUFFIX_TABLE
            .iter()
            .find(|(suffix, _)| has_extension(name, suffix))
            .map_or(Self::FALLBACK, |&(_, format)| format)
    }
}

/// Whether a capture written to `name` may keep a transparent background.
///
/// Only `.png` names qualify. Names falling back to PNG encoding under
/// another suffix are still written opaque.
#[must_use]
pub fn keeps_transparency(name: &str) -> bool {
    has_extension(name, ".png")
}

/// Builds the index-based default name, e.g. `screenshot_000042.png`.
#[must_use]
pub fn index_file_name(index: usize, extension: &str) -> String {
    format!("screenshot_{index:06}{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension_case_insensitive() {
        assert!(has_extension("a.PNG", ".png"));
        assert!(has_extension("shot.JpEg", ".jpeg"));
        assert!(!has_extension("a.png", ".jpg"));
        assert!(!has_extension("g", ".png"));
        assert!(has_extension(".png", ".png"));
    }

    #[test]
    fn test_format_dispatch() {
        assert_eq!(ImageFileFormat::from_file_name("a.PNG"), ImageFileFormat::Png);
        assert_eq!(ImageFileFormat::from_file_name("a.xyz"), ImageFileFormat::Png);
        assert_eq!(ImageFileFormat::from_file_name("a.jpg"), ImageFileFormat::Jpeg);
        assert_eq!(ImageFileFormat::from_file_name("a.JPEG"), ImageFileFormat::Jpeg);
        assert_eq!(ImageFileFormat::from_file_name("noext"), ImageFileFormat::Png);
        assert_eq!(ImageFileFormat::from_file_name(""), ImageFileFormat::Png);
    }

    #[test]
    fn test_keeps_transparency() {
        assert!(keeps_transparency("a.png"));
        assert!(keeps_transparency("a.PNG"));
        assert!(!keeps_transparency("a.jpg"));
        assert!(!keeps_transparency("a.xyz"));
        assert!(!keeps_transparency("noext"));
    }

    #[test]
    fn test_index_file_name() {
        assert_eq!(index_file_name(0, ".png"), "screenshot_000000.png");
        assert_eq!(index_file_name(42, ".jpg"), "screenshot_000042.jpg");
        assert_eq!(index_file_name(1_234_567, ".png"), "screenshot_1234567.png");
    }

    proptest::proptest! {
        #[test]
        fn prop_jpeg_suffix_any_case(
            stem in "[a-zA-Z0-9_]{0,12}",
            ext in proptest::sample::select(
                vec![".jpg", ".JPG", ".Jpg", ".jpeg", ".JPEG", ".jPeG"],
            ),
        ) {
            let name = format!("{stem}{ext}");
            proptest::prop_assert_eq!(
                ImageFileFormat::from_file_name(&name),
                ImageFileFormat::Jpeg
            );
        }
    }
}
