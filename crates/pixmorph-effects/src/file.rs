//! Selected-file model and the image type allow-list.
//!
//! Validation is by declared MIME type only; the bytes are never
//! sniffed or decoded on the client.

use std::fmt;
use std::sync::Arc;

use crate::error::FileError;

/// Filename offered for every downloaded result, regardless of the
/// encoding the backend actually returned.
pub const DOWNLOAD_FILENAME: &str = "transformed.png";

/// Accepted image types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMime {
    /// `image/jpeg`
    Jpeg,
    /// `image/jpg` (non-standard, but sent by some platforms)
    Jpg,
    /// `image/png`
    Png,
    /// `image/webp`
    Webp,
}

impl ImageMime {
    pub const ALL: [Self; 4] = [Self::Jpeg, Self::Jpg, Self::Png, Self::Webp];

    /// Value for an `<input type="file" accept=...>` attribute.
    pub const ACCEPT: &str = "image/jpeg,image/jpg,image/png,image/webp";

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Jpg => "image/jpg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    /// Match a declared MIME type against the allow-list (ASCII
    /// case-insensitive).
    #[must_use]
    pub fn from_mime(declared: &str) -> Option<Self> {
        let declared = declared.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(declared))
    }

    /// Infer a type from a filename extension, for callers that have no
    /// declared MIME type (the command-line client).
    #[must_use]
    pub fn from_extension(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image chosen by the user, already checked against the allow-list.
///
/// Cloning is cheap: the bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime: ImageMime,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    /// Accept a file whose declared MIME type is on the allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::UnsupportedType`] for any other type.
    pub fn new(
        name: impl Into<String>,
        declared_mime: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Self, FileError> {
        let name = name.into();
        let Some(mime) = ImageMime::from_mime(declared_mime) else {
            return Err(FileError::UnsupportedType {
                name,
                mime: declared_mime.to_owned(),
            });
        };
        Ok(Self {
            name,
            mime,
            bytes: bytes.into(),
        })
    }

    /// Accept a file by its extension.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::UnsupportedType`] when the extension is
    /// missing or not an accepted image type.
    pub fn from_extension(
        name: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Self, FileError> {
        let name = name.into();
        let Some(mime) = ImageMime::from_extension(&name) else {
            let ext = name
                .rsplit_once('.')
                .map_or_else(String::new, |(_, ext)| ext.to_owned());
            return Err(FileError::UnsupportedType { name, mime: ext });
        };
        Ok(Self {
            name,
            mime,
            bytes: bytes.into(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn mime(&self) -> ImageMime {
        self.mime
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Prints the byte count instead of the bytes.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_accepts_jpeg_png_webp() {
        for declared in ["image/jpeg", "image/jpg", "image/png", "image/webp"] {
            assert!(
                ImageMime::from_mime(declared).is_some(),
                "{declared} should be accepted"
            );
        }
    }

    #[test]
    fn allow_list_rejects_other_types() {
        for declared in ["image/gif", "image/bmp", "image/svg+xml", "text/plain", ""] {
            assert_eq!(ImageMime::from_mime(declared), None, "{declared}");
        }
    }

    #[test]
    fn mime_match_ignores_case() {
        assert_eq!(ImageMime::from_mime("IMAGE/PNG"), Some(ImageMime::Png));
    }

    #[test]
    fn accept_attribute_lists_every_type() {
        for mime in ImageMime::ALL {
            assert!(ImageMime::ACCEPT.split(',').any(|a| a == mime.as_str()));
        }
    }

    #[test]
    fn extension_inference() {
        assert_eq!(ImageMime::from_extension("a.JPG"), Some(ImageMime::Jpeg));
        assert_eq!(ImageMime::from_extension("a.jpeg"), Some(ImageMime::Jpeg));
        assert_eq!(ImageMime::from_extension("dir.v2/a.webp"), Some(ImageMime::Webp));
        assert_eq!(ImageMime::from_extension("a.gif"), None);
        assert_eq!(ImageMime::from_extension("png"), None);
    }

    #[test]
    fn selected_file_keeps_name_type_and_bytes() {
        let file = SelectedFile::new("photo.png", "image/png", vec![1u8, 2, 3]).unwrap();
        assert_eq!(file.name(), "photo.png");
        assert_eq!(file.mime(), ImageMime::Png);
        assert_eq!(file.bytes(), &[1, 2, 3]);
        assert_eq!(file.len(), 3);
    }

    #[test]
    fn selected_file_rejects_gif() {
        let err = SelectedFile::new("cat.gif", "image/gif", vec![0x47u8]).unwrap_err();
        assert_eq!(
            err,
            FileError::UnsupportedType {
                name: "cat.gif".into(),
                mime: "image/gif".into()
            }
        );
    }

    #[test]
    fn declared_type_wins_over_extension() {
        // Only the declared type is checked.
        assert!(SelectedFile::new("cat.gif", "image/png", vec![0u8]).is_ok());
        assert!(SelectedFile::new("cat.png", "image/gif", vec![0u8]).is_err());
    }

    #[test]
    fn from_extension_reports_extension_on_rejection() {
        let err = SelectedFile::from_extension("anim.gif", vec![0u8]).unwrap_err();
        assert!(matches!(err, FileError::UnsupportedType { ref mime, .. } if mime == "gif"));
    }

    #[test]
    fn debug_elides_bytes() {
        let file = SelectedFile::new("a.webp", "image/webp", vec![0u8; 1024]).unwrap();
        let dbg = format!("{file:?}");
        assert!(dbg.contains("len: 1024"));
        assert!(!dbg.contains("[0, 0"));
    }
}
