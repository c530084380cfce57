/// Reference image loader
///
/// Reads user-picked files off disk and turns them into `SourceImage`s:
/// the raw encoded bytes plus a downscaled RGBA thumbnail for the preview.
/// Decoding is CPU-bound, so it runs on the blocking pool.
use image::{imageops::FilterType, GenericImageView, ImageFormat};
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::StudioError;

/// File extensions offered by the picker and accepted from drag-and-drop
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Check if a path looks like an image by extension
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Downscaled RGBA pixels backing a preview handle
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, `width * height * 4` bytes
    pub rgba: Vec<u8>,
}

/// One user-selected image, validated and ready to attach
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Filename only (e.g., "sunset.png")
    pub file_name: String,
    /// The encoded file content, exactly as read
    pub bytes: Vec<u8>,
    /// Format sniffed from the content, not the extension
    pub format: ImageFormat,
    /// Original (width, height)
    pub dimensions: (u32, u32),
    pub thumbnail: Thumbnail,
}

impl SourceImage {
    /// Validate and decode encoded image bytes
    ///
    /// The thumbnail fits inside `preview_size` x `preview_size`; smaller
    /// images are kept at their own size.
    pub fn from_bytes(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        preview_size: u32,
    ) -> Result<Self, StudioError> {
        let file_name = file_name.into();

        let format = image::guess_format(&bytes).map_err(|_| StudioError::UnsupportedImage {
            name: file_name.clone(),
        })?;

        let img = image::load_from_memory_with_format(&bytes, format).map_err(|e| {
            StudioError::Decode {
                name: file_name.clone(),
                reason: e.to_string(),
            }
        })?;

        let dimensions = img.dimensions();
        let scaled = if dimensions.0 > preview_size || dimensions.1 > preview_size {
            img.resize(preview_size, preview_size, FilterType::Lanczos3)
        } else {
            img
        };
        let rgba = scaled.to_rgba8();

        Ok(Self {
            file_name,
            format,
            dimensions,
            thumbnail: Thumbnail {
                width: rgba.width(),
                height: rgba.height(),
                rgba: rgba.into_raw(),
            },
            bytes,
        })
    }

    /// Size of the encoded content in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Load every picked file, preserving the order of `paths`
///
/// Each file succeeds or fails on its own; the caller decides what to do
/// with a mixed result.
pub async fn load_sources(
    paths: Vec<PathBuf>,
    preview_size: u32,
    max_file_bytes: u64,
) -> Vec<Result<SourceImage, StudioError>> {
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        results.push(load_source(path, preview_size, max_file_bytes).await);
    }
    results
}

/// Load a single image file
pub async fn load_source(
    path: PathBuf,
    preview_size: u32,
    max_file_bytes: u64,
) -> Result<SourceImage, StudioError> {
    let io_error = |e: std::io::Error| StudioError::Io {
        path: path.clone(),
        reason: e.to_string(),
    };

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let size = tokio::fs::metadata(&path).await.map_err(io_error)?.len();
    if size > max_file_bytes {
        return Err(StudioError::FileTooLarge {
            name: file_name,
            size,
            limit: max_file_bytes,
        });
    }

    let bytes = tokio::fs::read(&path).await.map_err(io_error)?;

    let name = file_name.clone();
    let source = task::spawn_blocking(move || SourceImage::from_bytes(name, bytes, preview_size))
        .await
        .map_err(|e| StudioError::Decode {
            name: file_name,
            reason: format!("task join error: {e}"),
        })??;

    tracing::debug!(
        "🖼️  Loaded {} ({:?}, {}x{}, {} bytes)",
        source.file_name,
        source.format,
        source.dimensions.0,
        source.dimensions.1,
        source.size()
    );
    Ok(source)
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encode a solid-color PNG in memory
    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([120, 60, 200, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// A small decoded source image named `name`
    pub fn source(name: &str) -> super::SourceImage {
        super::SourceImage::from_bytes(name, png_bytes(4, 3), 256).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::png_bytes;
    use super::*;

    #[test]
    fn test_extension_filter() {
        assert!(has_image_extension(Path::new("/tmp/a.PNG")));
        assert!(has_image_extension(Path::new("b.jpeg")));
        assert!(!has_image_extension(Path::new("notes.txt")));
        assert!(!has_image_extension(Path::new("no_extension")));
    }

    #[test]
    fn test_small_image_keeps_size() {
        let source = SourceImage::from_bytes("tiny.png", png_bytes(4, 3), 256).unwrap();
        assert_eq!(source.format, ImageFormat::Png);
        assert_eq!(source.dimensions, (4, 3));
        assert_eq!((source.thumbnail.width, source.thumbnail.height), (4, 3));
        assert_eq!(source.thumbnail.rgba.len(), 4 * 3 * 4);
    }

    #[test]
    fn test_large_image_is_downscaled() {
        let source = SourceImage::from_bytes("wide.png", png_bytes(400, 200), 100).unwrap();
        assert_eq!(source.dimensions, (400, 200));

        // Aspect ratio is preserved inside the bounding box
        assert_eq!(source.thumbnail.width, 100);
        assert_eq!(source.thumbnail.height, 50);
    }

    #[test]
    fn test_non_image_rejected() {
        let err = SourceImage::from_bytes("notes.txt", b"just some text".to_vec(), 256)
            .unwrap_err();
        assert_eq!(
            err,
            StudioError::UnsupportedImage {
                name: "notes.txt".into()
            }
        );
    }

    #[test]
    fn test_truncated_image_fails_decode() {
        let mut bytes = png_bytes(8, 8);
        bytes.truncate(40);
        let err = SourceImage::from_bytes("broken.png", bytes, 256).unwrap_err();
        assert!(matches!(err, StudioError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_load_sources_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.png");
        let second = dir.path().join("second.png");
        std::fs::write(&first, png_bytes(2, 2)).unwrap();
        std::fs::write(&second, png_bytes(3, 3)).unwrap();

        let results = load_sources(vec![first, second], 256, 1024 * 1024).await;
        let names: Vec<_> = results
            .into_iter()
            .map(|r| r.unwrap().file_name)
            .collect();
        assert_eq!(names, vec!["first.png", "second.png"]);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_source(dir.path().join("gone.png"), 256, 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        std::fs::write(&path, png_bytes(16, 16)).unwrap();

        let err = load_source(path, 256, 10).await.unwrap_err();
        assert!(matches!(err, StudioError::FileTooLarge { limit: 10, .. }));
    }
}
