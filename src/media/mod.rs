/// Reference image media handling
///
/// This module handles:
/// - Reading picked files and validating them as images (loader.rs)
/// - Downscaling to preview thumbnails (loader.rs)
/// - The lifecycle of revocable preview handles (preview.rs)

pub mod loader;
pub mod preview;
