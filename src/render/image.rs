//! Image materialization: decode embedded bytes and store them as PNG.
//!
//! File names are derived from the slide and shape position alone, so
//! workers rendering different slides never write the same path.

use crate::error::Result;
use crate::model::ImageData;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};

/// Name of the asset directory next to the HTML file.
pub const IMAGE_DIR_NAME: &str = "images";

/// Asset file name for a picture, 1-based: `slide_3_image_1.png`.
pub fn image_file_name(slide_index: usize, shape_index: usize) -> String {
    format!("slide_{}_image_{}.png", slide_index + 1, shape_index + 1)
}

/// Reference to an asset relative to the HTML file.
pub fn image_reference(slide_index: usize, shape_index: usize) -> String {
    format!(
        "{}/{}",
        IMAGE_DIR_NAME,
        image_file_name(slide_index, shape_index)
    )
}

/// Decode `image` and write it as PNG into `asset_dir`.
///
/// Returns the path written.
pub fn materialize(
    image: &ImageData,
    asset_dir: &Path,
    slide_index: usize,
    shape_index: usize,
) -> Result<PathBuf> {
    let decoded = decode(image)?;
    let path = asset_dir.join(image_file_name(slide_index, shape_index));
    decoded.save_with_format(&path, ImageFormat::Png)?;
    Ok(path)
}

/// Decode using the declared format, falling back to content sniffing.
fn decode(image: &ImageData) -> Result<DynamicImage> {
    if let Some(format) = ImageFormat::from_extension(&image.format) {
        match image::load_from_memory_with_format(&image.bytes, format) {
            Ok(decoded) => return Ok(decoded),
            Err(e) => log::debug!(
                "Declared format '{}' did not decode ({}), guessing from content",
                image.format,
                e
            ),
        }
    }
    Ok(image::load_from_memory(&image.bytes)?)
}
