//! Image loading and pixel sampling
//!
//! Images are decoded with the `image` crate and normalized to 8-bit RGB
//! (alpha is dropped), so sampled channels are always in red, green, blue
//! order regardless of the source format.
//!
//! ## Supported Formats
//!
//! JPEG, PNG, GIF (first frame), WebP, TIFF, BMP, ICO, TGA, OpenEXR,
//! PNM, QOI, HDR

use std::io::Cursor;
use std::path::Path;

use image::{ImageReader, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::RgbTriple;
use crate::error::{InspectorError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    /// GIF image (first frame only)
    Gif,
    WebP,
    Tiff,
    Bmp,
    Ico,
    Tga,
    /// OpenEXR image
    Exr,
    /// PNM image (PBM, PGM, PPM)
    Pnm,
    Qoi,
    Hdr,
}

/// Recognized file extensions, lowercase
const EXTENSIONS: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("gif", ImageFormat::Gif),
    ("webp", ImageFormat::WebP),
    ("tiff", ImageFormat::Tiff),
    ("tif", ImageFormat::Tiff),
    ("bmp", ImageFormat::Bmp),
    ("ico", ImageFormat::Ico),
    ("tga", ImageFormat::Tga),
    ("exr", ImageFormat::Exr),
    ("pbm", ImageFormat::Pnm),
    ("pgm", ImageFormat::Pnm),
    ("ppm", ImageFormat::Pnm),
    ("pnm", ImageFormat::Pnm),
    ("qoi", ImageFormat::Qoi),
    ("hdr", ImageFormat::Hdr),
];

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|&(_, format)| format)
    }
}

/// All recognized file extensions
pub fn supported_extensions() -> impl Iterator<Item = &'static str> {
    EXTENSIONS.iter().map(|&(ext, _)| ext)
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Ico => image::ImageFormat::Ico,
            ImageFormat::Tga => image::ImageFormat::Tga,
            ImageFormat::Exr => image::ImageFormat::OpenExr,
            ImageFormat::Pnm => image::ImageFormat::Pnm,
            ImageFormat::Qoi => image::ImageFormat::Qoi,
            ImageFormat::Hdr => image::ImageFormat::Hdr,
        }
    }
}

/// One pixel read from a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSample {
    pub x: u32,
    pub y: u32,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl PixelSample {
    pub fn rgb(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<PixelSample> for RgbTriple {
    fn from(sample: PixelSample) -> Self {
        sample.rgb().into()
    }
}

/// Load an image from disk as 8-bit RGB
///
/// # Errors
///
/// Returns `InspectorError::ImageLoadError` if:
/// - The extension is not a supported format
/// - File cannot be opened
/// - Decoding fails or the image has no pixels
///
/// # Example
///
/// ```rust,no_run
/// use pixel_inspector::image_loader::load_image;
/// use std::path::Path;
///
/// let image = load_image(Path::new("photo.jpg"))?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), pixel_inspector::InspectorError>(())
/// ```
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let format = ImageFormat::from_extension(path).ok_or_else(|| InspectorError::ImageLoadError {
        message: format!(
            "Unknown image format for file: {} (supported: {})",
            path.display(),
            supported_extensions().collect::<Vec<_>>().join(", ")
        ),
        source: None,
    })?;

    let mut reader = ImageReader::open(path).map_err(|e| {
        InspectorError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;
    reader.set_format(format.into());

    let img = reader.decode().map_err(|e| {
        InspectorError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    debug!(path = %path.display(), ?format, width = img.width(), height = img.height(), "decoded image");
    non_empty(img.to_rgb8())
}

/// Decode an in-memory image, e.g. an uploaded file, guessing the format from its content
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<RgbImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| InspectorError::image_load("Failed to read image data", e))?;

    if reader.format().is_none() {
        return Err(InspectorError::ImageLoadError {
            message: "Unrecognized image data".to_string(),
            source: None,
        });
    }

    let img = reader
        .decode()
        .map_err(|e| InspectorError::image_load("Failed to decode image data", e))?;
    non_empty(img.to_rgb8())
}

fn non_empty(image: RgbImage) -> Result<RgbImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(InspectorError::ImageLoadError {
            message: "Image has no pixels".to_string(),
            source: None,
        });
    }
    Ok(image)
}

/// Default coordinate: the image center
pub fn center_of(image: &RgbImage) -> (u32, u32) {
    (image.width() / 2, image.height() / 2)
}

/// Fill in whichever coordinate was not given with the center's
pub fn pixel_or_center(image: &RgbImage, x: Option<u32>, y: Option<u32>) -> (u32, u32) {
    let (center_x, center_y) = center_of(image);
    (x.unwrap_or(center_x), y.unwrap_or(center_y))
}

/// Read the pixel at (x, y)
///
/// # Errors
///
/// Returns `InspectorError::CoordinateOutOfBounds` if x >= width or y >= height
pub fn sample_pixel(image: &RgbImage, x: u32, y: u32) -> Result<PixelSample> {
    let [red, green, blue] = image
        .get_pixel_checked(x, y)
        .ok_or(InspectorError::CoordinateOutOfBounds {
            x,
            y,
            width: image.width(),
            height: image.height(),
        })?
        .0;

    Ok(PixelSample {
        x,
        y,
        red,
        green,
        blue,
    })
}
