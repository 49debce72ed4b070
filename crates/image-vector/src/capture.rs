//! Build vectors from images the caller has already decoded.

use image::{ColorType, DynamicImage};

use crate::types::{BuildOptions, VisionResult};
use crate::vector::ImageVector;

/// Channel count of an interleaved 8-bit color type, or `None` for wider samples.
pub fn channel_count(color: ColorType) -> Option<usize> {
    match color {
        ColorType::L8 => Some(1),
        ColorType::La8 => Some(2),
        ColorType::Rgb8 => Some(3),
        ColorType::Rgba8 => Some(4),
        _ => None,
    }
}

/// Build a vector from a decoded image using default options.
pub fn from_image(img: &DynamicImage) -> VisionResult<ImageVector> {
    from_image_with(img, &BuildOptions::default())
}

/// Build a vector from a decoded image.
///
/// 8-bit images are read in their own channel layout. Wider samples are
/// narrowed to the 8-bit layout with the same channels, so a picture yields
/// the same dimensions whatever its sample depth.
pub fn from_image_with(img: &DynamicImage, options: &BuildOptions) -> VisionResult<ImageVector> {
    let color = img.color();
    if let Some(channels) = channel_count(color) {
        let bytes = img.as_bytes();
        return ImageVector::build_with(bytes, bytes.len(), channels, options);
    }

    tracing::debug!(?color, "Narrowing image samples to 8 bits");
    let (bytes, channels) = match (color.has_color(), color.has_alpha()) {
        (false, false) => (img.to_luma8().into_raw(), 1),
        (false, true) => (img.to_luma_alpha8().into_raw(), 2),
        (true, false) => (img.to_rgb8().into_raw(), 3),
        (true, true) => (img.to_rgba8().into_raw(), 4),
    };
    ImageVector::build_with(&bytes, bytes.len(), channels, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VisionError;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

    #[test]
    fn test_channel_counts() {
        assert_eq!(channel_count(ColorType::L8), Some(1));
        assert_eq!(channel_count(ColorType::La8), Some(2));
        assert_eq!(channel_count(ColorType::Rgb8), Some(3));
        assert_eq!(channel_count(ColorType::Rgba8), Some(4));
        assert_eq!(channel_count(ColorType::Rgb16), None);
        assert_eq!(channel_count(ColorType::Rgba32F), None);
    }

    #[test]
    fn test_black_rgb_image() {
        let img = DynamicImage::new_rgb8(10, 10);
        let v = from_image(&img).unwrap();
        let expected = -1.0 / 3.0f64.sqrt();
        assert_eq!(v.dimensions(), 3);
        assert!(v.iter().all(|c| (c - expected).abs() < 1e-9));
    }

    #[test]
    fn test_white_gray_image() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([255])));
        let v = from_image(&img).unwrap();
        assert_eq!(v.components(), &[1.0]);
    }

    #[test]
    fn test_wide_images_keep_their_channels() {
        assert_eq!(from_image(&DynamicImage::new_luma16(3, 3)).unwrap().dimensions(), 1);
        assert_eq!(from_image(&DynamicImage::new_luma_a16(3, 3)).unwrap().dimensions(), 2);
        assert_eq!(from_image(&DynamicImage::new_rgb16(3, 3)).unwrap().dimensions(), 3);
        assert_eq!(from_image(&DynamicImage::new_rgb32f(3, 3)).unwrap().dimensions(), 3);
        assert_eq!(from_image(&DynamicImage::new_rgba16(3, 3)).unwrap().dimensions(), 4);
        assert_eq!(from_image(&DynamicImage::new_rgba32f(3, 3)).unwrap().dimensions(), 4);
    }

    #[test]
    fn test_rgb16_matches_rgb8() {
        let narrow = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([200, 10, 90])));
        let wide = DynamicImage::ImageRgb16(ImageBuffer::from_pixel(
            2,
            2,
            Rgb([200u16 * 257, 10 * 257, 90 * 257]),
        ));

        let a = from_image(&narrow).unwrap();
        let b = from_image(&wide).unwrap();
        assert_eq!(b.dimensions(), 3);
        assert!(a.diff(&b).unwrap() < 1e-9);
    }

    #[test]
    fn test_mid_gray_image_is_degenerate() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([128, 128, 128])));
        let err = from_image(&img).unwrap_err();
        assert!(matches!(err, VisionError::DegenerateVector { channels: 3 }));

        let v = from_image_with(&img, &BuildOptions::zero_on_degenerate()).unwrap();
        assert!(v.is_zero());
    }

    #[test]
    fn test_same_image_diff_is_zero() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 5, Rgb([200, 10, 90])));
        let a = from_image(&img).unwrap();
        let b = from_image(&img).unwrap();
        assert_eq!(a.diff(&b).unwrap(), 0.0);
    }
}
