//! RustBinarize - locally-adaptive image binarization
//!
//! Converts an 8-bit grayscale image into a two-color (object/background)
//! image. Every method is driven through [`BinarizationAlgorithm`], which
//! validates the input and parameters before touching any pixel and checks
//! the output afterwards.
//!
//! Window statistics come from summed-area tables over a reflect-padded copy
//! of the image, so the cost per pixel does not depend on the window size.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Binarization methods (Bernsen, Niblack, Sauvola, Otsu 2D) and the harness
pub mod binarization;
/// Error type shared by all stages
pub mod error;
/// Core data structures (Plane, KernelSize, StructuringElement, colors)
pub mod models;
/// Image loading/saving and summaries for the command line tool
pub mod tools;
/// Statistics builders (padding, integral images, morphology, 2D histogram)
pub mod utils;

pub use binarization::{
    Bernsen, BernsenParams, BinarizationAlgorithm, BinarizationMethod, Guide, Niblack,
    NiblackParams, Otsu2D, Otsu2DParams, Sauvola, SauvolaParams,
};
pub use error::{BinarizeError, Result};
pub use models::{BinaryColorPair, KernelSize, Plane, StructuringElement};

use image::GrayImage;

/// Binarize with any method and return a fresh image
///
/// # Arguments
/// * `input` - 8-bit grayscale image, non-empty
/// * `use_white_background` - black objects on white when true, inverse otherwise
/// * `params` - method parameters
pub fn binarize<M: BinarizationMethod>(
    input: &GrayImage,
    use_white_background: bool,
    params: &M::Params,
) -> Result<GrayImage> {
    let mut output = GrayImage::new(0, 0);
    BinarizationAlgorithm::<M>::new().binarize(input, &mut output, use_white_background, params)?;
    Ok(output)
}

/// Bernsen local contrast binarization
pub fn bernsen(
    input: &GrayImage,
    use_white_background: bool,
    params: &BernsenParams,
) -> Result<GrayImage> {
    binarize::<Bernsen>(input, use_white_background, params)
}

/// Niblack binarization
pub fn niblack(
    input: &GrayImage,
    use_white_background: bool,
    params: &NiblackParams,
) -> Result<GrayImage> {
    binarize::<Niblack>(input, use_white_background, params)
}

/// Sauvola binarization
pub fn sauvola(
    input: &GrayImage,
    use_white_background: bool,
    params: &SauvolaParams,
) -> Result<GrayImage> {
    binarize::<Sauvola>(input, use_white_background, params)
}

/// Two-dimensional Otsu binarization
pub fn otsu_2d(
    input: &GrayImage,
    use_white_background: bool,
    params: &Otsu2DParams,
) -> Result<GrayImage> {
    binarize::<Otsu2D>(input, use_white_background, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convenience_functions_keep_dimensions() {
        let input = GrayImage::from_fn(12, 7, |x, y| image::Luma([((x * 19 + y * 31) % 256) as u8]));
        let kernel = KernelSize::square(5);

        let outputs = [
            bernsen(
                &input,
                true,
                &BernsenParams {
                    kernel: StructuringElement::ellipse(kernel).unwrap(),
                    ..BernsenParams::default()
                },
            )
            .unwrap(),
            niblack(
                &input,
                true,
                &NiblackParams {
                    kernel_size: kernel,
                    k: -0.2,
                },
            )
            .unwrap(),
            sauvola(
                &input,
                true,
                &SauvolaParams {
                    kernel_size: kernel,
                    ..SauvolaParams::default()
                },
            )
            .unwrap(),
            otsu_2d(
                &input,
                true,
                &Otsu2DParams {
                    guide: Guide::Average(kernel),
                    ..Otsu2DParams::default()
                },
            )
            .unwrap(),
        ];

        for output in &outputs {
            assert_eq!(output.dimensions(), (12, 7));
            assert!(output.as_raw().iter().all(|&v| v == 0 || v == 255));
        }
    }
}
