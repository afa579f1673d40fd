//! Sauvola document binarization
//!
//! `threshold = mean * (1 + k * (stddev / r - 1))` where `r` is the expected
//! dynamic range of the standard deviation. Pixels strictly above the
//! threshold are background; ties are objects.

use image::GrayImage;
use tracing::debug;

use super::algorithm::BinarizationMethod;
use crate::error::{BinarizeError, Result};
use crate::models::{BinaryColorPair, KernelSize, Plane};
use crate::utils::integral::construct_integral_and_iterate;

/// Parameters of [`Sauvola`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SauvolaParams {
    /// Window size, area must be > 0
    pub kernel_size: KernelSize,
    /// Sensitivity, usually around 0.2
    pub k: f64,
    /// Dynamic range of the standard deviation, in [0, 255]
    pub r: f64,
}

impl Default for SauvolaParams {
    fn default() -> Self {
        Self {
            kernel_size: KernelSize::square(75),
            k: 0.2,
            r: 128.0,
        }
    }
}

/// Sauvola binarization method
#[derive(Debug, Clone, Copy, Default)]
pub struct Sauvola;

impl BinarizationMethod for Sauvola {
    type Params = SauvolaParams;
    const NAME: &'static str = "Sauvola";

    fn validate_params(&self, _input: &GrayImage, params: &SauvolaParams) -> Result<()> {
        params.kernel_size.ensure_not_empty()?;
        if !(0.0..=255.0).contains(&params.r) {
            return Err(BinarizeError::bad_argument(format!(
                "r must be in range [0, 255], got {}",
                params.r
            )));
        }
        Ok(())
    }

    fn binarize_unchecked(
        &self,
        input: &GrayImage,
        use_white_background: bool,
        params: &SauvolaParams,
    ) -> Result<GrayImage> {
        debug!(k = params.k, r = params.r, kernel = ?params.kernel_size, "Sauvola");
        let colors = BinaryColorPair::for_background(use_white_background);
        let mut output = Plane::<f64>::from_gray(input);

        construct_integral_and_iterate::<f64, 2, _>(
            &mut output,
            params.kernel_size,
            |pixel, _, integral_images, vertices| {
                let (mean, stddev) = integral_images.mean_stddev(vertices);
                let threshold = mean * (1.0 + params.k * (stddev / params.r - 1.0));
                let is_background = pixel > threshold;
                f64::from(colors.pick(!is_background))
            },
        )?;

        Ok(output.to_gray())
    }
}
