use image::GrayImage;
use tracing::debug;

use super::algorithm::BinarizationMethod;
use crate::error::{BinarizeError, Result};
use crate::models::{BinaryColorPair, KernelSize, Plane};
use crate::utils::integral::construct_integral_and_iterate;

/// Parameters of [`Niblack`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NiblackParams {
    /// Window size, area must be > 0
    pub kernel_size: KernelSize,
    /// Weight of the local standard deviation, usually negative
    pub k: f64,
}

impl Default for NiblackParams {
    fn default() -> Self {
        Self {
            kernel_size: KernelSize::square(75),
            k: -0.2,
        }
    }
}

/// Niblack binarization: `threshold = mean + k * stddev`, pixels strictly
/// below the threshold are objects
#[derive(Debug, Clone, Copy, Default)]
pub struct Niblack;

impl BinarizationMethod for Niblack {
    type Params = NiblackParams;
    const NAME: &'static str = "Niblack";

    fn validate_params(&self, _input: &GrayImage, params: &NiblackParams) -> Result<()> {
        params.kernel_size.ensure_not_empty()?;
        if !params.k.is_finite() {
            return Err(BinarizeError::bad_argument(format!(
                "k must be finite, got {}",
                params.k
            )));
        }
        Ok(())
    }

    fn binarize_unchecked(
        &self,
        input: &GrayImage,
        use_white_background: bool,
        params: &NiblackParams,
    ) -> Result<GrayImage> {
        debug!(k = params.k, kernel = ?params.kernel_size, "Niblack");
        let colors = BinaryColorPair::for_background(use_white_background);
        let mut output = Plane::<f64>::from_gray(input);

        construct_integral_and_iterate::<f64, 2, _>(
            &mut output,
            params.kernel_size,
            |pixel, _, integral_images, vertices| {
                let (mean, stddev) = integral_images.mean_stddev(vertices);
                let threshold = mean + params.k * stddev;
                f64::from(colors.pick(pixel < threshold))
            },
        )?;

        Ok(output.to_gray())
    }
}
