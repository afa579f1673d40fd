//! Bernsen local contrast binarization
//!
//! Each pixel looks at the min/max of its neighborhood. Where the local
//! contrast is high the pixel is compared against the local mean; in flat
//! regions the local mean itself is compared against a global threshold so
//! noise in uniform areas is not amplified.

use image::GrayImage;
use tracing::debug;

use super::algorithm::BinarizationMethod;
use crate::error::{BinarizeError, Result};
use crate::models::{BinaryColorPair, KernelSize, Plane, StructuringElement};
use crate::utils::integral::construct_integral_and_iterate_anchored;
use crate::utils::morphology::local_extrema;

/// Parameters of [`Bernsen`]
#[derive(Debug, Clone, PartialEq)]
pub struct BernsenParams {
    /// Minimum local contrast for the adaptive branch, in [0, 255]
    pub contrast_limit: f64,
    /// Threshold applied to the local mean in flat regions, in [0, 255]
    pub global_threshold: f64,
    /// Neighborhood shape; the mean uses its bounding rectangle
    pub kernel: StructuringElement,
}

impl Default for BernsenParams {
    fn default() -> Self {
        Self {
            contrast_limit: 25.0,
            global_threshold: 100.0,
            kernel: StructuringElement::ellipse_unchecked(KernelSize::square(75)),
        }
    }
}

/// Bernsen binarization method
#[derive(Debug, Clone, Copy, Default)]
pub struct Bernsen;

fn ensure_intensity(name: &str, value: f64) -> Result<()> {
    if !(0.0..=255.0).contains(&value) {
        return Err(BinarizeError::bad_argument(format!(
            "{} must be in range [0, 255], got {}",
            name, value
        )));
    }
    Ok(())
}

impl BinarizationMethod for Bernsen {
    type Params = BernsenParams;
    const NAME: &'static str = "Bernsen";

    fn validate_params(&self, _input: &GrayImage, params: &BernsenParams) -> Result<()> {
        ensure_intensity("contrast limit", params.contrast_limit)?;
        ensure_intensity("global threshold", params.global_threshold)?;
        params.kernel.size().ensure_not_empty()
    }

    fn binarize_unchecked(
        &self,
        input: &GrayImage,
        use_white_background: bool,
        params: &BernsenParams,
    ) -> Result<GrayImage> {
        let colors = BinaryColorPair::for_background(use_white_background);
        let source = Plane::<u8>::from_gray(input);
        let (min_filter, max_filter) = local_extrema(&source, &params.kernel);
        debug!(
            contrast_limit = params.contrast_limit,
            global_threshold = params.global_threshold,
            kernel_cells = params.kernel.active_count(),
            "Computed Bernsen local extrema"
        );

        // Mean window shares the element's anchor
        let mut output: Plane<f64> = source.convert();
        construct_integral_and_iterate_anchored::<f64, 1, _>(
            &mut output,
            params.kernel.size(),
            params.kernel.anchor(),
            |pixel, (y, x), integral_images, vertices| {
                let local_contrast =
                    f64::from(max_filter.get(y, x)) - f64::from(min_filter.get(y, x));
                let mean = integral_images.mean(vertices);

                let is_object = if local_contrast < params.contrast_limit {
                    mean < params.global_threshold
                } else {
                    pixel < mean
                };
                f64::from(colors.pick(is_object))
            },
        )?;

        Ok(output.to_gray())
    }
}
