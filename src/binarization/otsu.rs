//! Two-dimensional Otsu binarization
//!
//! Builds the joint histogram of each pixel against a guide image (by
//! default its local average) and picks the threshold pair `(s, t)` that
//! maximizes the between-class score of the lower-left (object) and
//! upper-right (background) quadrants:
//!
//! ```text
//!   guide
//!   255 +------+----------------+
//!       |  D   |       C        |   A: object      B: edge
//!     t +------+----------------+   C: background  D: noise
//!       |  A   |       B        |
//!     0 +------+----------------+ pixel
//!       0      s               255
//! ```
//!
//! The edge and noise regions are folded into a single global threshold
//! according to the configured roles.

use image::GrayImage;
use rayon::prelude::*;
use tracing::debug;

use super::algorithm::BinarizationMethod;
use crate::error::{BinarizeError, Result};
use crate::models::{BinaryColorPair, KernelSize, Plane};
use crate::utils::histogram::{Histogram2D, LEVELS};
use crate::utils::integral::box_mean;

/// Source of the guide image
#[derive(Debug, Clone, PartialEq)]
pub enum Guide {
    /// Local average of the input over a window of this size
    Average(KernelSize),
    /// Caller-supplied guide, same dimensions as the input
    Image(GrayImage),
}

/// Parameters of [`Otsu2D`]
#[derive(Debug, Clone, PartialEq)]
pub struct Otsu2DParams {
    /// Guide image used as the second histogram axis
    pub guide: Guide,
    /// Treat the edge region (bright pixel, dark guide) as background
    pub edge_role_as_background: bool,
    /// Treat the noise region (dark pixel, bright guide) as background
    pub noise_role_as_background: bool,
}

impl Default for Otsu2DParams {
    fn default() -> Self {
        Self {
            guide: Guide::Average(KernelSize::square(75)),
            edge_role_as_background: false,
            noise_role_as_background: true,
        }
    }
}

/// Threshold pair over (pixel, guide) intensities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThresholdPair {
    /// Pixel intensity threshold
    pub s: u8,
    /// Guide intensity threshold
    pub t: u8,
}

impl ThresholdPair {
    /// Collapse the pair into one threshold given where edge and noise go
    pub fn fold(self, edge_role_as_background: bool, noise_role_as_background: bool) -> u8 {
        match (edge_role_as_background, noise_role_as_background) {
            // object: A, background: B + C + D
            (true, true) => self.s.max(self.t),
            // object: A + D, background: B + C
            (true, false) => self.s,
            // object: A + B, background: C + D
            (false, true) => self.t,
            // object: A + B + D, background: C
            (false, false) => self.s.min(self.t),
        }
    }
}

/// Exhaustive search of the pair maximizing the between-class score.
///
/// Pairs with an empty object quadrant are skipped. The background quadrant
/// only shrinks as `t` grows, so the inner loop stops once it is empty.
pub fn search_threshold_pair(histogram: &Histogram2D) -> ThresholdPair {
    let mut best = ThresholdPair::default();
    let mut max_score = 0.0f64;

    for s in 0..LEVELS {
        for t in 0..LEVELS {
            let lower = histogram.below(s, t);
            let w0 = lower.weight;
            if !(w0 > f64::EPSILON) {
                continue;
            }

            let upper = histogram.above(s, t);
            let w1 = upper.weight;
            if !(w1 > f64::EPSILON) {
                break;
            }

            let u0 = (lower.pixel_moment + lower.guide_moment) / (w0 + w0);
            let u1 = (upper.pixel_moment + upper.guide_moment) / (w1 + w1);
            let ut = w0 * u0 + w1 * u1;

            let score = w0 * (ut - u0) * (ut - u0) + w1 * (ut - u1) * (ut - u1);
            if score > max_score {
                max_score = score;
                best = ThresholdPair {
                    s: s as u8,
                    t: t as u8,
                };
            }
        }
    }

    best
}

/// 2D Otsu binarization method
#[derive(Debug, Clone, Copy, Default)]
pub struct Otsu2D;

impl Otsu2D {
    fn guide_plane(source: &Plane<u8>, guide: &Guide) -> Result<Plane<u8>> {
        match guide {
            Guide::Average(kernel_size) => Ok(box_mean(source, *kernel_size)?.convert()),
            Guide::Image(image) => Ok(Plane::from_gray(image)),
        }
    }

    /// Threshold that would be applied to `input`
    pub fn threshold(input: &GrayImage, params: &Otsu2DParams) -> Result<u8> {
        let source = Plane::<u8>::from_gray(input);
        let guide = Self::guide_plane(&source, &params.guide)?;
        let histogram = Histogram2D::build(&source, &guide)?;
        let pair = search_threshold_pair(&histogram);
        let threshold = pair.fold(
            params.edge_role_as_background,
            params.noise_role_as_background,
        );
        debug!(s = pair.s, t = pair.t, threshold, "Otsu 2D threshold pair");
        Ok(threshold)
    }
}

impl BinarizationMethod for Otsu2D {
    type Params = Otsu2DParams;
    const NAME: &'static str = "Otsu2D";

    fn validate_params(&self, input: &GrayImage, params: &Otsu2DParams) -> Result<()> {
        match &params.guide {
            Guide::Average(kernel_size) => kernel_size.ensure_not_empty(),
            Guide::Image(guide) if guide.dimensions() != input.dimensions() => {
                Err(BinarizeError::bad_argument(format!(
                    "guide image is {}x{}, input is {}x{}",
                    guide.width(),
                    guide.height(),
                    input.width(),
                    input.height()
                )))
            }
            Guide::Image(_) => Ok(()),
        }
    }

    fn binarize_unchecked(
        &self,
        input: &GrayImage,
        use_white_background: bool,
        params: &Otsu2DParams,
    ) -> Result<GrayImage> {
        let colors = BinaryColorPair::for_background(use_white_background);
        let threshold = Self::threshold(input, params)?;

        let len = input.width() as usize * input.height() as usize;
        let mut samples = input.as_raw()[..len].to_vec();
        samples
            .par_iter_mut()
            .for_each(|pixel| *pixel = colors.pick(*pixel <= threshold));

        GrayImage::from_raw(input.width(), input.height(), samples)
            .ok_or_else(|| BinarizeError::internal("thresholded buffer does not match input size"))
    }
}
