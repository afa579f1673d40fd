//! Generic driver shared by every binarization method

use image::GrayImage;
use tracing::debug;

use crate::error::{BinarizeError, Result};

/// Capability set of a binarization method.
///
/// Only [`binarize_unchecked`](Self::binarize_unchecked) is required; the
/// validators default to accepting everything.
pub trait BinarizationMethod: Default {
    /// Per-call parameters
    type Params;

    /// Short method name
    const NAME: &'static str;

    /// Extra constraints on the input image
    fn validate_input(&self, _input: &GrayImage) -> Result<()> {
        Ok(())
    }

    /// Constraints on the parameters, possibly relative to the input
    fn validate_params(&self, _input: &GrayImage, _params: &Self::Params) -> Result<()> {
        Ok(())
    }

    /// Extra constraints on the produced image
    fn validate_output(&self, _input: &GrayImage, _output: &GrayImage) -> Result<()> {
        Ok(())
    }

    /// Classify every pixel; the harness has already validated the input
    /// and the parameters
    fn binarize_unchecked(
        &self,
        input: &GrayImage,
        use_white_background: bool,
        params: &Self::Params,
    ) -> Result<GrayImage>;
}

/// Validating entry point for a binarization method
#[derive(Debug, Clone, Default)]
pub struct BinarizationAlgorithm<M: BinarizationMethod> {
    method: M,
}

impl<M: BinarizationMethod> BinarizationAlgorithm<M> {
    /// Create the algorithm with a default-constructed method
    pub fn new() -> Self {
        Self {
            method: M::default(),
        }
    }

    /// Display name, e.g. `BinarizationAlgorithm_Sauvola`
    pub fn name(&self) -> String {
        format!("BinarizationAlgorithm_{}", M::NAME)
    }

    /// Binarize `input` into `output`.
    ///
    /// With `use_white_background` objects are black on white, otherwise
    /// white on black. `output` is only replaced on success.
    pub fn binarize(
        &self,
        input: &GrayImage,
        output: &mut GrayImage,
        use_white_background: bool,
        params: &M::Params,
    ) -> Result<()> {
        let (width, height) = input.dimensions();
        if width == 0 || height == 0 {
            return Err(BinarizeError::bad_argument(format!(
                "input image is empty ({}x{})",
                width, height
            )));
        }
        self.method.validate_input(input)?;
        self.method.validate_params(input, params)?;

        debug!(method = M::NAME, width, height, use_white_background, "Binarizing");
        let result = self
            .method
            .binarize_unchecked(input, use_white_background, params)?;

        if result.dimensions() != input.dimensions() {
            return Err(BinarizeError::internal(format!(
                "output is {}x{}, input is {}x{}",
                result.width(),
                result.height(),
                width,
                height
            )));
        }
        self.method.validate_output(input, &result)?;

        *output = result;
        Ok(())
    }
}
