//! Binarization methods and the validating harness that drives them
//!
//! - Bernsen: local contrast with a global fallback in flat regions
//! - Niblack: local mean shifted by the local standard deviation
//! - Sauvola: local mean scaled by the normalized standard deviation
//! - Otsu 2D: global threshold from the (pixel, guide) joint histogram

pub mod algorithm;
pub mod bernsen;
pub mod niblack;
pub mod otsu;
pub mod sauvola;

pub use algorithm::{BinarizationAlgorithm, BinarizationMethod};
pub use bernsen::{Bernsen, BernsenParams};
pub use niblack::{Niblack, NiblackParams};
pub use otsu::{Guide, Otsu2D, Otsu2DParams, ThresholdPair};
pub use sauvola::{Sauvola, SauvolaParams};
