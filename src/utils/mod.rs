//! Statistics builders shared by the binarization methods
//!
//! This module provides:
//! - Reflect border padding
//! - Summed-area tables and the per-pixel window statistics engine
//! - Grayscale erosion/dilation over arbitrary structuring elements
//! - The joint (pixel, guide) histogram used by Otsu 2D

pub mod histogram;
pub mod integral;
pub mod morphology;
pub mod padding;
