//! Joint intensity histogram of an image against a guide image, with the
//! cumulative tables needed by the 2D Otsu search

use crate::error::{BinarizeError, Result};
use crate::models::Plane;
use crate::utils::integral::SummedAreaTable;

/// Number of intensity levels of an 8-bit sample
pub const LEVELS: usize = 256;

/// 256×256 counts of `(pixel, guide)` pairs
#[derive(Debug, Clone)]
pub struct Histogram2D {
    counts: Vec<f64>,
    /// Cumulative counts `P`
    weights: SummedAreaTable,
    /// Cumulative counts weighted by pixel intensity (`X`)
    pixel_moments: SummedAreaTable,
    /// Cumulative counts weighted by guide intensity (`Y`)
    guide_moments: SummedAreaTable,
}

/// Sums over one region of the joint histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSums {
    /// Pixel count
    pub weight: f64,
    /// Sum of pixel intensities
    pub pixel_moment: f64,
    /// Sum of guide intensities
    pub guide_moment: f64,
}

impl Histogram2D {
    /// Count `(input[y,x], guide[y,x])` pairs
    pub fn build(input: &Plane<u8>, guide: &Plane<u8>) -> Result<Self> {
        if input.width() != guide.width() || input.height() != guide.height() {
            return Err(BinarizeError::bad_argument(format!(
                "guide image is {}x{}, input is {}x{}",
                guide.width(),
                guide.height(),
                input.width(),
                input.height()
            )));
        }

        let mut counts = vec![0.0f64; LEVELS * LEVELS];
        for (&i, &g) in input.as_slice().iter().zip(guide.as_slice()) {
            counts[usize::from(i) * LEVELS + usize::from(g)] += 1.0;
        }

        let weights = SummedAreaTable::build(LEVELS, LEVELS, |i, g| counts[i * LEVELS + g]);
        let pixel_moments =
            SummedAreaTable::build(LEVELS, LEVELS, |i, g| i as f64 * counts[i * LEVELS + g]);
        let guide_moments =
            SummedAreaTable::build(LEVELS, LEVELS, |i, g| g as f64 * counts[i * LEVELS + g]);

        Ok(Self {
            counts,
            weights,
            pixel_moments,
            guide_moments,
        })
    }

    /// Number of pairs with pixel intensity `i` and guide intensity `g`
    pub fn count(&self, i: u8, g: u8) -> f64 {
        self.counts[usize::from(i) * LEVELS + usize::from(g)]
    }

    /// Total number of pairs
    pub fn total(&self) -> f64 {
        self.weights.total()
    }

    /// Region with pixel intensity `<= s` and guide intensity `<= t`
    pub fn below(&self, s: usize, t: usize) -> RegionSums {
        let (y, x) = (s + 1, t + 1);
        RegionSums {
            weight: self.weights.at(y, x),
            pixel_moment: self.pixel_moments.at(y, x),
            guide_moment: self.guide_moments.at(y, x),
        }
    }

    /// Region with pixel intensity `> s` and guide intensity `> t`
    pub fn above(&self, s: usize, t: usize) -> RegionSums {
        let (y, x) = (s + 1, t + 1);
        let upper = |table: &SummedAreaTable| {
            table.at(LEVELS, LEVELS) - table.at(LEVELS, x) - table.at(y, LEVELS) + table.at(y, x)
        };
        RegionSums {
            weight: upper(&self.weights),
            pixel_moment: upper(&self.pixel_moments),
            guide_moment: upper(&self.guide_moments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_regions() {
        let input = Plane::from_fn(4, 1, |_, x| [10u8, 10, 200, 30][x]);
        let guide = Plane::from_fn(4, 1, |_, x| [12u8, 12, 190, 250][x]);
        let hist = Histogram2D::build(&input, &guide).unwrap();

        assert_eq!(hist.count(10, 12), 2.0);
        assert_eq!(hist.count(200, 190), 1.0);
        assert_eq!(hist.total(), 4.0);

        let below = hist.below(100, 100);
        assert_eq!(below.weight, 2.0);
        assert_eq!(below.pixel_moment, 20.0);
        assert_eq!(below.guide_moment, 24.0);

        // (30, 250) is noise: low pixel, high guide, in neither region
        let above = hist.above(100, 100);
        assert_eq!(above.weight, 1.0);
        assert_eq!(above.pixel_moment, 200.0);
        assert_eq!(above.guide_moment, 190.0);
    }

    #[test]
    fn test_upper_corner_is_empty() {
        let input = Plane::from_fn(3, 3, |_, _| 255u8);
        let hist = Histogram2D::build(&input, &input).unwrap();
        assert_eq!(hist.above(255, 255).weight, 0.0);
        assert_eq!(hist.below(255, 255).weight, 9.0);
    }

    #[test]
    fn test_mismatched_guide() {
        let input = Plane::<u8>::new(3, 3);
        let guide = Plane::<u8>::new(3, 2);
        assert!(Histogram2D::build(&input, &guide).unwrap_err().is_bad_argument());
    }
}
