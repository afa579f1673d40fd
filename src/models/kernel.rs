//! Neighborhood shapes: rectangular kernel sizes and structuring elements

use crate::error::{BinarizeError, Result};

/// Rectangular neighborhood size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KernelSize {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

impl KernelSize {
    /// Create a kernel size
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Square kernel of `side × side`
    pub const fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    /// Number of cells covered by the kernel
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// True when the kernel covers no cells
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(BinarizeError::bad_argument(format!(
                "kernel size is empty ({}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Binary mask describing an arbitrary neighborhood, anchored at its center
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl StructuringElement {
    /// Build from a row-major mask; any dimension of zero or an all-false
    /// mask is rejected
    pub fn from_mask(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BinarizeError::bad_argument(format!(
                "structuring element is empty ({}x{})",
                width, height
            )));
        }
        if cells.len() != width * height {
            return Err(BinarizeError::bad_argument(format!(
                "structuring element mask has {} cells, expected {}",
                cells.len(),
                width * height
            )));
        }
        if !cells.iter().any(|&c| c) {
            return Err(BinarizeError::bad_argument(
                "structuring element has no active cell",
            ));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Fully populated rectangle
    pub fn rectangle(size: KernelSize) -> Result<Self> {
        Self::from_mask(size.width, size.height, vec![true; size.area()])
    }

    /// Ellipse inscribed in the rectangle
    pub fn ellipse(size: KernelSize) -> Result<Self> {
        size.ensure_not_empty()?;
        Ok(Self::ellipse_unchecked(size))
    }

    /// Ellipse for a size already known to be non-empty; the anchor cell is
    /// always active
    pub(crate) fn ellipse_unchecked(size: KernelSize) -> Self {
        let r = size.height / 2;
        let c = size.width / 2;
        let inv_r2 = if r > 0 { 1.0 / (r * r) as f64 } else { 0.0 };

        let mut cells = vec![false; size.area()];
        for i in 0..size.height {
            let dy = i as f64 - r as f64;
            if dy.abs() > r as f64 {
                continue;
            }
            let dx = (c as f64 * (((r * r) as f64 - dy * dy) * inv_r2).max(0.0).sqrt()).round()
                as usize;
            let first = c.saturating_sub(dx);
            let last = (c + dx + 1).min(size.width);
            for j in first..last {
                cells[i * size.width + j] = true;
            }
        }
        Self {
            width: size.width,
            height: size.height,
            cells,
        }
    }

    /// Cross through the anchor row and column
    pub fn cross(size: KernelSize) -> Result<Self> {
        size.ensure_not_empty()?;
        let (ay, ax) = (size.height / 2, size.width / 2);
        let mut cells = vec![false; size.area()];
        for i in 0..size.height {
            for j in 0..size.width {
                cells[i * size.width + j] = i == ay || j == ax;
            }
        }
        Self::from_mask(size.width, size.height, cells)
    }

    /// Bounding rectangle of the element
    pub fn size(&self) -> KernelSize {
        KernelSize::new(self.width, self.height)
    }

    /// Anchor as `(row, column)` inside the mask
    pub fn anchor(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }

    /// True when cell at row `i`, column `j` belongs to the element
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.width + j]
    }

    /// Number of active cells
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Horizontal runs of active cells as `(row, first_column, length)`
    pub fn runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs = Vec::new();
        for i in 0..self.height {
            let mut j = 0;
            while j < self.width {
                if !self.contains(i, j) {
                    j += 1;
                    continue;
                }
                let start = j;
                while j < self.width && self.contains(i, j) {
                    j += 1;
                }
                runs.push((i, start, j - start));
            }
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_size() {
        assert_eq!(KernelSize::new(3, 5).area(), 15);
        assert!(KernelSize::new(0, 5).is_empty());
        assert!(KernelSize::new(0, 5).ensure_not_empty().is_err());
        assert!(KernelSize::square(1).ensure_not_empty().is_ok());
    }

    #[test]
    fn test_rectangle_runs() {
        let se = StructuringElement::rectangle(KernelSize::new(3, 2)).unwrap();
        assert_eq!(se.runs(), vec![(0, 0, 3), (1, 0, 3)]);
        assert_eq!(se.anchor(), (1, 1));
        assert_eq!(se.active_count(), 6);
    }

    #[test]
    fn test_ellipse_shape() {
        let se = StructuringElement::ellipse(KernelSize::square(5)).unwrap();
        // Top row is a single cell, middle row spans the whole width
        assert_eq!(se.runs()[0], (0, 2, 1));
        assert!((0..5).all(|j| se.contains(2, j)));
        assert!(!se.contains(0, 0));
        assert!(se.contains(2, 2));
    }

    #[test]
    fn test_cross_shape() {
        let se = StructuringElement::cross(KernelSize::square(3)).unwrap();
        assert_eq!(se.active_count(), 5);
        assert!(!se.contains(0, 0));
        assert!(se.contains(0, 1));
    }

    #[test]
    fn test_invalid_elements() {
        assert!(StructuringElement::rectangle(KernelSize::new(0, 3)).is_err());
        assert!(StructuringElement::from_mask(2, 2, vec![false; 4]).is_err());
        assert!(StructuringElement::from_mask(2, 2, vec![true; 3]).is_err());
        let err = StructuringElement::ellipse(KernelSize::new(4, 0)).unwrap_err();
        assert!(err.is_bad_argument());
    }
}
