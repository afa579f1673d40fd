//! Summed-area tables and the per-pixel window statistics engine
//!
//! The image is reflect-padded so every window is fully defined, then one
//! table per order is built over the padded copy. Any window sum costs four
//! lookups: `T[bottom,right] + T[top,left] - T[bottom,left] - T[top,right]`.

use rayon::prelude::*;
use tracing::trace;

use crate::error::{BinarizeError, Result};
use crate::models::{KernelSize, Plane, Sample};
use crate::utils::padding::{Padding, pad_reflect};

/// Cumulative-sum grid one row and one column larger than its source
#[derive(Debug, Clone, PartialEq)]
pub struct SummedAreaTable {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl SummedAreaTable {
    /// Build over a `width × height` source whose samples come from
    /// `value(y, x)`. Cell `(y, x)` holds the sum over `[0,y)×[0,x)`.
    pub fn build(width: usize, height: usize, mut value: impl FnMut(usize, usize) -> f64) -> Self {
        let rows = height + 1;
        let cols = width + 1;
        let mut data = vec![0.0f64; rows * cols];

        for y in 0..height {
            let mut row_sum = 0.0f64;
            for x in 0..width {
                row_sum += value(y, x);
                data[(y + 1) * cols + x + 1] = data[y * cols + x + 1] + row_sum;
            }
        }

        Self { rows, cols, data }
    }

    /// Number of table rows (source height + 1)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of table columns (source width + 1)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw table cell
    pub fn at(&self, y: usize, x: usize) -> f64 {
        self.data[y * self.cols + x]
    }

    /// Sum of the source rectangle bounded by `vertices`
    pub fn window_sum(&self, vertices: &KernelVertices) -> f64 {
        self.at(vertices.bottom, vertices.right) + self.at(vertices.top, vertices.left)
            - self.at(vertices.bottom, vertices.left)
            - self.at(vertices.top, vertices.right)
    }

    /// Sum of the whole source
    pub fn total(&self) -> f64 {
        self.at(self.rows - 1, self.cols - 1)
    }
}

/// Table indices bounding one pixel's window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelVertices {
    /// First window row
    pub top: usize,
    /// One past the last window row
    pub bottom: usize,
    /// First window column
    pub left: usize,
    /// One past the last window column
    pub right: usize,
}

impl KernelVertices {
    /// Vertices of the window for original pixel `(y, x)`; the padded copy
    /// shifts the window origin so it starts at the same index
    pub fn at(y: usize, x: usize, kernel_size: KernelSize) -> Self {
        Self {
            top: y,
            bottom: y + kernel_size.height,
            left: x,
            right: x + kernel_size.width,
        }
    }
}

/// Summed-area tables of order 1 (sum) up to `ORDER` (sum of powers)
#[derive(Debug, Clone)]
pub struct IntegralImages<const ORDER: usize> {
    tables: [SummedAreaTable; ORDER],
    area: f64,
}

impl<const ORDER: usize> IntegralImages<ORDER> {
    fn build<T: Sample>(padded: &Plane<T>, kernel_size: KernelSize) -> Self {
        let tables = std::array::from_fn(|order| {
            SummedAreaTable::build(padded.width(), padded.height(), |y, x| {
                let v = padded.get(y, x).to_f64();
                if order == 0 { v } else { v * v }
            })
        });
        Self {
            tables,
            area: kernel_size.area() as f64,
        }
    }

    /// Table of the given order, starting at 1
    pub fn table(&self, order: usize) -> &SummedAreaTable {
        &self.tables[order - 1]
    }

    /// Number of cells in one window
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Sum of samples inside the window
    pub fn sum(&self, vertices: &KernelVertices) -> f64 {
        self.tables[0].window_sum(vertices)
    }

    /// Mean of samples inside the window
    pub fn mean(&self, vertices: &KernelVertices) -> f64 {
        self.sum(vertices) / self.area
    }
}

impl IntegralImages<2> {
    /// Sum of squared samples inside the window
    pub fn sum_of_squares(&self, vertices: &KernelVertices) -> f64 {
        self.tables[1].window_sum(vertices)
    }

    /// Mean and standard deviation inside the window
    pub fn mean_stddev(&self, vertices: &KernelVertices) -> (f64, f64) {
        let mean = self.mean(vertices);
        // Cancellation can leave a tiny negative variance on flat windows
        let variance = (self.sum_of_squares(vertices) / self.area - mean * mean).max(0.0);
        (mean, variance.sqrt())
    }
}

/// Build the summed-area tables for `kernel_size` over a reflect-padded copy
/// of `image`, then replace every pixel by
/// `processor(pixel, (y, x), tables, vertices)`.
///
/// The window is anchored at `((height-1)/2, (width-1)/2)`. Rows are
/// processed in parallel; the processor must not depend on the visiting
/// order.
pub fn construct_integral_and_iterate<T, const ORDER: usize, F>(
    image: &mut Plane<T>,
    kernel_size: KernelSize,
    processor: F,
) -> Result<()>
where
    T: Sample,
    F: Fn(T, (usize, usize), &IntegralImages<ORDER>, &KernelVertices) -> T + Sync,
{
    let anchor = (
        kernel_size.height.saturating_sub(1) / 2,
        kernel_size.width.saturating_sub(1) / 2,
    );
    construct_integral_and_iterate_anchored(image, kernel_size, anchor, processor)
}

/// Same as [`construct_integral_and_iterate`] with the window of pixel
/// `(y, x)` covering rows `y - anchor.0 ..` and columns `x - anchor.1 ..`.
///
/// Used where the window must line up with a structuring element, whose
/// anchor is `(height/2, width/2)`.
pub fn construct_integral_and_iterate_anchored<T, const ORDER: usize, F>(
    image: &mut Plane<T>,
    kernel_size: KernelSize,
    anchor: (usize, usize),
    processor: F,
) -> Result<()>
where
    T: Sample,
    F: Fn(T, (usize, usize), &IntegralImages<ORDER>, &KernelVertices) -> T + Sync,
{
    kernel_size.ensure_not_empty()?;
    if image.is_empty() {
        return Err(BinarizeError::bad_argument("image is empty"));
    }
    if !(1..=2).contains(&ORDER) {
        return Err(BinarizeError::bad_argument(format!(
            "integral order must be 1 or 2, got {}",
            ORDER
        )));
    }
    let (anchor_y, anchor_x) = anchor;
    if anchor_y >= kernel_size.height || anchor_x >= kernel_size.width {
        return Err(BinarizeError::bad_argument(format!(
            "anchor ({}, {}) lies outside a {}x{} window",
            anchor_y, anchor_x, kernel_size.width, kernel_size.height
        )));
    }

    let padding = Padding {
        top: anchor_y,
        bottom: kernel_size.height - 1 - anchor_y,
        left: anchor_x,
        right: kernel_size.width - 1 - anchor_x,
    };
    let padded = pad_reflect(image, padding)?;
    let integral_images = IntegralImages::<ORDER>::build(&padded, kernel_size);
    trace!(
        width = image.width(),
        height = image.height(),
        kernel_width = kernel_size.width,
        kernel_height = kernel_size.height,
        anchor_y,
        anchor_x,
        order = ORDER,
        "Built integral images"
    );

    let width = image.width();
    image
        .as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                let vertices = KernelVertices::at(y, x, kernel_size);
                *pixel = processor(*pixel, (y, x), &integral_images, &vertices);
            }
        });

    Ok(())
}

/// Local box average of `image` with reflect border
pub fn box_mean<T: Sample>(image: &Plane<T>, kernel_size: KernelSize) -> Result<Plane<f64>> {
    let mut output: Plane<f64> = image.convert();
    construct_integral_and_iterate::<f64, 1, _>(
        &mut output,
        kernel_size,
        |_, _, integral_images, vertices| integral_images.mean(vertices),
    )?;
    Ok(output)
}
