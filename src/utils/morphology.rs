//! Grayscale erosion and dilation over an arbitrary structuring element
//!
//! The element is decomposed into horizontal runs; each run becomes a 1D
//! sliding-window extremum computed with a monotonic deque, so the cost per
//! pixel is proportional to the number of runs rather than the element area.
//! Cells falling outside the image are ignored.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::models::{GRAYSCALE_BLACK, GRAYSCALE_WHITE, Plane, StructuringElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extremum {
    Min,
    Max,
}

impl Extremum {
    fn identity(self) -> u8 {
        match self {
            Extremum::Min => GRAYSCALE_WHITE,
            Extremum::Max => GRAYSCALE_BLACK,
        }
    }

    fn pick(self, a: u8, b: u8) -> u8 {
        match self {
            Extremum::Min => a.min(b),
            Extremum::Max => a.max(b),
        }
    }

    // `candidate` makes `existing` useless for every later window
    fn dominates(self, candidate: u8, existing: u8) -> bool {
        match self {
            Extremum::Min => candidate <= existing,
            Extremum::Max => candidate >= existing,
        }
    }
}

/// Local minimum over the element (grayscale erosion)
pub fn erode(image: &Plane<u8>, element: &StructuringElement) -> Plane<u8> {
    morph(image, element, Extremum::Min)
}

/// Local maximum over the element (grayscale dilation)
pub fn dilate(image: &Plane<u8>, element: &StructuringElement) -> Plane<u8> {
    morph(image, element, Extremum::Max)
}

/// Local minimum and maximum planes over the element
pub fn local_extrema(image: &Plane<u8>, element: &StructuringElement) -> (Plane<u8>, Plane<u8>) {
    rayon::join(|| erode(image, element), || dilate(image, element))
}

fn morph(image: &Plane<u8>, element: &StructuringElement, op: Extremum) -> Plane<u8> {
    let width = image.width();
    let height = image.height();
    let mut output = Plane::from_fn(width, height, |_, _| op.identity());
    if image.is_empty() {
        return output;
    }

    let runs = element.runs();
    let (anchor_y, anchor_x) = element.anchor();

    output
        .as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, acc)| {
            let mut deque = VecDeque::with_capacity(width);
            for &(i, start, len) in &runs {
                let sy = y as isize + i as isize - anchor_y as isize;
                if sy < 0 || sy >= height as isize {
                    continue;
                }
                let offset = start as isize - anchor_x as isize;
                accumulate_run(image.row(sy as usize), offset, len, acc, op, &mut deque);
            }
        });

    output
}

/// Fold the extremum of `row[x + offset .. x + offset + len]` (clipped to
/// the row) into `acc[x]` for every column
fn accumulate_run(
    row: &[u8],
    offset: isize,
    len: usize,
    acc: &mut [u8],
    op: Extremum,
    deque: &mut VecDeque<usize>,
) {
    deque.clear();
    let width = row.len() as isize;
    let mut next = 0isize;

    for x in 0..width {
        let lo = (x + offset).max(0);
        let hi = (x + offset + len as isize - 1).min(width - 1);
        if lo > hi {
            continue;
        }

        while next <= hi {
            let value = row[next as usize];
            while let Some(&back) = deque.back() {
                if op.dominates(value, row[back]) {
                    deque.pop_back();
                } else {
                    break;
                }
            }
            deque.push_back(next as usize);
            next += 1;
        }

        while let Some(&front) = deque.front() {
            if (front as isize) < lo {
                deque.pop_front();
            } else {
                break;
            }
        }

        if let Some(&front) = deque.front() {
            acc[x as usize] = op.pick(acc[x as usize], row[front]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KernelSize;

    fn brute_force(image: &Plane<u8>, element: &StructuringElement, op: Extremum) -> Plane<u8> {
        let (ay, ax) = element.anchor();
        let size = element.size();
        Plane::from_fn(image.width(), image.height(), |y, x| {
            let mut best = op.identity();
            for i in 0..size.height {
                for j in 0..size.width {
                    if !element.contains(i, j) {
                        continue;
                    }
                    let sy = y as isize + i as isize - ay as isize;
                    let sx = x as isize + j as isize - ax as isize;
                    if sy < 0 || sx < 0 || sy >= image.height() as isize || sx >= image.width() as isize {
                        continue;
                    }
                    best = op.pick(best, image.get(sy as usize, sx as usize));
                }
            }
            best
        })
    }

    fn sample_image() -> Plane<u8> {
        Plane::from_fn(13, 9, |y, x| ((y * 71 + x * 29 + (x * y) % 7) % 256) as u8)
    }

    #[test]
    fn test_matches_brute_force() {
        let image = sample_image();
        let elements = [
            StructuringElement::rectangle(KernelSize::new(3, 5)).unwrap(),
            StructuringElement::ellipse(KernelSize::square(7)).unwrap(),
            StructuringElement::cross(KernelSize::new(5, 3)).unwrap(),
            StructuringElement::ellipse(KernelSize::square(21)).unwrap(),
            StructuringElement::from_mask(3, 3, vec![true, false, false, false, false, false, false, false, true])
                .unwrap(),
        ];

        for element in &elements {
            assert_eq!(erode(&image, element), brute_force(&image, element, Extremum::Min));
            assert_eq!(dilate(&image, element), brute_force(&image, element, Extremum::Max));
        }
    }

    #[test]
    fn test_single_cell_element_is_identity() {
        let image = sample_image();
        let element = StructuringElement::rectangle(KernelSize::square(1)).unwrap();
        let (min, max) = local_extrema(&image, &element);
        assert_eq!(min, image);
        assert_eq!(max, image);
    }

    #[test]
    fn test_flat_image() {
        let image = Plane::from_fn(10, 10, |_, _| 128u8);
        let element = StructuringElement::ellipse(KernelSize::square(5)).unwrap();
        let (min, max) = local_extrema(&image, &element);
        assert!(min.as_slice().iter().all(|&v| v == 128));
        assert!(max.as_slice().iter().all(|&v| v == 128));
    }
}
