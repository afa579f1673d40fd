//! Border padding for window statistics
//!
//! Uses the reflect border `fedcba|abcdefgh|hgfedcb`: the edge sample is
//! repeated and the pattern keeps reflecting when the pad is wider than the
//! image.

use crate::error::{BinarizeError, Result};
use crate::models::{Plane, Sample};

/// Amount of padding on each side of a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    /// Rows added above
    pub top: usize,
    /// Rows added below
    pub bottom: usize,
    /// Columns added on the left
    pub left: usize,
    /// Columns added on the right
    pub right: usize,
}

/// Map an out-of-range coordinate back into `[0, len)` by reflection
pub fn reflect_index(p: isize, len: usize) -> usize {
    let len = len as isize;
    if len == 1 {
        return 0;
    }
    let period = 2 * len;
    let m = p.rem_euclid(period);
    if m < len { m as usize } else { (period - 1 - m) as usize }
}

/// Return a copy of `input` padded with the reflect border
pub fn pad_reflect<T: Sample>(input: &Plane<T>, padding: Padding) -> Result<Plane<T>> {
    if input.is_empty() {
        return Err(BinarizeError::bad_argument("cannot pad an empty image"));
    }

    let width = input.width();
    let height = input.height();
    let padded_width = width + padding.left + padding.right;
    let padded_height = height + padding.top + padding.bottom;

    let column_map: Vec<usize> = (0..padded_width)
        .map(|x| reflect_index(x as isize - padding.left as isize, width))
        .collect();

    Ok(Plane::from_fn(padded_width, padded_height, |y, x| {
        let sy = reflect_index(y as isize - padding.top as isize, height);
        input.get(sy, column_map[x])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_index() {
        // fedcba|abcdefgh|hgfedcb
        let len = 8;
        assert_eq!(reflect_index(-1, len), 0);
        assert_eq!(reflect_index(-6, len), 5);
        assert_eq!(reflect_index(8, len), 7);
        assert_eq!(reflect_index(14, len), 1);
        assert_eq!(reflect_index(3, len), 3);
    }

    #[test]
    fn test_reflect_wider_than_image() {
        // ba|ab|ba|ab
        assert_eq!(reflect_index(-3, 2), 1);
        assert_eq!(reflect_index(-4, 2), 0);
        assert_eq!(reflect_index(5, 2), 1);
        assert_eq!(reflect_index(-7, 1), 0);
    }

    #[test]
    fn test_pad_reflect() {
        let input = Plane::<u8>::from_fn(3, 2, |y, x| (y * 10 + x) as u8);
        let padded = pad_reflect(
            &input,
            Padding {
                top: 1,
                bottom: 1,
                left: 2,
                right: 1,
            },
        )
        .unwrap();

        assert_eq!(padded.width(), 6);
        assert_eq!(padded.height(), 4);
        assert_eq!(padded.row(0), &[1, 0, 0, 1, 2, 2]);
        assert_eq!(padded.row(1), &[1, 0, 0, 1, 2, 2]);
        assert_eq!(padded.row(2), &[11, 10, 10, 11, 12, 12]);
        assert_eq!(padded.row(3), &[11, 10, 10, 11, 12, 12]);
    }

    #[test]
    fn test_pad_wider_than_image() {
        let input = Plane::<u8>::from_fn(2, 1, |_, x| [5, 9][x]);
        let padding = Padding {
            top: 3,
            bottom: 2,
            left: 3,
            right: 4,
        };
        let padded = pad_reflect(&input, padding).unwrap();
        assert_eq!((padded.width(), padded.height()), (9, 6));
        // ba|ab|ba|ab
        assert_eq!(padded.row(0), &[9, 9, 5, 5, 9, 9, 5, 5, 9]);
        assert!((1..6).all(|y| padded.row(y) == padded.row(0)));
    }

    #[test]
    fn test_pad_empty_is_rejected() {
        let err = pad_reflect(&Plane::<u8>::default(), Padding::default()).unwrap_err();
        assert!(err.is_bad_argument());
    }
}
