use image::{GrayImage, Luma};

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Sample types a [`Plane`] may hold: 8-bit, 32-bit float or 64-bit float
pub trait Sample: sealed::Sealed + Copy + Default + Send + Sync + 'static {
    /// Widen to f64
    fn to_f64(self) -> f64;
    /// Narrow from f64 (rounding half to even and saturating for integer
    /// samples)
    fn from_f64(value: f64) -> Self;
}

impl Sample for u8 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        // Ties to even; `as` saturates and maps NaN to 0
        value.round_ties_even() as u8
    }
}

impl Sample for f32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Dense row-major single channel 2D grid
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<T: Sample> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Sample> Plane<T> {
    /// Create a plane filled with the default sample
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    /// Create a plane with every sample produced by `f(y, x)`
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(y, x));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Get plane width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get plane height
    pub fn height(&self) -> usize {
        self.height
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get sample at row `y`, column `x`
    pub fn get(&self, y: usize, x: usize) -> T {
        self.data[y * self.width + x]
    }

    /// Set sample at row `y`, column `x`
    pub fn set(&mut self, y: usize, x: usize, value: T) {
        self.data[y * self.width + x] = value;
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> &[T] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Raw samples in row-major order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable raw samples in row-major order
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Convert every sample to another sample type
    pub fn convert<U: Sample>(&self) -> Plane<U> {
        Plane {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| U::from_f64(v.to_f64())).collect(),
        }
    }

    /// Build a plane from a decoded grayscale image
    ///
    /// Only the first `width × height` samples are read; `image` accepts
    /// longer buffers.
    pub fn from_gray(image: &GrayImage) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        Self {
            width,
            height,
            data: image.as_raw()[..width * height]
                .iter()
                .map(|&v| T::from_f64(f64::from(v)))
                .collect(),
        }
    }

    /// Convert back into an 8-bit grayscale image
    pub fn to_gray(&self) -> GrayImage {
        let mut image = GrayImage::new(self.width as u32, self.height as u32);
        for (dst, &src) in image.pixels_mut().zip(self.data.iter()) {
            *dst = Luma([u8::from_f64(src.to_f64())]);
        }
        image
    }
}

impl<T: Sample> Default for Plane<T> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
