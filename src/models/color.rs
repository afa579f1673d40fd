/// Black sample value
pub const GRAYSCALE_BLACK: u8 = 0;
/// White sample value
pub const GRAYSCALE_WHITE: u8 = 255;

/// Output sample values for the two classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryColorPair {
    /// Value written for object (foreground) pixels
    pub object: u8,
    /// Value written for background pixels
    pub background: u8,
}

impl BinaryColorPair {
    /// Black object on white background
    pub const fn get() -> Self {
        Self {
            object: GRAYSCALE_BLACK,
            background: GRAYSCALE_WHITE,
        }
    }

    /// White object on black background
    pub const fn inverse() -> Self {
        Self {
            object: GRAYSCALE_WHITE,
            background: GRAYSCALE_BLACK,
        }
    }

    /// Pick the pair for the requested background color
    pub const fn for_background(use_white_background: bool) -> Self {
        if use_white_background {
            Self::get()
        } else {
            Self::inverse()
        }
    }

    /// Sample value for a classification
    pub fn pick(&self, is_object: bool) -> u8 {
        if is_object {
            self.object
        } else {
            self.background
        }
    }
}

impl Default for BinaryColorPair {
    fn default() -> Self {
        Self::get()
    }
}
