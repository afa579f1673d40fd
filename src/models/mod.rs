pub mod color;
pub mod kernel;
pub mod plane;

pub use color::{BinaryColorPair, GRAYSCALE_BLACK, GRAYSCALE_WHITE};
pub use kernel::{KernelSize, StructuringElement};
pub use plane::{Plane, Sample};
