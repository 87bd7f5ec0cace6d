use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::cuboid::Axis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CuboidError {
    InvalidRange { axis: Axis, start: i32, end: i32 },
    VolumeOverflow,
}

impl Display for CuboidError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CuboidError::InvalidRange { axis, start, end } => {
                write!(f, "inverted {} range {}..{}", axis, start, end)
            }
            CuboidError::VolumeOverflow => {
                f.write_str("volume does not fit in a 64-bit unsigned integer")
            }
        }
    }
}

impl Error for CuboidError {}
