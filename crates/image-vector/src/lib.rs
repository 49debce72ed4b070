//! ImageVector — average color distribution fingerprints for decoded images.

pub mod capture;
pub mod similarity;
pub mod types;
pub mod vector;

pub use capture::{from_image, from_image_with};
pub use similarity::{diff, find_similar};
pub use types::*;
pub use vector::ImageVector;
