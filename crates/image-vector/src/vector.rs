//! Average color distribution vectors built from raw pixel buffers.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::types::{BuildOptions, DegeneratePolicy, VisionError, VisionResult};

/// Midpoint of the byte range. Subtracting it centers every sample around zero.
const BYTE_MIDPOINT: f64 = 128.0;

/// Allowed norm drift when accepting components from outside the builder.
const UNIT_NORM_TOLERANCE: f64 = 1e-6;

/// Unit-length vector of per-channel centered sums over every pixel of an image.
///
/// The dimension equals the channel count the vector was built with and never
/// changes afterwards. The only non-unit value is the all-zero vector produced
/// under [`DegeneratePolicy::Zero`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ImageVector {
    components: Vec<f64>,
}

impl ImageVector {
    /// Build a vector from the first `length` bytes of `buffer`, interpreted as
    /// interleaved pixels of `channels` bytes each.
    ///
    /// A buffer whose channel sums cancel out is rejected with
    /// [`VisionError::DegenerateVector`]; use [`ImageVector::build_with`] to
    /// choose another resolution.
    pub fn build(buffer: &[u8], length: usize, channels: usize) -> VisionResult<Self> {
        Self::build_with(buffer, length, channels, &BuildOptions::default())
    }

    /// Build a vector from the whole of `buffer`.
    pub fn from_pixels(buffer: &[u8], channels: usize) -> VisionResult<Self> {
        Self::build(buffer, buffer.len(), channels)
    }

    /// Build a vector with explicit options.
    pub fn build_with(
        buffer: &[u8],
        length: usize,
        channels: usize,
        options: &BuildOptions,
    ) -> VisionResult<Self> {
        if channels == 0 {
            return Err(VisionError::InvalidInput(
                "channel count must be at least 1".to_string(),
            ));
        }
        if length % channels != 0 {
            return Err(VisionError::InvalidInput(format!(
                "length {length} is not a multiple of {channels} channel(s)"
            )));
        }
        if buffer.len() < length {
            return Err(VisionError::InvalidInput(format!(
                "buffer holds {} bytes, expected at least {length}",
                buffer.len()
            )));
        }

        let mut sums = vec![0.0f64; channels];
        for pixel in buffer[..length].chunks_exact(channels) {
            for (sum, &sample) in sums.iter_mut().zip(pixel) {
                *sum += f64::from(sample) - BYTE_MIDPOINT;
            }
        }

        tracing::debug!(channels, pixels = length / channels, "Accumulated channel sums");

        let norm = magnitude(&sums);
        if norm == 0.0 {
            return match options.degenerate {
                DegeneratePolicy::Error => {
                    tracing::warn!(channels, "Channel sums have zero norm, rejecting buffer");
                    Err(VisionError::DegenerateVector { channels })
                }
                DegeneratePolicy::Zero => {
                    tracing::warn!(channels, "Channel sums have zero norm, using zero vector");
                    Ok(Self {
                        components: vec![0.0; channels],
                    })
                }
            };
        }

        for sum in &mut sums {
            *sum /= norm;
        }

        Ok(Self { components: sums })
    }

    /// Number of components (the channel count used to build the vector).
    pub fn dimensions(&self) -> usize {
        self.components.len()
    }

    pub fn components(&self) -> &[f64] {
        &self.components
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.components.get(index).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.components.iter()
    }

    /// Euclidean norm. 1.0 for every vector except the degenerate zero vector.
    pub fn norm(&self) -> f64 {
        magnitude(&self.components)
    }

    /// Whether this is the all-zero vector.
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|&c| c == 0.0)
    }

    /// Dissimilarity against `other` in [0, 1]. See [`crate::similarity::diff`].
    pub fn diff(&self, other: &ImageVector) -> VisionResult<f64> {
        crate::similarity::diff(self, other)
    }
}

/// Euclidean norm of a slice.
pub(crate) fn magnitude(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

impl Index<usize> for ImageVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.components[index]
    }
}

impl<'a> IntoIterator for &'a ImageVector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

/// Components in order, each followed by a single space.
impl fmt::Display for ImageVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.components {
            write!(f, "{component} ")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<f64>> for ImageVector {
    type Error = VisionError;

    /// Accept externally stored components if they still describe a valid vector.
    fn try_from(components: Vec<f64>) -> VisionResult<Self> {
        if components.is_empty() {
            return Err(VisionError::InvalidInput(
                "vector must have at least one component".to_string(),
            ));
        }
        if components.iter().any(|c| !c.is_finite()) {
            return Err(VisionError::InvalidInput(
                "vector components must be finite".to_string(),
            ));
        }

        let norm = magnitude(&components);
        if norm != 0.0 && (norm - 1.0).abs() > UNIT_NORM_TOLERANCE {
            return Err(VisionError::InvalidInput(format!(
                "vector norm {norm} is neither 1 nor 0"
            )));
        }

        Ok(Self { components })
    }
}

impl From<ImageVector> for Vec<f64> {
    fn from(vector: ImageVector) -> Self {
        vector.components
    }
}
