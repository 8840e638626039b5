//! The 3x3 convolution kernel type.
//!
//! A [`Kernel`] is exactly nine weights in row-major order: index
//! `(dy + 1) * 3 + (dx + 1)` holds the weight for the texel at offset
//! `(dx, dy)` from the center, with `dy = -1` being the row above.
//! Kernels are immutable values; named sets of them live in
//! [`KernelSet`](crate::chain::KernelSet).

use serde::{Deserialize, Serialize};

/// A 3x3 convolution kernel: nine weights in row-major order.
///
/// The fixed-size array makes the "exactly 9 values" invariant a type-level
/// guarantee, including through serde (a JSON array of any other length
/// fails to deserialize).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kernel(pub [f32; 9]);

impl Kernel {
    /// The identity (passthrough) kernel: center weight 1, all else 0.
    ///
    /// Convolving any image with it reproduces the input unchanged. The
    /// renderer uses it for the final canvas pass.
    pub const IDENTITY: Kernel = Kernel([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

    /// Returns the nine weights in row-major order.
    pub fn weights(&self) -> &[f32; 9] {
        &self.0
    }

    /// Returns the normalization weight for this kernel: the sum of all
    /// nine weights if that sum is positive, else 1.0.
    ///
    /// A zero (or negative) sum would divide away the signal entirely, so
    /// it falls back to 1.0. Note that the sampling stage does not apply
    /// this value; it exists as a standalone computation only.
    pub fn weight(&self) -> f32 {
        let sum: f32 = self.0.iter().sum();
        if sum <= 0.0 {
            1.0
        } else {
            sum
        }
    }
}
