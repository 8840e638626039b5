#![deny(unsafe_code)]
//! Built-in convolution kernels and the CPU reference path.
//!
//! This crate sits between `filter-chain-core` (which defines the
//! `Kernel`/`EffectChain` model and the pass scheduler) and the
//! consumers of the pipeline: it provides the named kernel registry,
//! a CPU convolution with the same sampling semantics as the GL shader
//! (so the pipeline runs headless and is testable without a context),
//! and PNG snapshot I/O behind the `png` feature.

pub mod convolve;

#[cfg(feature = "png")]
pub mod snapshot;

use filter_chain_core::{Kernel, KernelSet};

/// All built-in kernel names, sorted.
const KERNEL_NAMES: &[&str] = &[
    "boxBlur",
    "edgeDetect",
    "emboss",
    "gaussianBlur",
    "normal",
    "sharpen",
    "unsharpen",
];

/// Identity passthrough.
const NORMAL: Kernel = Kernel::IDENTITY;

/// 3x3 Gaussian approximation; weights sum to 1.
const GAUSSIAN_BLUR: Kernel = Kernel([
    0.045, 0.122, 0.045, //
    0.122, 0.332, 0.122, //
    0.045, 0.122, 0.045, //
]);

/// Uniform box blur.
const BOX_BLUR: Kernel = Kernel([
    0.111, 0.111, 0.111, //
    0.111, 0.111, 0.111, //
    0.111, 0.111, 0.111, //
]);

/// Strong unsharp mask.
const UNSHARPEN: Kernel = Kernel([
    -1.0, -1.0, -1.0, //
    -1.0, 9.0, -1.0, //
    -1.0, -1.0, -1.0, //
]);

/// Mild 4-neighbor sharpen.
const SHARPEN: Kernel = Kernel([
    0.0, -1.0, 0.0, //
    -1.0, 5.0, -1.0, //
    0.0, -1.0, 0.0, //
]);

/// Directional emboss.
const EMBOSS: Kernel = Kernel([
    -2.0, -1.0, 0.0, //
    -1.0, 1.0, 1.0, //
    0.0, 1.0, 2.0, //
]);

/// Laplacian edge detection; weights sum to 0.
const EDGE_DETECT: Kernel = Kernel([
    -1.0, -1.0, -1.0, //
    -1.0, 8.0, -1.0, //
    -1.0, -1.0, -1.0, //
]);

/// Returns the built-in kernel set.
pub fn builtin() -> KernelSet {
    let mut set = KernelSet::new();
    set.insert("normal", NORMAL);
    set.insert("gaussianBlur", GAUSSIAN_BLUR);
    set.insert("boxBlur", BOX_BLUR);
    set.insert("unsharpen", UNSHARPEN);
    set.insert("sharpen", SHARPEN);
    set.insert("emboss", EMBOSS);
    set.insert("edgeDetect", EDGE_DETECT);
    set
}

/// Returns a slice of all built-in kernel names.
pub fn list_names() -> &'static [&'static str] {
    KERNEL_NAMES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_every_listed_name() {
        let set = builtin();
        for name in list_names() {
            assert!(set.get(name).is_some(), "missing built-in kernel: {name}");
        }
        assert_eq!(set.len(), list_names().len());
    }

    #[test]
    fn list_names_is_sorted() {
        let mut sorted = KERNEL_NAMES.to_vec();
        sorted.sort_unstable();
        assert_eq!(KERNEL_NAMES, sorted.as_slice());
    }

    #[test]
    fn every_builtin_kernel_has_nine_weights() {
        // The Kernel type guarantees this statically; spell it out for
        // each registered entry anyway.
        let set = builtin();
        for name in set.names() {
            assert_eq!(set.get(name).unwrap().weights().len(), 9);
        }
    }

    #[test]
    fn normal_is_the_identity_kernel() {
        let set = builtin();
        assert_eq!(set.get("normal"), Some(&Kernel::IDENTITY));
    }

    #[test]
    fn gaussian_blur_weight_is_exactly_one() {
        let w = GAUSSIAN_BLUR.weight();
        assert!(
            (w - 1.0).abs() < 1e-6,
            "expected gaussianBlur weight 1.0, got {w}"
        );
    }

    #[test]
    fn box_blur_weight_is_just_under_one() {
        // The positive branch with a sum that is genuinely not 1.
        let w = BOX_BLUR.weight();
        assert!(
            (w - 0.999).abs() < 1e-4,
            "expected boxBlur weight ~0.999, got {w}"
        );
    }

    #[test]
    fn edge_detect_sums_to_zero_so_weight_falls_back_to_one() {
        let sum: f32 = EDGE_DETECT.weights().iter().sum();
        assert!(sum.abs() < f32::EPSILON, "edgeDetect should sum to 0, got {sum}");
        assert!((EDGE_DETECT.weight() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn emboss_weight_uses_the_positive_branch() {
        let sum: f32 = EMBOSS.weights().iter().sum();
        assert!((sum - 1.0).abs() < f32::EPSILON, "emboss sums to 1, got {sum}");
        assert!((EMBOSS.weight() - 1.0).abs() < f32::EPSILON);
    }
}
