//! CPU reference convolution with the same sampling semantics as the
//! GL fragment shader.
//!
//! Sampling rules, matching the shader exactly: clamp-to-edge for taps
//! outside the image, the raw weighted sum with no normalization, RGB
//! convolved and alpha carried from the center texel. Channel sums are
//! clamped to [0, 255] on write-out, which is what RGBA8 render targets
//! do to fragment outputs.
//!
//! [`run_plan`] executes a full pass plan from `filter_chain_core::passes`
//! on the CPU. The `flip_y` field of each pass is ignored here: the flip
//! corrects the Y-axis convention mismatch between offscreen targets and
//! the visible surface, and CPU buffers have no such mismatch.

use filter_chain_core::passes::{Destination, Pass};
use filter_chain_core::{FilterError, Kernel};

/// Convolves an RGBA8 buffer with a 3x3 kernel.
///
/// `src` must be `width * height * 4` bytes. Returns a buffer of the
/// same size.
pub fn convolve_rgba(src: &[u8], width: u32, height: u32, kernel: &Kernel) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    debug_assert_eq!(src.len(), w * h * 4, "src must be width*height*4 bytes");

    let weights = kernel.weights();
    let mut out = vec![0u8; src.len()];

    for y in 0..h {
        for x in 0..w {
            let mut sum = [0.0f32; 3];
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let weight = weights[((dy + 1) * 3 + (dx + 1)) as usize];
                    let sx = (x as i32 + dx).clamp(0, w as i32 - 1) as usize;
                    let sy = (y as i32 + dy).clamp(0, h as i32 - 1) as usize;
                    let p = (sy * w + sx) * 4;
                    sum[0] += src[p] as f32 * weight;
                    sum[1] += src[p + 1] as f32 * weight;
                    sum[2] += src[p + 2] as f32 * weight;
                }
            }
            let o = (y * w + x) * 4;
            out[o] = sum[0].clamp(0.0, 255.0).round() as u8;
            out[o + 1] = sum[1].clamp(0.0, 255.0).round() as u8;
            out[o + 2] = sum[2].clamp(0.0, 255.0).round() as u8;
            out[o + 3] = src[o + 3];
        }
    }

    out
}

/// Executes a pass plan on the CPU.
///
/// Pass `j` samples the output of pass `j - 1` (the source image for
/// pass 0); the pass written to [`Destination::Screen`] becomes the
/// returned image. An empty plan returns a copy of the input.
///
/// # Errors
///
/// Returns `FilterError::InvalidDimensions` if `src` is not
/// `width * height * 4` bytes.
pub fn run_plan(
    src: &[u8],
    width: u32,
    height: u32,
    passes: &[Pass],
) -> Result<Vec<u8>, FilterError> {
    if src.len() != width as usize * height as usize * 4 {
        return Err(FilterError::InvalidDimensions);
    }

    let mut previous: Option<Vec<u8>> = None;
    let mut screen: Option<Vec<u8>> = None;

    for pass in passes {
        let source: &[u8] = previous.as_deref().unwrap_or(src);
        let output = convolve_rgba(source, width, height, &pass.kernel);
        match pass.destination {
            Destination::Scratch(_) => previous = Some(output),
            Destination::Screen => screen = Some(output),
        }
    }

    Ok(screen.unwrap_or_else(|| src.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_chain_core::{plan_passes, EffectChain};
    use proptest::prelude::*;

    /// 5x5 opaque black image with a white impulse at the center.
    fn impulse_5x5() -> Vec<u8> {
        let mut px = vec![0u8; 5 * 5 * 4];
        for p in px.chunks_exact_mut(4) {
            p[3] = 255;
        }
        let center = (2 * 5 + 2) * 4;
        px[center] = 255;
        px[center + 1] = 255;
        px[center + 2] = 255;
        px
    }

    fn gaussian_blur() -> Kernel {
        *crate::builtin().get("gaussianBlur").unwrap()
    }

    #[test]
    fn identity_reproduces_the_input_exactly() {
        let src: Vec<u8> = (0u32..4 * 3 * 4).map(|i| (i * 7 % 256) as u8).collect();
        let out = convolve_rgba(&src, 4, 3, &Kernel::IDENTITY);
        assert_eq!(out, src, "identity kernel must be a pixel-exact passthrough");
    }

    #[test]
    fn gaussian_impulse_spreads_to_the_expected_taps() {
        let out = convolve_rgba(&impulse_5x5(), 5, 5, &gaussian_blur());
        let red = |x: usize, y: usize| out[(y * 5 + x) * 4];
        // 255 * 0.332 = 84.66, 255 * 0.122 = 31.11, 255 * 0.045 = 11.475
        assert_eq!(red(2, 2), 85, "center tap");
        assert_eq!(red(1, 2), 31, "edge-adjacent tap");
        assert_eq!(red(2, 1), 31, "edge-adjacent tap");
        assert_eq!(red(1, 1), 11, "corner tap");
        assert_eq!(red(0, 0), 0, "outside the 3x3 neighborhood");
    }

    #[test]
    fn clamp_to_edge_replicates_the_single_pixel() {
        // On a 1x1 image every tap clamps to the one pixel, so the output
        // is pixel * sum(weights).
        let src = vec![10u8, 20, 30, 255];
        let all_ones = Kernel([1.0; 9]);
        let out = convolve_rgba(&src, 1, 1, &all_ones);
        assert_eq!(&out, &[90, 180, 255, 255], "9 taps of (10,20,30), blue clipped");
    }

    #[test]
    fn channel_sums_clip_to_rgba8_range() {
        let src = vec![200u8, 200, 200, 255];
        let amplify = Kernel([0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0]);
        let darken = Kernel([0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(convolve_rgba(&src, 1, 1, &amplify)[0], 255);
        assert_eq!(convolve_rgba(&src, 1, 1, &darken)[0], 0);
    }

    #[test]
    fn alpha_is_carried_from_the_center_texel() {
        let mut src = vec![0u8; 3 * 1 * 4];
        src[3] = 17;
        src[7] = 99;
        src[11] = 254;
        let out = convolve_rgba(&src, 3, 1, &Kernel([0.111; 9]));
        assert_eq!(out[3], 17);
        assert_eq!(out[7], 99);
        assert_eq!(out[11], 254);
    }

    #[test]
    fn emboss_leaves_flat_gray_unchanged() {
        // The emboss weights sum to 1, so a constant image is a fixed point.
        let src = vec![128u8; 4 * 4 * 4];
        let emboss = *crate::builtin().get("emboss").unwrap();
        let out = convolve_rgba(&src, 4, 4, &emboss);
        assert_eq!(out, src);
    }

    #[test]
    fn empty_chain_plan_is_an_identity_passthrough() {
        let src: Vec<u8> = (0u32..6 * 2 * 4).map(|i| (i * 13 % 256) as u8).collect();
        let passes = plan_passes(&EffectChain::default(), &crate::builtin()).unwrap();
        let out = run_plan(&src, 6, 2, &passes).unwrap();
        assert_eq!(out, src, "empty chain must reproduce the input image");
    }

    #[test]
    fn single_blur_chain_equals_one_direct_convolution() {
        // The final "normal" pass must contribute nothing beyond the
        // identity draw.
        let src = impulse_5x5();
        let passes =
            plan_passes(&EffectChain::new(["gaussianBlur"]), &crate::builtin()).unwrap();
        let chained = run_plan(&src, 5, 5, &passes).unwrap();
        let direct = convolve_rgba(&src, 5, 5, &gaussian_blur());
        assert_eq!(chained, direct);
    }

    #[test]
    fn two_pass_chain_composes_in_order() {
        let src = impulse_5x5();
        let passes = plan_passes(
            &EffectChain::new(["gaussianBlur", "emboss"]),
            &crate::builtin(),
        )
        .unwrap();
        let chained = run_plan(&src, 5, 5, &passes).unwrap();

        let emboss = *crate::builtin().get("emboss").unwrap();
        let expected = convolve_rgba(&convolve_rgba(&src, 5, 5, &gaussian_blur()), 5, 5, &emboss);
        assert_eq!(chained, expected);
    }

    #[test]
    fn run_plan_rejects_mismatched_buffer_length() {
        let passes = plan_passes(&EffectChain::default(), &crate::builtin()).unwrap();
        let err = run_plan(&[0u8; 5], 2, 2, &passes).unwrap_err();
        assert!(matches!(err, FilterError::InvalidDimensions));
    }

    #[test]
    fn run_plan_with_no_passes_copies_the_input() {
        let src = vec![1u8, 2, 3, 4];
        let out = run_plan(&src, 1, 1, &[]).unwrap();
        assert_eq!(out, src);
    }

    proptest! {
        #[test]
        fn identity_passthrough_holds_for_any_image(
            w in 1u32..16,
            h in 1u32..16,
            seed in 0u32..1000,
        ) {
            let src: Vec<u8> = (0..w * h * 4)
                .map(|i| ((i * 31 + seed * 7) % 256) as u8)
                .collect();
            let out = convolve_rgba(&src, w, h, &Kernel::IDENTITY);
            prop_assert_eq!(out, src);
        }

        #[test]
        fn output_length_always_matches_input(w in 1u32..16, h in 1u32..16) {
            let src = vec![42u8; (w * h * 4) as usize];
            let out = convolve_rgba(&src, w, h, &Kernel([0.111; 9]));
            prop_assert_eq!(out.len(), src.len());
        }
    }
}
