//! Pure pass scheduling for the multi-pass convolution pipeline.
//!
//! GPU convolution reads neighboring texels of the *previous* pass's
//! fully resolved output, so a pass can never sample the target it is
//! writing to. The scheduler therefore ping-pongs between exactly two
//! scratch targets regardless of chain length: pass `j` writes to
//! scratch target `j % 2` and reads the output of pass `j - 1` (the
//! source image for pass 0). The final pass always targets the screen
//! with the identity kernel and a vertical flip, because offscreen
//! targets and the visible surface use opposite Y conventions.
//!
//! This module is pure index math with no GPU dependency; the
//! `render::pipeline` executor and the CPU reference path both consume
//! the same plan.

use crate::chain::{EffectChain, KernelSet};
use crate::error::FilterError;
use crate::kernel::Kernel;

/// Number of offscreen scratch targets. Two suffice for any chain length
/// because only one step of history is ever read.
pub const SCRATCH_TARGETS: usize = 2;

/// Where a pass writes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// One of the two offscreen scratch targets.
    Scratch(usize),
    /// The visible surface (default framebuffer).
    Screen,
}

/// One draw operation: sample the previous output, convolve with
/// `kernel`, write to `destination`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    /// Name of the kernel this pass applies (for diagnostics).
    pub name: String,
    /// The kernel weights uploaded before the draw.
    pub kernel: Kernel,
    /// The render target bound for the draw.
    pub destination: Destination,
    /// Sign of the vertical flip: +1.0 offscreen, -1.0 for the screen.
    pub flip_y: f32,
}

/// Builds the pass plan for an effect chain.
///
/// A chain of length N yields exactly N + 1 passes: N scratch passes in
/// strict target alternation, then the final identity pass to the
/// screen. An empty chain yields the single passthrough pass, so the
/// image is still drawn (unmodified).
///
/// # Errors
///
/// Returns `FilterError::UnknownKernel` if any chain entry is missing
/// from `set`.
pub fn plan_passes(chain: &EffectChain, set: &KernelSet) -> Result<Vec<Pass>, FilterError> {
    let resolved = chain.resolve(set)?;
    let mut passes: Vec<Pass> = resolved
        .into_iter()
        .enumerate()
        .map(|(j, (name, kernel))| Pass {
            name,
            kernel,
            destination: Destination::Scratch(j % SCRATCH_TARGETS),
            flip_y: 1.0,
        })
        .collect();

    passes.push(Pass {
        name: "normal".to_string(),
        kernel: Kernel::IDENTITY,
        destination: Destination::Screen,
        flip_y: -1.0,
    });

    Ok(passes)
}
