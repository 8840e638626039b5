#![deny(unsafe_code)]
//! Core types for the filter-chain convolution pipeline.
//!
//! Provides the [`Kernel`] 3x3 weight matrix, the [`KernelSet`] /
//! [`EffectChain`] configuration model, pixel-space [`Quad`] geometry,
//! and the pure pass scheduler that drives the ping-pong multi-pass
//! renderer.

pub mod chain;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod passes;

#[cfg(feature = "render")]
pub mod render;

pub use chain::{ChainConfig, EffectChain, KernelSet};
pub use error::FilterError;
pub use geometry::Quad;
pub use kernel::Kernel;
pub use passes::{plan_passes, Destination, Pass};
