//! Named kernel sets and ordered effect chains.
//!
//! The original pipeline configured its kernels and effect list as
//! module-level mutable globals. Here both are immutable values handed
//! to the render entry point: a [`KernelSet`] maps names to kernels and
//! an [`EffectChain`] lists the names to apply in order. A chain is
//! validated against its set before any rendering starts, so an unknown
//! name fails up front rather than mid-render.

use crate::error::FilterError;
use crate::kernel::Kernel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An immutable mapping from kernel name to [`Kernel`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KernelSet(BTreeMap<String, Kernel>);

impl KernelSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a kernel under the given name, replacing any existing entry.
    pub fn insert(&mut self, name: impl Into<String>, kernel: Kernel) {
        self.0.insert(name.into(), kernel);
    }

    /// Looks up a kernel by name.
    pub fn get(&self, name: &str) -> Option<&Kernel> {
        self.0.get(name)
    }

    /// Returns all kernel names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the number of kernels in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set contains no kernels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges `other` into this set. Entries in `other` win on name clashes,
    /// so a user-supplied set can override built-in kernels.
    pub fn merge(&mut self, other: KernelSet) {
        self.0.extend(other.0);
    }
}

/// An ordered list of kernel names to apply in sequence.
///
/// The chain may be empty; rendering an empty chain still performs the
/// final identity pass, reproducing the input image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectChain(Vec<String>);

impl EffectChain {
    /// Creates a chain from an ordered list of kernel names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Returns the number of effects in the chain.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the chain applies no effects.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the effect names in application order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Resolves every name in the chain against `set`, in order.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownKernel` naming the first effect that
    /// is missing from the set.
    pub fn resolve(&self, set: &KernelSet) -> Result<Vec<(String, Kernel)>, FilterError> {
        self.0
            .iter()
            .map(|name| {
                set.get(name)
                    .map(|k| (name.clone(), *k))
                    .ok_or_else(|| FilterError::UnknownKernel(name.clone()))
            })
            .collect()
    }
}

/// A complete chain configuration, loadable from JSON.
///
/// `kernels` extends (and may override) the built-in kernel set;
/// `effects` is the chain to apply. Shape:
///
/// ```json
/// { "kernels": { "soften": [0.1, 0.1, 0.1, 0.1, 0.2, 0.1, 0.1, 0.1, 0.1] },
///   "effects": ["soften", "emboss"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Extra kernels, merged over the built-in set.
    #[serde(default)]
    pub kernels: KernelSet,
    /// The ordered effect list.
    #[serde(default)]
    pub effects: EffectChain,
}

impl ChainConfig {
    /// Merges this config's kernels over `base` and validates the effect
    /// chain against the combined set.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownKernel` if any effect name resolves
    /// in neither `base` nor this config's kernels.
    pub fn into_validated(self, mut base: KernelSet) -> Result<(KernelSet, EffectChain), FilterError> {
        base.merge(self.kernels);
        self.effects.resolve(&base)?;
        Ok((base, self.effects))
    }
}
