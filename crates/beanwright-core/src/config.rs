//! Resolver configuration.

use beanwright_types::env_utils::env_bool_or;
use serde::{Deserialize, Serialize};

/// Environment override for [`ResolverConfig::memoize_resolved_values`].
pub const MEMOIZE_RESOLVED_VALUES_ENV: &str = "BEANWRIGHT_MEMOIZE_RESOLVED_VALUES";

/// Knobs for a [`ConstructorResolver`](crate::ConstructorResolver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Resolve each argument at most once per `construct` call, reusing the
    /// value for every candidate constructor. When off, every candidate
    /// re-resolves its arguments and the value resolver must be idempotent.
    pub memoize_resolved_values: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            memoize_resolved_values: true,
        }
    }
}

impl ResolverConfig {
    /// Defaults, overridden by `BEANWRIGHT_MEMOIZE_RESOLVED_VALUES` when set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            memoize_resolved_values: env_bool_or(
                MEMOIZE_RESOLVED_VALUES_ENV,
                defaults.memoize_resolved_values,
            ),
        }
    }

    pub fn without_memoization(mut self) -> Self {
        self.memoize_resolved_values = false;
        self
    }
}
