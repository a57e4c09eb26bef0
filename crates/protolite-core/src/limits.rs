//! Recursion limits shared by the recursive engines.
//!
//! Values are owned trees, so they cannot contain cycles, but they can
//! still be nested deeply enough to exhaust the stack. Every recursive
//! walk in this crate threads a depth counter through its calls and stops
//! with [`ProtoError::DepthExceeded`] once it passes `max_depth`.

use crate::error::{ProtoError, Result};

/// Default maximum nesting depth, matching `serde_json`'s recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configurable limits for recursive operations.
///
/// ```
/// use protolite_core::Limits;
///
/// let limits = Limits::default();
/// assert_eq!(limits.max_depth, 128);
///
/// let shallow = Limits::with_max_depth(4);
/// assert!(shallow.check(4).is_ok());
/// assert!(shallow.check(5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest level a walk may enter. Roots sit at depth 0.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Limits {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Fail if `depth` is past the limit.
    pub fn check(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            tracing::warn!(depth, limit = self.max_depth, "recursion limit reached");
            return Err(ProtoError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}
