use thiserror::Error;

/// Rejection of a runtime-sized buffer whose length disagrees with the
/// statically requested shape.
///
/// Only the slice-based `try_from_*` constructors can produce this; every
/// other shape constraint in the crate is enforced by the type system.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("dimension mismatch: expected {expected} values, got {found}")]
pub struct DimensionMismatch {
  pub expected: usize,
  pub found: usize,
}
