use std::fmt;

/// A shape error from a matrix operation.
///
/// Matrix shapes are programming errors, not user input: callers composing
/// transforms are expected to know their shapes, so this error is usually
/// propagated up rather than handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionMismatch {
    /// Operation that rejected the shapes (e.g. "multiply").
    pub op: &'static str,
    /// Shape of the left-hand operand as (rows, cols).
    pub lhs: (usize, usize),
    /// Shape of the right-hand operand as (rows, cols).
    pub rhs: (usize, usize),
}

impl DimensionMismatch {
    pub(crate) fn new(op: &'static str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        Self { op, lhs, rhs }
    }
}

impl fmt::Display for DimensionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix dimension mismatch in {}: {}x{} vs {}x{}",
            self.op, self.lhs.0, self.lhs.1, self.rhs.0, self.rhs.1
        )
    }
}

impl std::error::Error for DimensionMismatch {}
