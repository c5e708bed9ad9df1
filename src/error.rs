use std::fmt;

/// Error returned by the fallible sketch constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchError {
    /// A sizing parameter was out of range, which would produce degenerate
    /// (zero-sized) counter storage.
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for SketchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SketchError::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name}: {value}")
            }
        }
    }
}

impl std::error::Error for SketchError {}

impl SketchError {
    pub(crate) fn invalid(name: &'static str, value: f64) -> Self {
        SketchError::InvalidParameter { name, value }
    }
}
