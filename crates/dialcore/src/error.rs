use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialError {
    #[error("Sweep must be within (0, 360] degrees, got {0}")]
    InvalidSweep(f64),
    #[error("Start angle must be finite, got {0}")]
    InvalidStartAngle(f64),
    #[error("Value range is empty: min {min} must be below max {max}")]
    EmptyRange { min: i32, max: i32 },
    #[error("Initial value {value} is outside [{min}, {max}]")]
    InitialOutOfRange { value: i32, min: i32, max: i32 },
    #[error("Edge snap must be a non-negative angle, got {0}")]
    InvalidEdgeSnap(f64),
    #[error("Metric '{0}' must be finite and non-negative")]
    InvalidMetric(&'static str),
}
