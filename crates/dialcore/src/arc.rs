use crate::error::DialError;

/// The populated arc and the value range laid out along it.
///
/// `start_angle_deg` is the screen angle of the minimum value; the arc runs
/// clockwise from there for `sweep_deg` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    start_angle_deg: f64,
    sweep_deg: f64,
    min_value: i32,
    max_value: i32,
}

impl ArcSpec {
    pub fn new(
        start_angle_deg: f64,
        sweep_deg: f64,
        min_value: i32,
        max_value: i32,
    ) -> Result<Self, DialError> {
        if !start_angle_deg.is_finite() {
            return Err(DialError::InvalidStartAngle(start_angle_deg));
        }
        // NaN fails both comparisons, so it lands here too
        if !(sweep_deg > 0.0 && sweep_deg <= 360.0) {
            return Err(DialError::InvalidSweep(sweep_deg));
        }
        if max_value <= min_value {
            return Err(DialError::EmptyRange {
                min: min_value,
                max: max_value,
            });
        }
        Ok(Self {
            start_angle_deg,
            sweep_deg,
            min_value,
            max_value,
        })
    }

    pub fn start_angle_deg(&self) -> f64 {
        self.start_angle_deg
    }

    pub fn sweep_deg(&self) -> f64 {
        self.sweep_deg
    }

    pub fn min_value(&self) -> i32 {
        self.min_value
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    pub fn tick_count(&self) -> usize {
        (i64::from(self.max_value) - i64::from(self.min_value)) as usize
    }

    pub fn step_deg(&self) -> f64 {
        self.sweep_deg / self.tick_count() as f64
    }

    /// Width of the uncovered part of the circle.
    pub fn gap_deg(&self) -> f64 {
        360.0 - self.sweep_deg
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min_value, self.max_value)
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }
}
