use crate::animator::Easing;
use crate::arc::ArcSpec;
use crate::error::DialError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pixel dimensions of the ring at `scale == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RingMetrics {
    pub scale: f64,
    pub padding: f64,
    pub outer_mark_width: f64,
    pub outer_mark_height: f64,
    pub outer_mark_current_height: f64,
    pub outer_mark_margin: f64,
    pub outer_mark_current_margin: f64,
    pub inner_ring_margin: f64,
    pub inner_mark_width: f64,
    pub inner_mark_minor_height: f64,
    pub inner_mark_major_height: f64,
    pub hint_margin: f64,
    pub value_text_size: f64,
    pub hint_text_size: f64,
}

impl Default for RingMetrics {
    fn default() -> Self {
        Self {
            scale: 1.0,
            padding: 0.0,
            outer_mark_width: 3.0,
            outer_mark_height: 16.0,
            outer_mark_current_height: 22.0,
            outer_mark_margin: 8.0,
            outer_mark_current_margin: 2.0,
            inner_ring_margin: 8.0,
            inner_mark_width: 2.0,
            inner_mark_minor_height: 4.0,
            inner_mark_major_height: 8.0,
            hint_margin: 4.0,
            value_text_size: 30.0,
            hint_text_size: 10.0,
        }
    }
}

impl RingMetrics {
    pub fn scaled(&self) -> Self {
        let s = self.scale;
        Self {
            scale: 1.0,
            padding: self.padding * s,
            outer_mark_width: self.outer_mark_width * s,
            outer_mark_height: self.outer_mark_height * s,
            outer_mark_current_height: self.outer_mark_current_height * s,
            outer_mark_margin: self.outer_mark_margin * s,
            outer_mark_current_margin: self.outer_mark_current_margin * s,
            inner_ring_margin: self.inner_ring_margin * s,
            inner_mark_width: self.inner_mark_width * s,
            inner_mark_minor_height: self.inner_mark_minor_height * s,
            inner_mark_major_height: self.inner_mark_major_height * s,
            hint_margin: self.hint_margin * s,
            value_text_size: self.value_text_size * s,
            hint_text_size: self.hint_text_size * s,
        }
    }

    /// Half-width of the band around the rim that accepts touches.
    pub fn touch_band(&self) -> f64 {
        self.outer_mark_current_height * self.scale
    }

    pub fn validate(&self) -> Result<(), DialError> {
        let fields = [
            ("scale", self.scale),
            ("padding", self.padding),
            ("outer_mark_width", self.outer_mark_width),
            ("outer_mark_height", self.outer_mark_height),
            ("outer_mark_current_height", self.outer_mark_current_height),
            ("outer_mark_margin", self.outer_mark_margin),
            ("outer_mark_current_margin", self.outer_mark_current_margin),
            ("inner_ring_margin", self.inner_ring_margin),
            ("inner_mark_width", self.inner_mark_width),
            ("inner_mark_minor_height", self.inner_mark_minor_height),
            ("inner_mark_major_height", self.inner_mark_major_height),
            ("hint_margin", self.hint_margin),
            ("value_text_size", self.value_text_size),
            ("hint_text_size", self.hint_text_size),
        ];
        match fields
            .into_iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            Some((name, _)) => Err(DialError::InvalidMetric(name)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DialConfig {
    pub start_angle_deg: f64,
    pub sweep_deg: f64,
    pub min_value: i32,
    pub max_value: i32,
    pub initial_value: i32,
    pub animation_duration_ms: u64,
    pub easing: Easing,
    pub edge_snap_deg: f64,
    pub metrics: RingMetrics,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            start_angle_deg: -130.0,
            sweep_deg: 260.0,
            min_value: 0,
            max_value: 50,
            initial_value: 30,
            animation_duration_ms: 300,
            easing: Easing::Decelerate,
            edge_snap_deg: 10.0,
            metrics: RingMetrics::default(),
        }
    }
}

impl DialConfig {
    pub fn arc(&self) -> Result<ArcSpec, DialError> {
        ArcSpec::new(
            self.start_angle_deg,
            self.sweep_deg,
            self.min_value,
            self.max_value,
        )
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Checks every constraint and returns the arc it describes.
    pub fn validate(&self) -> Result<ArcSpec, DialError> {
        let arc = self.arc()?;
        if !arc.contains(self.initial_value) {
            return Err(DialError::InitialOutOfRange {
                value: self.initial_value,
                min: self.min_value,
                max: self.max_value,
            });
        }
        if !self.edge_snap_deg.is_finite() || self.edge_snap_deg < 0.0 {
            return Err(DialError::InvalidEdgeSnap(self.edge_snap_deg));
        }
        self.metrics.validate()?;
        Ok(arc)
    }
}
