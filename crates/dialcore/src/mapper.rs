use crate::arc::ArcSpec;
use crate::geometry::normalize_deg;

// absorbs rounding in origin + steps * step_deg
const EPSILON_DEG: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Placement {
    /// Degrees past the arc origin, measured along the sweep.
    OnArc(f64),
    SnapToMin,
    SnapToMax,
    InGap,
}

/// Maps screen-space touch angles to dial values.
///
/// The arc starts at `normalize(start_angle)` and runs clockwise for `sweep`
/// degrees. The rest of the circle is the gap, which straddles the 0/360 seam
/// for most arcs. Touches that land in the gap but within `edge_snap_deg` of an
/// arc end snap to that end's value; deeper ones are ignored.
#[derive(Debug, Clone)]
pub struct ValueMapper {
    arc: ArcSpec,
    origin_deg: f64,
    edge_snap_deg: f64,
}

impl ValueMapper {
    pub fn new(arc: ArcSpec, edge_snap_deg: f64) -> Self {
        Self {
            arc,
            origin_deg: normalize_deg(arc.start_angle_deg()),
            edge_snap_deg: edge_snap_deg.max(0.0),
        }
    }

    pub fn origin_deg(&self) -> f64 {
        self.origin_deg
    }

    pub fn end_deg(&self) -> f64 {
        normalize_deg(self.origin_deg + self.arc.sweep_deg())
    }

    /// Bounds of the span where touches are ignored, as `(from, to)` going
    /// clockwise. `None` when the snap zones cover the whole gap.
    pub fn dead_zone(&self) -> Option<(f64, f64)> {
        (self.arc.gap_deg() > 2.0 * self.edge_snap_deg).then(|| {
            (
                normalize_deg(self.end_deg() + self.edge_snap_deg),
                normalize_deg(self.origin_deg - self.edge_snap_deg),
            )
        })
    }

    pub fn map(&self, touch_deg: f64) -> Option<i32> {
        match self.place(touch_deg) {
            Placement::OnArc(local_deg) => {
                let steps = (local_deg / self.arc.step_deg()).round() as i64;
                let value = i64::from(self.arc.min_value()) + steps;
                let value = value.clamp(
                    i64::from(self.arc.min_value()),
                    i64::from(self.arc.max_value()),
                );
                Some(value as i32)
            }
            Placement::SnapToMin => Some(self.arc.min_value()),
            Placement::SnapToMax => Some(self.arc.max_value()),
            Placement::InGap => None,
        }
    }

    pub fn angle_of(&self, value: i32) -> f64 {
        let steps = i64::from(self.arc.clamp(value)) - i64::from(self.arc.min_value());
        normalize_deg(self.origin_deg + steps as f64 * self.arc.step_deg())
    }

    fn place(&self, touch_deg: f64) -> Placement {
        let sweep = self.arc.sweep_deg();
        let local = normalize_deg(touch_deg - self.origin_deg);

        if local <= sweep + EPSILON_DEG {
            return Placement::OnArc(local);
        }
        if local >= 360.0 - EPSILON_DEG {
            return Placement::OnArc(0.0);
        }

        let from_end = local - sweep;
        let from_origin = 360.0 - local;
        if from_end <= self.edge_snap_deg && from_end <= from_origin {
            Placement::SnapToMax
        } else if from_origin <= self.edge_snap_deg {
            Placement::SnapToMin
        } else {
            Placement::InGap
        }
    }
}
