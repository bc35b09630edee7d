use crate::arc::ArcSpec;
use strum::Display as StrumDisplay;

pub const MAJOR_TICK_EVERY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    Min,
    Max,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub index: usize,
    pub angular_offset_deg: f64,
    pub is_major: bool,
    pub range_endpoint: Option<Endpoint>,
}

#[derive(Debug, Clone)]
pub struct TickLayout {
    arc: ArcSpec,
    ticks: Vec<Tick>,
}

impl TickLayout {
    pub fn new(arc: ArcSpec) -> Self {
        let count = arc.tick_count();
        let step = arc.step_deg();

        let ticks = (0..=count)
            .map(|index| Tick {
                index,
                angular_offset_deg: index as f64 * step,
                is_major: index % MAJOR_TICK_EVERY == 0,
                range_endpoint: match index {
                    0 => Some(Endpoint::Min),
                    i if i == count => Some(Endpoint::Max),
                    _ => None,
                },
            })
            .collect();

        Self { arc, ticks }
    }

    pub fn arc(&self) -> &ArcSpec {
        &self.arc
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn value_of(&self, tick: &Tick) -> i32 {
        (i64::from(self.arc.min_value()) + tick.index as i64) as i32
    }

    pub fn tick_for(&self, value: i32) -> Option<&Tick> {
        self.arc
            .contains(value)
            .then(|| &self.ticks[(i64::from(value) - i64::from(self.arc.min_value())) as usize])
    }

    pub fn endpoint_label(&self, endpoint: Endpoint) -> String {
        match endpoint {
            Endpoint::Min => self.arc.min_value().to_string(),
            Endpoint::Max => self.arc.max_value().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TickLayout {
        TickLayout::new(ArcSpec::new(-130.0, 260.0, 0, 50).unwrap())
    }

    #[test]
    fn test_tick_count_includes_both_ends() {
        assert_eq!(layout().ticks().len(), 51);
    }

    #[test]
    fn test_offsets_are_evenly_spaced() {
        let layout = layout();
        for tick in layout.ticks() {
            assert!((tick.angular_offset_deg - tick.index as f64 * 5.2).abs() < 1e-9);
        }
        let last = layout.ticks().last().unwrap();
        assert!((last.angular_offset_deg - 260.0).abs() < 1e-9);
    }

    #[test]
    fn test_major_every_ten() {
        let majors: Vec<usize> = layout()
            .ticks()
            .iter()
            .filter(|t| t.is_major)
            .map(|t| t.index)
            .collect();
        assert_eq!(majors, vec![0, 10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_endpoints() {
        let layout = layout();
        let endpoints: Vec<(usize, Endpoint)> = layout
            .ticks()
            .iter()
            .filter_map(|t| t.range_endpoint.map(|e| (t.index, e)))
            .collect();
        assert_eq!(endpoints, vec![(0, Endpoint::Min), (50, Endpoint::Max)]);
        assert_eq!(layout.endpoint_label(Endpoint::Min), "0");
        assert_eq!(layout.endpoint_label(Endpoint::Max), "50");
        assert_eq!(Endpoint::Max.to_string(), "max");
    }

    #[test]
    fn test_offset_range_labels_and_values() {
        let layout = TickLayout::new(ArcSpec::new(0.0, 180.0, -5, 5).unwrap());
        assert_eq!(layout.ticks().len(), 11);
        assert_eq!(layout.endpoint_label(Endpoint::Min), "-5");
        assert_eq!(layout.endpoint_label(Endpoint::Max), "5");
        let tick = layout.tick_for(0).unwrap();
        assert_eq!(tick.index, 5);
        assert_eq!(layout.value_of(tick), 0);
        assert!(layout.tick_for(6).is_none());
    }

    #[test]
    fn test_values_near_i32_limits() {
        let layout = TickLayout::new(ArcSpec::new(0.0, 90.0, i32::MAX - 3, i32::MAX).unwrap());
        let last = layout.ticks().last().unwrap();
        assert_eq!(layout.value_of(last), i32::MAX);
        assert_eq!(layout.tick_for(i32::MAX).map(|t| t.index), Some(3));
        assert!(layout.tick_for(i32::MIN).is_none());
    }
}
