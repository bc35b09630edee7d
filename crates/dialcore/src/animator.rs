use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::time::{Duration, Instant};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    #[default]
    #[strum(serialize = "decelerate", serialize = "quadratic", serialize = "quad")]
    Decelerate,
    #[strum(serialize = "cubic")]
    Cubic,
    #[strum(serialize = "exponential", serialize = "expo")]
    Exponential,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        if t >= 1.0 {
            return 1.0;
        }
        let t = t.max(0.0);
        match self {
            Self::Decelerate => 1.0 - (1.0 - t).powi(2),
            Self::Cubic => 1.0 - (1.0 - t).powi(3),
            // rescaled so the curve meets 1.0 at t = 1 without a jump
            Self::Exponential => (1.0 - 2f64.powf(-10.0 * t)) / (1.0 - 2f64.powi(-10)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: i32,
    pub to: i32,
    pub duration: Duration,
    started: Instant,
    last_emitted: i32,
}

impl Transition {
    fn value_at(&self, easing: Easing, now: Instant) -> (i32, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        if t >= 1.0 {
            return (self.to, true);
        }

        let span = f64::from(self.to) - f64::from(self.from);
        let value = (f64::from(self.from) + span * easing.apply(t)).round() as i32;
        (value, value == self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running(Transition),
    Completed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    easing: Easing,
    phase: Phase,
}

impl TransitionAnimator {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    pub fn target(&self) -> Option<i32> {
        match self.phase {
            Phase::Running(transition) => Some(transition.to),
            _ => None,
        }
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Starts a transition, superseding any running one.
    ///
    /// Returns the emitted value when the transition finishes on the spot
    /// (`from == to`, or a zero duration).
    pub fn start(&mut self, from: i32, to: i32, duration: Duration, now: Instant) -> Option<i32> {
        if let Phase::Running(previous) = self.phase {
            log::debug!(
                "Superseding transition {} -> {} at {}",
                previous.from,
                previous.to,
                previous.last_emitted
            );
            self.cancel();
        }

        if from == to || duration.is_zero() {
            self.phase = Phase::Completed;
            return Some(to);
        }

        self.phase = Phase::Running(Transition {
            from,
            to,
            duration,
            started: now,
            last_emitted: from,
        });
        None
    }

    pub fn tick(&mut self, now: Instant) -> Option<i32> {
        let Phase::Running(transition) = &mut self.phase else {
            return None;
        };

        let (value, finished) = transition.value_at(self.easing, now);
        if finished {
            self.phase = Phase::Completed;
            return Some(value);
        }
        if value == transition.last_emitted {
            return None;
        }
        transition.last_emitted = value;
        Some(value)
    }

    pub fn cancel(&mut self) {
        if let Phase::Running(transition) = self.phase {
            log::debug!(
                "Cancelled transition {} -> {} at {}",
                transition.from,
                transition.to,
                transition.last_emitted
            );
            self.phase = Phase::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const FRAME: Duration = Duration::from_millis(16);

    fn run_to_end(animator: &mut TransitionAnimator, t0: Instant, duration: Duration) -> Vec<i32> {
        let mut emitted = Vec::new();
        let mut now = t0;
        while now <= t0 + duration + FRAME {
            now += FRAME;
            emitted.extend(animator.tick(now));
        }
        emitted
    }

    #[test]
    fn test_easing_curves_are_ease_out() {
        for easing in Easing::iter() {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            let mut prev_value = 0.0;
            let mut prev_step = f64::INFINITY;
            for i in 1..=100 {
                let value = easing.apply(f64::from(i) / 100.0);
                let step = value - prev_value;
                assert!(step >= 0.0, "{easing} went backwards");
                assert!(step <= prev_step + 1e-12, "{easing} sped up");
                prev_value = value;
                prev_step = step;
            }
        }
    }

    #[test]
    fn test_strictly_decreasing_to_zero() {
        let mut animator = TransitionAnimator::new(Easing::Decelerate);
        let t0 = Instant::now();
        let duration = Duration::from_millis(300);
        assert_eq!(animator.start(30, 0, duration, t0), None);
        assert!(animator.is_running());

        let emitted = run_to_end(&mut animator, t0, duration);
        assert!(!emitted.is_empty());
        assert!(emitted.windows(2).all(|w| w[1] < w[0]), "{emitted:?}");
        assert_eq!(emitted.last(), Some(&0));
        assert_eq!(emitted.iter().filter(|&&v| v == 0).count(), 1);
        assert!(emitted.iter().all(|&v| (0..30).contains(&v)));
        assert_eq!(animator.phase(), &Phase::Completed);
    }

    #[test]
    fn test_target_emitted_once_for_every_curve() {
        for easing in Easing::iter() {
            for (from, to) in [(0, 50), (50, 0), (12, 13), (-7, 7)] {
                let mut animator = TransitionAnimator::new(easing);
                let t0 = Instant::now();
                let duration = Duration::from_millis(250);
                animator.start(from, to, duration, t0);
                let emitted = run_to_end(&mut animator, t0, duration);
                assert_eq!(emitted.last(), Some(&to), "{easing} {from}->{to}");
                assert_eq!(emitted.iter().filter(|&&v| v == to).count(), 1);
                let increasing = to > from;
                assert!(
                    emitted
                        .windows(2)
                        .all(|w| if increasing { w[1] > w[0] } else { w[1] < w[0] }),
                    "{easing} {from}->{to}: {emitted:?}"
                );
            }
        }
    }

    #[test]
    fn test_early_steps_are_larger() {
        let mut animator = TransitionAnimator::new(Easing::Decelerate);
        let t0 = Instant::now();
        animator.start(0, 50, Duration::from_millis(400), t0);
        let early = animator.tick(t0 + Duration::from_millis(100)).unwrap();
        let mid = animator.tick(t0 + Duration::from_millis(200)).unwrap();
        let late = animator.tick(t0 + Duration::from_millis(300)).unwrap();
        assert!(early > mid - early);
        assert!(mid - early > late - mid);
    }

    #[test]
    fn test_same_value_completes_immediately() {
        let mut animator = TransitionAnimator::new(Easing::default());
        let t0 = Instant::now();
        assert_eq!(animator.start(20, 20, Duration::from_millis(300), t0), Some(20));
        assert_eq!(animator.phase(), &Phase::Completed);
        assert_eq!(animator.tick(t0 + FRAME), None);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut animator = TransitionAnimator::new(Easing::default());
        assert_eq!(
            animator.start(5, 40, Duration::ZERO, Instant::now()),
            Some(40)
        );
        assert!(!animator.is_running());
    }

    #[test]
    fn test_restart_supersedes_previous_run() {
        let mut animator = TransitionAnimator::new(Easing::Decelerate);
        let t0 = Instant::now();
        let duration = Duration::from_millis(300);
        animator.start(0, 50, duration, t0);
        let midway = animator.tick(t0 + Duration::from_millis(100)).unwrap();

        animator.start(midway, 10, duration, t0 + Duration::from_millis(100));
        assert_eq!(animator.target(), Some(10));

        let emitted = run_to_end(&mut animator, t0 + Duration::from_millis(100), duration);
        assert!(emitted.iter().all(|&v| v < midway && v >= 10), "{emitted:?}");
        assert_eq!(emitted.last(), Some(&10));
    }

    #[test]
    fn test_cancel_stops_emissions() {
        let mut animator = TransitionAnimator::new(Easing::Decelerate);
        let t0 = Instant::now();
        animator.start(0, 50, Duration::from_millis(300), t0);
        assert!(animator.tick(t0 + Duration::from_millis(50)).is_some());

        animator.cancel();
        assert_eq!(animator.phase(), &Phase::Cancelled);
        assert_eq!(animator.tick(t0 + Duration::from_millis(400)), None);
        assert_eq!(animator.target(), None);
    }

    #[test]
    fn test_easing_deserialization() {
        let cases = vec![
            ("\"decelerate\"", Easing::Decelerate),
            ("\"Quad\"", Easing::Decelerate),
            ("\"CUBIC\"", Easing::Cubic),
            ("\"expo\"", Easing::Exponential),
        ];

        for (json, expected) in cases {
            let deserialized: Easing = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<Easing>("\"bounce\"").is_err());
    }
}
