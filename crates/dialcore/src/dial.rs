use crate::animator::TransitionAnimator;
use crate::config::DialConfig;
use crate::error::DialError;
use crate::geometry::{self, Point, Size};
use crate::mapper::ValueMapper;
use crate::render::{DialRenderer, DrawCommand};
use crate::ticks::TickLayout;
use std::time::Instant;

pub type ValueListener = Box<dyn FnMut(i32)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialState {
    pub current_value: i32,
    pub animation_target: Option<i32>,
}

/// What the host should do after handing the dial some input or time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub should_redraw: bool,
    pub animating: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerAction {
    pub accepted: bool,
    pub frame: Frame,
}

impl PointerAction {
    fn ignored(animating: bool) -> Self {
        Self {
            accepted: false,
            frame: Frame {
                should_redraw: false,
                animating,
            },
        }
    }
}

/// The dial widget model: owns the value and everything derived from the config.
pub struct Dial {
    config: DialConfig,
    layout: TickLayout,
    mapper: ValueMapper,
    animator: TransitionAnimator,
    state: DialState,
    listeners: Vec<ValueListener>,
}

impl Dial {
    pub fn new(config: DialConfig) -> Result<Self, DialError> {
        let arc = config.validate()?;
        Ok(Self {
            layout: TickLayout::new(arc),
            mapper: ValueMapper::new(arc, config.edge_snap_deg),
            animator: TransitionAnimator::new(config.easing),
            state: DialState {
                current_value: config.initial_value,
                animation_target: None,
            },
            listeners: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    pub fn layout(&self) -> &TickLayout {
        &self.layout
    }

    pub fn mapper(&self) -> &ValueMapper {
        &self.mapper
    }

    pub fn state(&self) -> DialState {
        self.state
    }

    pub fn value(&self) -> i32 {
        self.state.current_value
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    pub fn on_value_changed(&mut self, listener: impl FnMut(i32) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Handles a pointer-down or pointer-move sample at `point` on a surface of `size`.
    pub fn pointer(&mut self, point: Point, size: Size, now: Instant) -> PointerAction {
        let center = size.center();
        let on_ring = geometry::is_within_radial_band(
            center,
            point,
            size.inscribed_radius(),
            self.config.metrics.touch_band(),
        );
        if !on_ring {
            return PointerAction::ignored(self.is_animating());
        }

        let angle = geometry::pointer_angle_deg(center, point);
        let Some(candidate) = self.mapper.map(angle) else {
            log::debug!("Ignoring touch in the gap at {angle:.1}°");
            return PointerAction::ignored(self.is_animating());
        };

        // a drag keeps reporting the same value; restarting would reset the easing
        if self.animator.target() == Some(candidate) {
            return PointerAction {
                accepted: true,
                frame: Frame {
                    should_redraw: false,
                    animating: true,
                },
            };
        }

        PointerAction {
            accepted: true,
            frame: self.animate_to(candidate, now),
        }
    }

    pub fn animate_to(&mut self, target: i32, now: Instant) -> Frame {
        let target = self.layout.arc().clamp(target);
        let emitted = self.animator.start(
            self.state.current_value,
            target,
            self.config.animation_duration(),
            now,
        );
        self.state.animation_target = self.animator.target();
        Frame {
            should_redraw: emitted.is_some_and(|value| self.apply(value)),
            animating: self.is_animating(),
        }
    }

    /// Sets the value directly, cancelling any running transition.
    pub fn set_value(&mut self, value: i32) -> bool {
        self.animator.cancel();
        self.state.animation_target = None;
        self.apply(value)
    }

    pub fn advance(&mut self, now: Instant) -> Frame {
        let emitted = self.animator.tick(now);
        self.state.animation_target = self.animator.target();
        Frame {
            should_redraw: emitted.is_some_and(|value| self.apply(value)),
            animating: self.is_animating(),
        }
    }

    pub fn render(&self, size: Size) -> Vec<DrawCommand> {
        DialRenderer::new(&self.layout, &self.config.metrics, size).render(self.state.current_value)
    }

    /// Swaps in a new config, keeping listeners and the (clamped) current value.
    pub fn reconfigure(&mut self, config: DialConfig) -> Result<(), DialError> {
        let arc = config.validate()?;
        self.animator.cancel();
        self.animator.set_easing(config.easing);
        self.layout = TickLayout::new(arc);
        self.mapper = ValueMapper::new(arc, config.edge_snap_deg);
        self.config = config;
        self.state.animation_target = None;
        let value = self.state.current_value;
        self.apply(value);
        Ok(())
    }

    fn apply(&mut self, value: i32) -> bool {
        let value = self.layout.arc().clamp(value);
        if value == self.state.current_value {
            return false;
        }
        self.state.current_value = value;
        for listener in &mut self.listeners {
            listener(value);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    const SIZE: Size = Size {
        width: 200.0,
        height: 200.0,
    };

    fn on_rim(degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point::new(100.0 + 100.0 * cos, 100.0 + 100.0 * sin)
    }

    fn recording_dial() -> (Dial, Rc<RefCell<Vec<i32>>>) {
        let mut dial = Dial::new(DialConfig::default()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        dial.on_value_changed(move |v| sink.borrow_mut().push(v));
        (dial, seen)
    }

    fn settle(dial: &mut Dial, from: Instant) {
        let mut now = from;
        for _ in 0..40 {
            now += Duration::from_millis(16);
            dial.advance(now);
        }
    }

    #[test]
    fn test_rejects_degenerate_config() {
        let config = DialConfig {
            max_value: 0,
            initial_value: 0,
            ..DialConfig::default()
        };
        assert!(matches!(
            Dial::new(config),
            Err(DialError::EmptyRange { min: 0, max: 0 })
        ));
    }

    #[test]
    fn test_touch_off_ring_is_ignored() {
        let (mut dial, seen) = recording_dial();
        let now = Instant::now();
        for point in [Point::new(100.0, 100.0), Point::new(150.0, 100.0)] {
            let action = dial.pointer(point, SIZE, now);
            assert!(!action.accepted);
            assert!(!action.frame.animating);
        }
        settle(&mut dial, now);
        assert_eq!(dial.value(), 30);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_touch_in_gap_is_ignored() {
        let (mut dial, seen) = recording_dial();
        let now = Instant::now();
        for angle in [150.0, 180.0, 210.0] {
            assert!(!dial.pointer(on_rim(angle), SIZE, now).accepted);
        }
        settle(&mut dial, now);
        assert_eq!(dial.value(), 30);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_touch_animates_toward_candidate() {
        let (mut dial, seen) = recording_dial();
        let now = Instant::now();
        let action = dial.pointer(on_rim(222.0), SIZE, now);
        assert!(action.accepted);
        assert!(action.frame.animating);
        assert_eq!(dial.state().animation_target, Some(0));

        settle(&mut dial, now);
        assert_eq!(dial.value(), 0);
        assert_eq!(dial.state().animation_target, None);
        let seen = seen.borrow();
        assert!(seen.windows(2).all(|w| w[1] < w[0]), "{seen:?}");
        assert_eq!(seen.last(), Some(&0));
    }

    #[test]
    fn test_band_edge_still_counts() {
        let (mut dial, _) = recording_dial();
        // 20px inside the rim, within the 22px band
        let (sin, cos) = 138f64.to_radians().sin_cos();
        let point = Point::new(100.0 + 80.0 * cos, 100.0 + 80.0 * sin);
        assert!(dial.pointer(point, SIZE, Instant::now()).accepted);
        assert_eq!(dial.state().animation_target, Some(50));
    }

    #[test]
    fn test_new_touch_supersedes_running_animation() {
        let (mut dial, seen) = recording_dial();
        let t0 = Instant::now();
        dial.pointer(on_rim(222.0), SIZE, t0);
        let t1 = t0 + Duration::from_millis(60);
        dial.advance(t1);
        let midway = dial.value();
        assert!(midway < 30 && midway > 0);

        dial.pointer(on_rim(138.0), SIZE, t1);
        seen.borrow_mut().clear();
        settle(&mut dial, t1);
        let seen = seen.borrow();
        assert!(seen.iter().all(|&v| v > midway), "{seen:?}");
        assert_eq!(dial.value(), 50);
    }

    #[test]
    fn test_repeated_drag_sample_keeps_animation() {
        let (mut dial, _) = recording_dial();
        let t0 = Instant::now();
        dial.pointer(on_rim(222.0), SIZE, t0);
        dial.advance(t0 + Duration::from_millis(100));
        let before = dial.value();
        let action = dial.pointer(on_rim(223.0), SIZE, t0 + Duration::from_millis(100));
        assert!(action.accepted && action.frame.animating);
        dial.advance(t0 + Duration::from_millis(110));
        assert!(dial.value() <= before);
    }

    #[test]
    fn test_set_value_cancels_and_clamps() {
        let (mut dial, seen) = recording_dial();
        let now = Instant::now();
        dial.animate_to(0, now);
        assert!(dial.is_animating());

        assert!(dial.set_value(99));
        assert!(!dial.is_animating());
        assert_eq!(dial.value(), 50);
        settle(&mut dial, now);
        assert_eq!(dial.value(), 50);
        assert_eq!(*seen.borrow(), vec![50]);
        assert!(!dial.set_value(50));
    }

    #[test]
    fn test_animate_to_current_value_is_silent() {
        let (mut dial, seen) = recording_dial();
        let frame = dial.animate_to(30, Instant::now());
        assert_eq!(frame, Frame::default());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_reconfigure_clamps_value() {
        let (mut dial, seen) = recording_dial();
        let config = DialConfig {
            max_value: 20,
            initial_value: 10,
            ..DialConfig::default()
        };
        dial.reconfigure(config).unwrap();
        assert_eq!(dial.value(), 20);
        assert_eq!(dial.layout().ticks().len(), 21);
        assert_eq!(*seen.borrow(), vec![20]);

        let bad = DialConfig {
            sweep_deg: -1.0,
            ..DialConfig::default()
        };
        assert!(dial.reconfigure(bad).is_err());
        assert_eq!(dial.config().max_value, 20);
    }

    #[test]
    fn test_render_tracks_value() {
        let (mut dial, _) = recording_dial();
        dial.set_value(7);
        match &dial.render(SIZE)[0] {
            DrawCommand::Label { text, .. } => assert_eq!(text.as_str(), "7°"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
