use crate::config::RingMetrics;
use crate::geometry::{Point, Rect, Size};
use crate::ticks::{Tick, TickLayout};
use derive_more::{AsRef, Deref, Display, From, Into};
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct LabelText(String);

crate::impl_text_newtype!(LabelText);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f64,
    pub pivot: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum TickStyle {
    ScaleMinor,
    ScaleMajor,
    Pending,
    /// At or before the current value; cut out so the overlay shows through.
    Reached,
    Current,
}

impl TickStyle {
    pub fn is_cut_out(self) -> bool {
        matches!(self, Self::Reached | Self::Current)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum LabelStyle {
    Value,
    Hint,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `rect` is laid out along the +x axis; the surface applies `rotation`.
    Tick {
        rect: Rect,
        rotation: Rotation,
        style: TickStyle,
    },
    Label {
        text: LabelText,
        position: Point,
        style: LabelStyle,
    },
    ArcOverlay { center: Point, radius: f64 },
}

pub struct DialRenderer<'a> {
    layout: &'a TickLayout,
    metrics: RingMetrics,
    center: Point,
    radius: f64,
}

impl<'a> DialRenderer<'a> {
    pub fn new(layout: &'a TickLayout, metrics: &RingMetrics, size: Size) -> Self {
        Self {
            layout,
            metrics: metrics.scaled(),
            center: size.center(),
            radius: size.inscribed_radius(),
        }
    }

    pub fn render(&self, current_value: i32) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(self.layout.ticks().len() * 2 + 4);

        commands.push(DrawCommand::Label {
            text: LabelText::new(format!("{current_value}°")),
            position: self.center,
            style: LabelStyle::Value,
        });

        for tick in self.layout.ticks() {
            let value = self.layout.value_of(tick);
            let rotation = Rotation {
                degrees: self.layout.arc().start_angle_deg() + tick.angular_offset_deg,
                pivot: self.center,
            };

            commands.push(DrawCommand::Tick {
                rect: self.scale_mark(tick),
                rotation,
                style: if tick.is_major {
                    TickStyle::ScaleMajor
                } else {
                    TickStyle::ScaleMinor
                },
            });

            let style = match value.cmp(&current_value) {
                std::cmp::Ordering::Less => TickStyle::Reached,
                std::cmp::Ordering::Equal => TickStyle::Current,
                std::cmp::Ordering::Greater => TickStyle::Pending,
            };
            commands.push(DrawCommand::Tick {
                rect: self.progress_mark(style),
                rotation,
                style,
            });

            if let Some(endpoint) = tick.range_endpoint {
                commands.push(DrawCommand::Label {
                    text: LabelText::new(self.layout.endpoint_label(endpoint)),
                    position: self.hint_position(rotation.degrees),
                    style: LabelStyle::Hint,
                });
            }
        }

        commands.push(DrawCommand::ArcOverlay {
            center: self.center,
            radius: self.radius,
        });
        commands
    }

    fn rim(&self) -> f64 {
        self.radius - self.metrics.padding
    }

    /// Mark on the +x axis whose far edge sits `outer` away from the center.
    fn radial_mark(&self, outer: f64, height: f64, width: f64) -> Rect {
        Rect::from_edges(
            self.center.x + outer - height,
            self.center.y - width / 2.0,
            self.center.x + outer,
            self.center.y + width / 2.0,
        )
    }

    fn progress_mark(&self, style: TickStyle) -> Rect {
        let m = &self.metrics;
        let (margin, height) = if style == TickStyle::Current {
            (m.outer_mark_current_margin, m.outer_mark_current_height)
        } else {
            (m.outer_mark_margin, m.outer_mark_height)
        };
        self.radial_mark(self.rim() - margin, height, m.outer_mark_width)
    }

    fn inner_ring_outer_edge(&self) -> f64 {
        let m = &self.metrics;
        self.rim() - m.outer_mark_margin - m.outer_mark_height - m.inner_ring_margin
    }

    fn scale_mark(&self, tick: &Tick) -> Rect {
        let m = &self.metrics;
        let height = if tick.is_major {
            m.inner_mark_major_height
        } else {
            m.inner_mark_minor_height
        };
        self.radial_mark(self.inner_ring_outer_edge(), height, m.inner_mark_width)
    }

    fn hint_position(&self, degrees: f64) -> Point {
        let m = &self.metrics;
        let distance = self.inner_ring_outer_edge()
            - m.inner_mark_major_height
            - m.hint_margin
            - m.hint_text_size / 2.0;
        Point::new(self.center.x + distance, self.center.y).rotated_about(self.center, degrees)
    }
}

pub trait Surface {
    type Error;

    fn save(&mut self) -> Result<(), Self::Error>;
    fn restore(&mut self) -> Result<(), Self::Error>;
    fn rotate_about(&mut self, degrees: f64, pivot: Point);
    fn fill_rect(&mut self, rect: Rect, style: TickStyle) -> Result<(), Self::Error>;
    fn measure_text(&mut self, text: &str, style: LabelStyle) -> Result<Size, Self::Error>;
    /// Draws `text` with its baseline starting at `origin`.
    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        style: LabelStyle,
    ) -> Result<(), Self::Error>;
    fn fill_sweep_gradient_circle(&mut self, center: Point, radius: f64) -> Result<(), Self::Error>;
}

pub fn replay<S: Surface>(commands: &[DrawCommand], surface: &mut S) -> Result<(), S::Error> {
    for command in commands {
        match command {
            DrawCommand::Tick {
                rect,
                rotation,
                style,
            } => {
                surface.save()?;
                surface.rotate_about(rotation.degrees, rotation.pivot);
                let filled = surface.fill_rect(*rect, *style);
                surface.restore()?;
                filled?;
            }
            DrawCommand::Label {
                text,
                position,
                style,
            } => {
                let extents = surface.measure_text(text.as_str(), *style)?;
                let origin = Point::new(
                    position.x - extents.width / 2.0,
                    position.y + extents.height / 2.0,
                );
                surface.fill_text(text.as_str(), origin, *style)?;
            }
            DrawCommand::ArcOverlay { center, radius } => {
                surface.fill_sweep_gradient_circle(*center, *radius)?;
            }
        }
    }
    Ok(())
}
