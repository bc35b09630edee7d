use crate::gui::theme::Theme;
use cairo::{Context, FontSlant, FontWeight, Matrix};
use dialcore::geometry::{Point, Rect, Size};
use dialcore::render::Surface;
use dialcore::{LabelStyle, RingMetrics, TickStyle};
use palette::Srgba;
use std::f64::consts::TAU;

/// Wedges used to approximate the sweep gradient; cairo has no conic pattern.
const GRADIENT_SEGMENTS: usize = 180;

/// Replays dial draw commands on a cairo context.
///
/// Reached marks are not painted directly: their outlines are collected and
/// the gradient overlay is clipped to them, so the gradient shows through.
pub struct CairoSurface<'a> {
    cr: &'a Context,
    theme: &'a Theme,
    metrics: RingMetrics,
    cut_outs: Vec<(Rect, Matrix)>,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context, theme: &'a Theme, metrics: &RingMetrics) -> Self {
        Self {
            cr,
            theme,
            metrics: metrics.scaled(),
            cut_outs: Vec::new(),
        }
    }

    fn set_color(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn select_font(&self, style: LabelStyle) {
        let (weight, size) = match style {
            LabelStyle::Value => (FontWeight::Bold, self.metrics.value_text_size),
            LabelStyle::Hint => (FontWeight::Normal, self.metrics.hint_text_size),
        };
        self.cr
            .select_font_face(&self.theme.font_family, FontSlant::Normal, weight);
        self.cr.set_font_size(size);
    }

    fn paint_gradient(&self, center: Point, radius: f64) -> Result<(), cairo::Error> {
        let step = TAU / GRADIENT_SEGMENTS as f64;
        for i in 0..GRADIENT_SEGMENTS {
            let start = i as f64 * step;
            // overlap neighbours slightly so antialiasing leaves no seams
            let end = start + step * 1.5;
            self.set_color(self.theme.gradient_at((i as f64 + 0.5) / GRADIENT_SEGMENTS as f64));
            self.cr.move_to(center.x, center.y);
            self.cr.arc(center.x, center.y, radius, start, end);
            self.cr.close_path();
            self.cr.fill()?;
        }
        Ok(())
    }
}

impl Surface for CairoSurface<'_> {
    type Error = cairo::Error;

    fn save(&mut self) -> Result<(), cairo::Error> {
        self.cr.save()
    }

    fn restore(&mut self) -> Result<(), cairo::Error> {
        self.cr.restore()
    }

    fn rotate_about(&mut self, degrees: f64, pivot: Point) {
        self.cr.translate(pivot.x, pivot.y);
        self.cr.rotate(degrees.to_radians());
        self.cr.translate(-pivot.x, -pivot.y);
    }

    fn fill_rect(&mut self, rect: Rect, style: TickStyle) -> Result<(), cairo::Error> {
        if style.is_cut_out() {
            self.cut_outs.push((rect, self.cr.matrix()));
            return Ok(());
        }
        let color = match style {
            TickStyle::Pending => self.theme.pending,
            _ => self.theme.scale,
        };
        self.set_color(color);
        self.cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.cr.fill()
    }

    fn measure_text(&mut self, text: &str, style: LabelStyle) -> Result<Size, cairo::Error> {
        self.select_font(style);
        let extents = self.cr.text_extents(text)?;
        Ok(Size::new(extents.width(), extents.height()))
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        style: LabelStyle,
    ) -> Result<(), cairo::Error> {
        self.select_font(style);
        self.set_color(match style {
            LabelStyle::Value => self.theme.value_text,
            LabelStyle::Hint => self.theme.hint_text,
        });
        self.cr.move_to(origin.x, origin.y);
        self.cr.show_text(text)
    }

    fn fill_sweep_gradient_circle(&mut self, center: Point, radius: f64) -> Result<(), cairo::Error> {
        if self.cut_outs.is_empty() {
            return Ok(());
        }

        self.cr.save()?;
        let base = self.cr.matrix();
        self.cr.new_path();
        for (rect, matrix) in self.cut_outs.drain(..) {
            self.cr.set_matrix(matrix);
            self.cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        }
        self.cr.set_matrix(base);
        self.cr.clip();

        let painted = self.paint_gradient(center, radius);
        self.cr.restore()?;
        painted
    }
}
