use gtk::gdk;
use gtk4 as gtk;
use palette::{Mix, Srgba};

fn hex(rgb: u32) -> Srgba<f64> {
    let [_, r, g, b] = rgb.to_be_bytes();
    Srgba::<u8>::new(r, g, b, 255).into_format()
}

pub struct Theme {
    /// Stops of the sweep gradient revealed through reached marks, starting at 0°.
    pub gradient: Vec<Srgba<f64>>,
    pub pending: Srgba<f64>,
    pub scale: Srgba<f64>,
    pub hint_text: Srgba<f64>,
    pub value_text: Srgba<f64>,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            gradient: [
                0xe60b21, 0xe60b21, 0x5742f5, 0x5742f5, 0xfcba03, 0xfcba03, 0xe60b21,
            ]
            .into_iter()
            .map(hex)
            .collect(),
            pending: hex(0x172243),
            scale: hex(0x505073),
            hint_text: hex(0x505073),
            value_text: hex(0xffffff),
            font_family: "Sans".to_string(),
        }
    }
}

impl Theme {
    /// Gradient color at `fraction` of a full turn, stops evenly spaced.
    pub fn gradient_at(&self, fraction: f64) -> Srgba<f64> {
        let Some(&first) = self.gradient.first() else {
            return self.pending;
        };
        if self.gradient.len() == 1 {
            return first;
        }
        let position = fraction.clamp(0.0, 1.0) * (self.gradient.len() - 1) as f64;
        let index = (position.floor() as usize).min(self.gradient.len() - 2);
        let local = position - index as f64;
        self.gradient[index].mix(self.gradient[index + 1], local)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.degree-window, .degree-drawing-area {
    background-color: #0b1122;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Srgba<f64>, b: Srgba<f64>) -> bool {
        let (a, b) = (a.into_components(), b.into_components());
        (a.0 - b.0).abs() < 1e-9
            && (a.1 - b.1).abs() < 1e-9
            && (a.2 - b.2).abs() < 1e-9
            && (a.3 - b.3).abs() < 1e-9
    }

    #[test]
    fn test_hex() {
        let c = hex(0xff0080);
        assert!(close(c, Srgba::new(1.0, 0.0, 128.0 / 255.0, 1.0)));
    }

    #[test]
    fn test_gradient_stops() {
        let theme = Theme::default();
        let red = hex(0xe60b21);
        let blue = hex(0x5742f5);
        assert!(close(theme.gradient_at(0.0), red));
        assert!(close(theme.gradient_at(1.0), red));
        assert!(close(theme.gradient_at(2.0 / 6.0), blue));
        assert!(close(theme.gradient_at(-1.0), red));

        let halfway = theme.gradient_at(1.5 / 6.0);
        assert!(close(halfway, red.mix(blue, 0.5)));
    }
}
