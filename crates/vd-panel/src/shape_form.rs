//! The shape generator form.
//!
//! Fields only enforce the same minimums a native number input would;
//! there is no upper bound. Submitting is blocked while a request is in
//! flight.

use vd_core::model::{Rgb, ShapeType};
use vd_core::protocol::{ShapeSpec, UiMessage};

/// Color used when the form's hex field does not parse.
pub const FALLBACK_COLOR: Rgb = Rgb::UI_FALLBACK;

pub fn hex_to_rgb(hex: &str) -> Rgb {
    Rgb::from_hex_or(hex, FALLBACK_COLOR)
}

/// One field change.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEdit {
    Type(ShapeType),
    Width(f32),
    Height(f32),
    Count(u32),
    Spacing(f32),
    Color(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeForm {
    pub shape_type: ShapeType,
    pub width: f32,
    pub height: f32,
    pub count: u32,
    pub spacing: f32,
    /// Hex as typed.
    pub color: String,
    in_flight: bool,
}

impl Default for ShapeForm {
    fn default() -> Self {
        Self {
            shape_type: ShapeType::Rectangle,
            width: 100.0,
            height: 100.0,
            count: 1,
            spacing: 20.0,
            color: "#6366f1".into(),
            in_flight: false,
        }
    }
}

fn at_least(value: f32, min: f32) -> f32 {
    if value.is_nan() { min } else { value.max(min) }
}

impl ShapeForm {
    pub fn edit(&mut self, edit: ShapeEdit) {
        match edit {
            ShapeEdit::Type(t) => self.shape_type = t,
            ShapeEdit::Width(w) => self.width = at_least(w, 1.0),
            ShapeEdit::Height(h) => self.height = at_least(h, 1.0),
            ShapeEdit::Count(n) => self.count = n.max(1),
            ShapeEdit::Spacing(s) => self.spacing = at_least(s, 0.0),
            ShapeEdit::Color(c) => self.color = c,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight
    }

    /// Build the request and mark it in flight. `None` while a previous
    /// request has not been answered.
    pub fn submit(&mut self) -> Option<UiMessage> {
        if self.in_flight {
            return None;
        }
        let spec = ShapeSpec {
            shape_type: self.shape_type,
            width: self.width,
            height: self.height,
            color: hex_to_rgb(&self.color),
            count: self.count,
            spacing: self.spacing,
        };
        if let Err(e) = spec.validate() {
            log::warn!("shape form is invalid: {e}");
            return None;
        }
        self.in_flight = true;
        Some(UiMessage::CreateShapes(spec))
    }

    /// The controller answered (`SHAPES_CREATED` or `ERROR`).
    pub fn settle(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ui_fallback_differs_from_black() {
        assert_eq!(hex_to_rgb("not-a-color"), Rgb::new(0.4, 0.4, 0.9));
        let c = hex_to_rgb("#6366f1");
        assert!((c.r - 0.388).abs() < 1e-3);
        assert!((c.g - 0.400).abs() < 1e-3);
        assert!((c.b - 0.945).abs() < 1e-3);
    }

    #[test]
    fn minimums_clamp_but_maxima_do_not() {
        let mut form = ShapeForm::default();
        form.edit(ShapeEdit::Width(0.0));
        form.edit(ShapeEdit::Height(f32::NAN));
        form.edit(ShapeEdit::Count(0));
        form.edit(ShapeEdit::Spacing(-5.0));
        assert_eq!((form.width, form.height, form.count, form.spacing), (1.0, 1.0, 1, 0.0));

        form.edit(ShapeEdit::Count(10_000));
        assert_eq!(form.count, 10_000);
    }

    #[test]
    fn submit_is_blocked_until_settled() {
        let mut form = ShapeForm::default();
        form.edit(ShapeEdit::Color("nope".into()));
        let Some(UiMessage::CreateShapes(spec)) = form.submit() else {
            panic!("expected a request");
        };
        assert_eq!(spec.color, FALLBACK_COLOR);
        assert!(!form.can_submit());
        assert_eq!(form.submit(), None);

        form.settle();
        assert!(form.submit().is_some());
    }
}
