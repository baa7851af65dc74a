//! Pan/zoom state for the dependency graph.
//!
//! The transform is applied to the root group of the rendered graph as a
//! single `translate(..) scale(..)`. Changing it never recomputes layout.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomSettings {
    pub factor: f64,
    pub min_scale: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            factor: 1.2,
            min_scale: 0.1,
        }
    }
}

impl ZoomSettings {
    /// Reject settings under which zooming could leave the scale at zero,
    /// infinity, or below any floor.
    pub fn validate(&self) -> Result<(), String> {
        if !self.factor.is_finite() || self.factor <= 1.0 {
            return Err(format!("zoom.factor must be a finite number above 1, got {}", self.factor));
        }
        if !self.min_scale.is_finite() || self.min_scale <= 0.0 {
            return Err(format!(
                "zoom.min_scale must be a finite positive number, got {}",
                self.min_scale
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl ViewTransform {
    /// Build a transform from untrusted values, falling back to the default
    /// scale when it is not a positive finite number.
    pub fn from_parts(scale: Option<f64>, tx: Option<f64>, ty: Option<f64>, zoom: &ZoomSettings) -> Self {
        let scale = match scale {
            Some(s) if s.is_finite() && s > 0.0 => s.max(zoom.min_scale),
            _ => 1.0,
        };
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite()).unwrap_or(0.0);
        Self {
            scale,
            translate_x: finite(tx),
            translate_y: finite(ty),
        }
    }

    pub fn zoom_in(&mut self, zoom: &ZoomSettings) {
        self.scale *= zoom.factor;
    }

    pub fn zoom_out(&mut self, zoom: &ZoomSettings) {
        self.scale /= zoom.factor;
        if self.scale < zoom.min_scale {
            self.scale = zoom.min_scale;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.translate_x += dx;
        self.translate_y += dy;
    }

    pub fn apply(&mut self, action: ZoomAction, zoom: &ZoomSettings) {
        match action {
            ZoomAction::In => self.zoom_in(zoom),
            ZoomAction::Out => self.zoom_out(zoom),
            ZoomAction::Reset => self.reset(),
        }
    }

    /// Value for the root group's `transform` attribute.
    pub fn transform_attr(&self) -> String {
        format!(
            "translate({},{}) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ZoomAction {
    In,
    Out,
    Reset,
}

impl ZoomAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "in" | "+" => Some(ZoomAction::In),
            "out" | "-" => Some(ZoomAction::Out),
            "reset" => Some(ZoomAction::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomAction::In => "in",
            ZoomAction::Out => "out",
            ZoomAction::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_in_then_out_restores_scale() {
        let zoom = ZoomSettings::default();
        let mut t = ViewTransform::default();
        t.zoom_in(&zoom);
        assert!((t.scale - 1.2).abs() < 1e-12);
        t.zoom_out(&zoom);
        assert!((t.scale - 1.0).abs() < 1e-12);

        for _ in 0..5 {
            t.zoom_in(&zoom);
        }
        for _ in 0..5 {
            t.zoom_out(&zoom);
        }
        assert!((t.scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_out_clamps_at_minimum() {
        let zoom = ZoomSettings::default();
        let mut t = ViewTransform::default();
        for _ in 0..50 {
            t.zoom_out(&zoom);
            assert!(t.scale >= zoom.min_scale);
        }
        assert_eq!(t.scale, zoom.min_scale);
    }

    #[test]
    fn test_zoom_in_has_no_maximum() {
        let zoom = ZoomSettings::default();
        let mut t = ViewTransform::default();
        for _ in 0..40 {
            t.zoom_in(&zoom);
        }
        assert!(t.scale > 1000.0);
    }

    #[test]
    fn test_reset_from_any_state() {
        let zoom = ZoomSettings::default();
        let mut t = ViewTransform::default();
        t.zoom_in(&zoom);
        t.pan(40.0, -12.5);
        t.apply(ZoomAction::Reset, &zoom);
        assert_eq!(t, ViewTransform { scale: 1.0, translate_x: 0.0, translate_y: 0.0 });
    }

    #[test]
    fn test_transform_attr() {
        let mut t = ViewTransform::default();
        assert_eq!(t.transform_attr(), "translate(0,0) scale(1)");
        t.pan(10.0, 5.5);
        t.scale = 2.0;
        assert_eq!(t.transform_attr(), "translate(10,5.5) scale(2)");
    }

    #[test]
    fn test_from_parts_rejects_bad_values() {
        let zoom = ZoomSettings::default();
        let t = ViewTransform::from_parts(Some(-3.0), Some(f64::NAN), Some(7.0), &zoom);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.translate_x, 0.0);
        assert_eq!(t.translate_y, 7.0);

        let t = ViewTransform::from_parts(Some(0.01), None, None, &zoom);
        assert_eq!(t.scale, zoom.min_scale);
    }

    #[test]
    fn test_validate_zoom_settings() {
        assert!(ZoomSettings::default().validate().is_ok());
        for (factor, min_scale) in [
            (0.0, 0.1),
            (1.0, 0.1),
            (f64::INFINITY, 0.1),
            (1.2, 0.0),
            (1.2, -5.0),
            (1.2, f64::NAN),
        ] {
            let zoom = ZoomSettings { factor, min_scale };
            assert!(zoom.validate().is_err(), "{:?} accepted", zoom);
        }
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(ZoomAction::parse("In"), Some(ZoomAction::In));
        assert_eq!(ZoomAction::parse("-"), Some(ZoomAction::Out));
        assert_eq!(ZoomAction::parse("reset"), Some(ZoomAction::Reset));
        assert_eq!(ZoomAction::parse("sideways"), None);
    }
}
