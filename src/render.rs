//! Render sinks for laid-out dependency scenes.
//!
//! [`render_scene`] walks a [`Scene`] and feeds it to a [`SceneSink`]. Arcs
//! go out before tokens so the words are drawn on top of the curves.

use std::fmt::Write;

use crate::layout::{ArcCurve, Scene, TokenNode};
use crate::templates::html_escape;
use crate::viewport::ViewTransform;

/// Drawing target for a scene.
pub trait SceneSink {
    type Output;

    fn begin(&mut self, width: f64, height: f64, transform: &ViewTransform);
    fn arc(&mut self, curve: &ArcCurve);
    fn token(&mut self, node: &TokenNode);
    fn finish(self) -> Self::Output;
}

pub fn render_scene<S: SceneSink>(scene: &Scene, transform: &ViewTransform, mut sink: S) -> S::Output {
    sink.begin(scene.width, scene.height, transform);
    for curve in &scene.arcs {
        sink.arc(curve);
    }
    for node in &scene.tokens {
        sink.token(node);
    }
    sink.finish()
}

// ============================================================================
// SVG
// ============================================================================

const ARC_COLOR: &str = "#666";

/// Emits standalone SVG markup.
pub struct SvgSink {
    out: String,
    font_size: f64,
    pos_tag_size: f64,
    label_size: f64,
}

impl SvgSink {
    pub fn new(font_size: f64, pos_tag_size: f64, label_size: f64) -> Self {
        Self {
            out: String::new(),
            font_size,
            pos_tag_size,
            label_size,
        }
    }

    pub fn from_settings(settings: &crate::layout::LayoutSettings) -> Self {
        Self::new(settings.font_size, settings.pos_tag_size, settings.label_size)
    }
}

// Writing to a String cannot fail; the fmt::Result is dropped.
impl SceneSink for SvgSink {
    type Output = String;

    fn begin(&mut self, width: f64, height: f64, transform: &ViewTransform) {
        let _ = write!(
            self.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" class="dependency-svg"><g class="dependency-root" transform="{}">"#,
            width,
            height,
            transform.transform_attr()
        );
    }

    fn arc(&mut self, curve: &ArcCurve) {
        let points = curve
            .arrow
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            self.out,
            r#"<g class="dependency-arc" data-dir="{dir}"><path d="{d}" fill="none" stroke="{color}" stroke-width="1.5"/><polygon class="arrow" points="{points}" fill="{color}"/><text class="arc-label" x="{lx}" y="{ly}" text-anchor="middle" font-size="{size}" font-weight="bold">{label}</text></g>"#,
            dir = curve.dir,
            d = curve.path_data(),
            color = ARC_COLOR,
            points = points,
            lx = curve.label_anchor.x,
            ly = curve.label_anchor.y,
            size = self.label_size,
            label = html_escape(&curve.label),
        );
    }

    fn token(&mut self, node: &TokenNode) {
        let _ = write!(
            self.out,
            r#"<g class="token" data-id="{id}"><text x="{x}" y="{y}" text-anchor="middle" font-size="{fs}" font-weight="bold">{text}</text><text class="pos-tag" x="{x}" y="{py}" text-anchor="middle" font-size="{ps}">{pos}</text></g>"#,
            id = node.id,
            x = node.anchor.x,
            y = node.anchor.y,
            fs = self.font_size,
            text = html_escape(&node.text),
            py = node.pos_tag_anchor.y,
            ps = self.pos_tag_size,
            pos = html_escape(&node.pos),
        );
    }

    fn finish(mut self) -> String {
        self.out.push_str("</g></svg>");
        self.out
    }
}
