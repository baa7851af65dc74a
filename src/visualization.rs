//! One dependency visualization: the laid-out scene plus its view transform.
//!
//! Callers own the instance and pass it around; rendering a new parse
//! replaces the scene, zooming only touches the transform.

use tracing::debug;

use crate::layout::{build_scene, LayoutSettings, Scene, SkippedArc};
use crate::models::ParseData;
use crate::render::{render_scene, SvgSink};
use crate::viewport::{ViewTransform, ZoomAction, ZoomSettings};

pub const NO_DATA_MESSAGE: &str = "No parsing data available.";

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Nothing to draw; show the placeholder message.
    NoData,
    Graph { svg: String, skipped: Vec<SkippedArc> },
}

impl Rendered {
    /// HTML fragment for the visualization container.
    pub fn to_html(&self) -> String {
        match self {
            Rendered::NoData => format!("<p>{}</p>", NO_DATA_MESSAGE),
            Rendered::Graph { svg, .. } => svg.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DependencyVisualization {
    settings: LayoutSettings,
    zoom: ZoomSettings,
    transform: ViewTransform,
    scene: Option<Scene>,
}

impl DependencyVisualization {
    pub fn new(settings: LayoutSettings, zoom: ZoomSettings) -> Self {
        Self {
            settings,
            zoom,
            transform: ViewTransform::default(),
            scene: None,
        }
    }

    pub fn with_transform(mut self, transform: ViewTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Lay out `parse` and draw it. Empty input yields [`Rendered::NoData`]
    /// without touching the layout engine.
    pub fn render(&mut self, parse: &ParseData) -> Rendered {
        if parse.tokens.is_empty() {
            self.scene = None;
            return Rendered::NoData;
        }

        let scene = build_scene(parse, &self.settings);
        debug!(
            tokens = scene.tokens.len(),
            arcs = scene.arcs.len(),
            skipped = scene.skipped.len(),
            "laid out dependency scene"
        );
        self.scene = Some(scene);
        self.redraw()
    }

    /// Draw the current scene with the current transform.
    pub fn redraw(&self) -> Rendered {
        match &self.scene {
            None => Rendered::NoData,
            Some(scene) => Rendered::Graph {
                svg: render_scene(scene, &self.transform, SvgSink::from_settings(&self.settings)),
                skipped: scene.skipped.clone(),
            },
        }
    }

    pub fn apply(&mut self, action: ZoomAction) -> Rendered {
        self.transform.apply(action, &self.zoom);
        self.redraw()
    }

    pub fn zoom_in(&mut self) -> Rendered {
        self.apply(ZoomAction::In)
    }

    pub fn zoom_out(&mut self) -> Rendered {
        self.apply(ZoomAction::Out)
    }

    pub fn reset_zoom(&mut self) -> Rendered {
        self.apply(ZoomAction::Reset)
    }
}

impl Default for DependencyVisualization {
    fn default() -> Self {
        Self::new(LayoutSettings::default(), ZoomSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArcDirection, DependencyArc, Token};

    fn parse() -> ParseData {
        ParseData {
            tokens: vec![
                Token::new(0, "TP53", "PROPN"),
                Token::new(1, "regulates", "VERB"),
                Token::new(2, "apoptosis", "NOUN"),
            ],
            arcs: vec![
                DependencyArc::new(0, 1, "nsubj", ArcDirection::Left),
                DependencyArc::new(1, 2, "dobj", ArcDirection::Right),
                DependencyArc::new(2, 5, "punct", ArcDirection::Right),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_no_tokens_renders_placeholder() {
        let mut viz = DependencyVisualization::default();
        let rendered = viz.render(&ParseData::default());
        assert_eq!(rendered, Rendered::NoData);
        assert!(viz.scene().is_none());
        assert_eq!(rendered.to_html(), "<p>No parsing data available.</p>");
    }

    #[test]
    fn test_render_reports_skipped_arcs() {
        let mut viz = DependencyVisualization::default();
        match viz.render(&parse()) {
            Rendered::Graph { svg, skipped } => {
                assert_eq!(skipped.len(), 1);
                assert_eq!(skipped[0].missing, vec![5]);
                assert_eq!(svg.matches("class=\"dependency-arc\"").count(), 2);
            }
            Rendered::NoData => panic!("expected a graph"),
        }
    }

    #[test]
    fn test_zoom_keeps_layout() {
        let mut viz = DependencyVisualization::default();
        viz.render(&parse());
        let before = viz.scene().cloned();

        viz.zoom_in();
        viz.zoom_in();
        let rendered = viz.zoom_out();
        assert_eq!(viz.scene().cloned(), before);
        assert!((viz.transform().scale - 1.2).abs() < 1e-9);
        assert!(rendered.to_html().contains("scale(1.2"));

        viz.reset_zoom();
        assert_eq!(viz.transform(), ViewTransform::default());
    }

    #[test]
    fn test_zoom_without_scene_is_no_data() {
        let mut viz = DependencyVisualization::default();
        assert_eq!(viz.zoom_in(), Rendered::NoData);
        assert!((viz.transform().scale - 1.2).abs() < 1e-12);
    }
}
