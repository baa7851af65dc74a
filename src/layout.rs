//! Dependency graph layout.
//!
//! Turns an ordered token list and a list of labelled arcs into a geometric
//! scene: token anchor positions on one shared baseline and one quadratic
//! curve per arc. The scene is plain data; drawing it is the job of a
//! [`crate::render::SceneSink`].
//!
//! Arc heights grow with the distance between endpoints and are capped. This
//! keeps nested arcs apart in the common case but is not a collision solver;
//! crossing arcs are left as they fall.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::models::{ArcDirection, DependencyArc, ParseData, Token};

// ============================================================================
// Settings
// ============================================================================

/// Geometry constants. Every field can be overridden from the `layout`
/// section of the viewer config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutSettings {
    pub min_width: f64,
    pub height: f64,
    pub token_spacing: f64,
    pub baseline_y: f64,
    /// Arcs attach this far above the token baseline.
    pub anchor_offset: f64,
    pub pos_tag_offset: f64,
    pub base_arc_height: f64,
    pub per_token_increment: f64,
    pub max_arc_height: f64,
    pub label_offset: f64,
    pub arrow_size: f64,
    pub font_size: f64,
    pub pos_tag_size: f64,
    pub label_size: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            min_width: 800.0,
            height: 400.0,
            token_spacing: 80.0,
            baseline_y: 250.0,
            anchor_offset: 5.0,
            pos_tag_offset: 30.0,
            base_arc_height: 30.0,
            per_token_increment: 15.0,
            max_arc_height: 120.0,
            label_offset: 8.0,
            arrow_size: 6.0,
            font_size: 14.0,
            pos_tag_size: 11.0,
            label_size: 12.0,
        }
    }
}

impl LayoutSettings {
    /// Check the values a usable drawing depends on.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("min_width", self.min_width),
            ("token_spacing", self.token_spacing),
            ("max_arc_height", self.max_arc_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("layout.{} must be a finite positive number, got {}", name, value));
            }
        }
        Ok(())
    }

    /// Canvas width for `token_count` tokens; grows with the count above a floor.
    pub fn canvas_width(&self, token_count: usize) -> f64 {
        self.min_width.max(self.token_spacing * token_count as f64)
    }

    /// Curve height for an arc spanning `distance` token positions.
    pub fn arc_height(&self, distance: u32) -> f64 {
        self.max_arc_height
            .min(self.base_arc_height + distance as f64 * self.per_token_increment)
    }
}

// ============================================================================
// Scene
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenPosition {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

/// A positioned token ready for drawing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenNode {
    pub id: u32,
    pub text: String,
    pub pos: String,
    pub anchor: Point,
    pub pos_tag_anchor: Point,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArcCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
    pub height: f64,
    /// Triangle vertices; the first vertex is the tip.
    pub arrow: [Point; 3],
    pub label: String,
    pub label_anchor: Point,
    pub dir: ArcDirection,
}

impl ArcCurve {
    /// SVG path data for the curve.
    pub fn path_data(&self) -> String {
        format!(
            "M{},{} Q{},{} {},{}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }
}

/// An arc dropped from the scene because an endpoint has no token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedArc {
    pub arc: DependencyArc,
    pub missing: Vec<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub tokens: Vec<TokenNode>,
    pub arcs: Vec<ArcCurve>,
    pub skipped: Vec<SkippedArc>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Place tokens left to right at fixed intervals, centred in the canvas.
pub fn compute_positions(tokens: &[Token], settings: &LayoutSettings) -> Vec<TokenPosition> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let span = settings.token_spacing * (tokens.len() - 1) as f64;
    let start_x = (settings.canvas_width(tokens.len()) - span) / 2.0;

    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| TokenPosition {
            id: token.id,
            x: start_x + index as f64 * settings.token_spacing,
            y: settings.baseline_y,
        })
        .collect()
}

fn arrow_points(tip: Point, dir: ArcDirection, size: f64) -> [Point; 3] {
    // Arrow opens away from the tip, back towards the curve.
    let back = match dir {
        ArcDirection::Left => tip.x + size,
        ArcDirection::Right => tip.x - size,
    };
    [
        tip,
        Point { x: back, y: tip.y - size },
        Point { x: back, y: tip.y + size },
    ]
}

/// Build the curve for one arc between two resolved token positions.
pub fn build_curve(
    arc: &DependencyArc,
    from: &TokenPosition,
    to: &TokenPosition,
    settings: &LayoutSettings,
) -> ArcCurve {
    let height = settings.arc_height(arc.distance());
    let start = Point {
        x: from.x,
        y: from.y - settings.anchor_offset,
    };
    let end = Point {
        x: to.x,
        y: to.y - settings.anchor_offset,
    };
    let mid_x = (start.x + end.x) / 2.0;
    let control = Point {
        x: mid_x,
        y: start.y - height,
    };

    let tip = match arc.dir {
        ArcDirection::Left => start,
        ArcDirection::Right => Point { x: end.x, y: start.y },
    };

    ArcCurve {
        start,
        control,
        end,
        height,
        arrow: arrow_points(tip, arc.dir, settings.arrow_size),
        label: arc.label.clone(),
        label_anchor: Point {
            x: mid_x,
            y: control.y - settings.label_offset,
        },
        dir: arc.dir,
    }
}

/// Lay out a whole parse. Arcs referencing unknown token ids are skipped,
/// logged, and reported in [`Scene::skipped`].
pub fn build_scene(parse: &ParseData, settings: &LayoutSettings) -> Scene {
    if parse.tokens.is_empty() {
        return Scene::default();
    }

    let positions = compute_positions(&parse.tokens, settings);
    let by_id: HashMap<u32, &TokenPosition> = positions.iter().map(|p| (p.id, p)).collect();

    let mut arcs = Vec::with_capacity(parse.arcs.len());
    let mut skipped = Vec::new();

    for arc in &parse.arcs {
        match (by_id.get(&arc.start), by_id.get(&arc.end)) {
            (Some(from), Some(to)) => arcs.push(build_curve(arc, from, to, settings)),
            (from, to) => {
                let mut missing = Vec::new();
                if from.is_none() {
                    missing.push(arc.start);
                }
                if to.is_none() && arc.end != arc.start {
                    missing.push(arc.end);
                }
                warn!(
                    start = arc.start,
                    end = arc.end,
                    label = %arc.label,
                    "token position not found for arc, skipping"
                );
                skipped.push(SkippedArc {
                    arc: arc.clone(),
                    missing,
                });
            }
        }
    }

    let tokens = parse
        .tokens
        .iter()
        .zip(&positions)
        .map(|(token, p)| TokenNode {
            id: token.id,
            text: token.text.clone(),
            pos: token.pos.clone(),
            anchor: Point { x: p.x, y: p.y },
            pos_tag_anchor: Point {
                x: p.x,
                y: p.y + settings.pos_tag_offset,
            },
        })
        .collect();

    Scene {
        width: settings.canvas_width(parse.tokens.len()),
        height: settings.height,
        tokens,
        arcs,
        skipped,
    }
}
