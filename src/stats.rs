//! Entity statistics table and colour legend.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{EntityColor, EntityStatistics, TermCount, ViewerConfig};

pub const FALLBACK_COLOR: &str = "#cccccc";
const TOP_TERMS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct EntityRow {
    pub label: String,
    pub count: u32,
    pub top_terms: Vec<TermCount>,
    pub color: String,
}

impl EntityRow {
    /// `term (count)` pairs joined for display.
    pub fn top_terms_text(&self) -> String {
        self.top_terms
            .iter()
            .map(|t| format!("{} ({})", t.term, t.count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One row per entity type, most frequent type first.
pub fn summarize(stats: &EntityStatistics, config: &ViewerConfig) -> Vec<EntityRow> {
    let mut rows: Vec<EntityRow> = stats
        .iter()
        .map(|(label, s)| EntityRow {
            label: label.clone(),
            count: s.count,
            top_terms: s.terms.iter().take(TOP_TERMS).cloned().collect(),
            color: config
                .visualization
                .entity_colors
                .get(label)
                .map(|c| c.background.clone())
                .unwrap_or_else(|| FALLBACK_COLOR.to_string()),
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    rows
}

/// Legend entries in label order.
pub fn legend(config: &ViewerConfig) -> Vec<(&str, &EntityColor)> {
    config
        .visualization
        .entity_colors
        .iter()
        .map(|(label, color)| (label.as_str(), color))
        .collect()
}

fn hex_color() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").expect("valid colour regex"))
}

/// Lighten (positive `amount`) or darken a `#rrggbb` colour. Returns `None`
/// for anything that is not a six-digit hex colour.
pub fn adjust_color(color: &str, amount: i32) -> Option<String> {
    let caps = hex_color().captures(color.trim())?;
    let hex = &caps[1];
    let channel = |i: usize| -> Option<u8> {
        let v = i32::from(u8::from_str_radix(&hex[i..i + 2], 16).ok()?);
        Some((v + amount).clamp(0, 255) as u8)
    };
    Some(format!("#{:02x}{:02x}{:02x}", channel(0)?, channel(2)?, channel(4)?))
}
