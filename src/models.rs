//! Data models for the dependency viewer.
//!
//! This module contains the payloads exchanged with the NLP server, the
//! token/arc types fed into the layout engine, and the viewer configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::layout::LayoutSettings;
use crate::viewport::ZoomSettings;

// ============================================================================
// Dependency Parse
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub id: u32,
    pub text: String,
    pub pos: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
}

impl Token {
    pub fn new(id: u32, text: &str, pos: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            pos: pos.to_string(),
            tag: None,
            dep: None,
            head: None,
            lemma: None,
        }
    }
}

/// Which end of an arc carries the arrowhead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArcDirection {
    Left,
    Right,
}

impl std::fmt::Display for ArcDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArcDirection::Left => write!(f, "left"),
            ArcDirection::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DependencyArc {
    pub start: u32,
    pub end: u32,
    pub label: String,
    pub dir: ArcDirection,
}

impl DependencyArc {
    pub fn new(start: u32, end: u32, label: &str, dir: ArcDirection) -> Self {
        Self {
            start,
            end,
            label: label.to_string(),
            dir,
        }
    }

    /// Token-index distance between the two endpoints.
    pub fn distance(&self) -> u32 {
        self.start.abs_diff(self.end)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParseData {
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub arcs: Vec<DependencyArc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Papers and Search
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TermCount {
    pub term: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityTypeStats {
    pub count: u32,
    #[serde(default)]
    pub terms: Vec<TermCount>,
}

pub type EntityStatistics = BTreeMap<String, EntityTypeStats>;

/// Response of `POST /visualize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperView {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub viz_title_html: String,
    #[serde(default)]
    pub viz_abstract_html: String,
    #[serde(default)]
    pub entity_statistics: EntityStatistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Form fields of `POST /search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub term: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

fn default_scope() -> String {
    "all".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub pmid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Response of `POST /search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub local_count: Option<u32>,
    #[serde(default)]
    pub pubmed_count: Option<u32>,
    #[serde(default)]
    pub results: Vec<SearchHit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Entity Info
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityInfoRequest {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraitInfo {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub related_traits: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// Response of `POST /get_entity_info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityInfo {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub trait_info: Option<TraitInfo>,
    #[serde(default)]
    pub external_links: Option<Vec<ExternalLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Viewer Configuration
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityColor {
    pub background: String,
    pub border: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualizationConfig {
    #[serde(default)]
    pub entity_colors: BTreeMap<String, EntityColor>,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub zoom: ZoomSettings,
}

/// Shape of `/static/config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub visualization: VisualizationConfig,
}

/// Responses that may carry a server-reported `error` field.
pub trait ServerReported {
    fn server_error(&self) -> Option<&str>;
}

macro_rules! server_reported {
    ($($ty:ty),*) => {
        $(impl ServerReported for $ty {
            fn server_error(&self) -> Option<&str> {
                self.error.as_deref().filter(|e| !e.is_empty())
            }
        })*
    };
}

server_reported!(ParseData, PaperView, SearchResponse, EntityInfo);

impl ServerReported for ViewerConfig {
    fn server_error(&self) -> Option<&str> {
        None
    }
}
