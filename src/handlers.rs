//! HTTP route handlers for the viewer.
//!
//! Every page handler answers with HTML, including on failure: backend
//! errors are shown in the page and the forms stay usable.

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::layout::{build_scene, Scene};
use crate::models::{EntityInfo, EntityInfoRequest, ParseData, SearchQuery};
use crate::templates::{
    base_html, error_banner, render_entity_page, render_index_page, render_paper_page,
    render_parse_page, render_search_page,
};
use crate::viewport::{ViewTransform, ZoomAction};
use crate::visualization::DependencyVisualization;
use crate::AppState;

fn parse_number(v: &Option<String>) -> Option<f64> {
    v.as_deref().and_then(|s| s.trim().parse::<f64>().ok())
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Index Handler
// ============================================================================

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(base_html("Annotation Viewer", &render_index_page(&state.viewer_config)))
}

// ============================================================================
// Paper Handler
// ============================================================================

#[derive(Deserialize)]
pub struct PaperParams {
    pub pmid: Option<String>,
}

pub async fn paper(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaperParams>,
) -> Html<String> {
    let Some(pmid) = non_empty(&params.pmid) else {
        let body = format!(
            "{}{}",
            error_banner(Some("Please enter a PMID.")),
            render_index_page(&state.viewer_config)
        );
        return Html(base_html("Annotation Viewer", &body));
    };

    match state.client.visualize(pmid).await {
        Ok(paper) => {
            info!(pmid, entity_types = paper.entity_statistics.len(), "loaded paper");
            let title = if paper.title.is_empty() { pmid.to_string() } else { paper.title.clone() };
            Html(base_html(&title, &render_paper_page(pmid, &paper, &state.viewer_config)))
        }
        Err(e) => {
            warn!(pmid, error = %e, "visualize failed");
            let body = format!(
                "{}{}",
                error_banner(Some(&e.user_message("fetching data"))),
                render_index_page(&state.viewer_config)
            );
            Html(base_html("Annotation Viewer", &body))
        }
    }
}

// ============================================================================
// Search Handler
// ============================================================================

#[derive(Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
    pub scope: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let query = SearchQuery {
        term: params.term.clone().unwrap_or_default(),
        scope: non_empty(&params.scope).unwrap_or("all").to_string(),
        start_date: non_empty(&params.start_date).map(str::to_string),
        end_date: non_empty(&params.end_date).map(str::to_string),
    };

    let body = match (&params.term, non_empty(&params.term)) {
        (None, _) => render_search_page(&query, None, None),
        (Some(_), None) => render_search_page(&query, None, Some("Please enter a search term.")),
        (Some(_), Some(_)) => match state.client.search(&query).await {
            Ok(results) => {
                info!(term = %query.term, count = results.count, "search complete");
                render_search_page(&query, Some(&results), None)
            }
            Err(e) => {
                warn!(term = %query.term, error = %e, "search failed");
                render_search_page(&query, None, Some(&e.user_message("searching")))
            }
        },
    };

    Html(base_html("Search", &body))
}

// ============================================================================
// Dependency Parse Handler
// ============================================================================

#[derive(Deserialize, Default)]
pub struct ParseParams {
    pub text: Option<String>,
    pub scale: Option<String>,
    pub tx: Option<String>,
    pub ty: Option<String>,
    pub zoom: Option<String>,
    pub dx: Option<String>,
    pub dy: Option<String>,
}

impl ParseParams {
    /// Transform carried by the request, with any zoom or pan applied.
    pub fn transform(&self, state: &AppState) -> ViewTransform {
        let zoom = &state.viewer_config.visualization.zoom;
        let mut transform = ViewTransform::from_parts(
            parse_number(&self.scale),
            parse_number(&self.tx),
            parse_number(&self.ty),
            zoom,
        );
        if let Some(action) = self.zoom.as_deref().and_then(ZoomAction::parse) {
            transform.apply(action, zoom);
        }
        let dx = parse_number(&self.dx).filter(|v| v.is_finite()).unwrap_or(0.0);
        let dy = parse_number(&self.dy).filter(|v| v.is_finite()).unwrap_or(0.0);
        transform.pan(dx, dy);
        transform
    }
}

pub async fn parse_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ParseParams>,
) -> Html<String> {
    let transform = params.transform(&state);
    let text = params.text.as_deref().unwrap_or("").trim().to_string();

    if text.is_empty() {
        let error = params.text.as_ref().map(|_| "Please enter a sentence.");
        return Html(base_html(
            "Dependency Parse",
            &render_parse_page("", None, &transform, error),
        ));
    }

    let body = match state.client.parse_sentence(&text).await {
        Ok(parse) => {
            let viz_config = &state.viewer_config.visualization;
            let mut viz = DependencyVisualization::new(viz_config.layout.clone(), viz_config.zoom.clone())
                .with_transform(transform);
            let rendered = viz.render(&parse);
            render_parse_page(&text, Some(&rendered), &transform, None)
        }
        Err(e) => {
            warn!(error = %e, "sentence parse failed");
            let message = format!("Failed to parse sentence: {}", e.user_message("parsing the sentence"));
            render_parse_page(&text, None, &transform, Some(&message))
        }
    };

    Html(base_html("Dependency Parse", &body))
}

// ============================================================================
// Entity Info Handler
// ============================================================================

pub async fn entity(
    State(state): State<Arc<AppState>>,
    Query(request): Query<EntityInfoRequest>,
) -> Html<String> {
    let (info, error) = match state.client.entity_info(&request).await {
        Ok(info) => (info, None),
        Err(e) => {
            warn!(term = %request.term, error = %e, "entity info failed");
            let fallback = EntityInfo {
                term: request.term.clone(),
                label: request.label.clone(),
                source: request.source.clone(),
                definition: Some("Error loading entity information".to_string()),
                ..Default::default()
            };
            (fallback, Some(e.user_message("loading entity information")))
        }
    };

    Html(base_html(
        &format!("{} ({})", info.term, info.label),
        &render_entity_page(&info, error.as_deref()),
    ))
}

// ============================================================================
// Layout API
// ============================================================================

/// Pure layout: parse data in, scene description out.
pub async fn layout_api(
    State(state): State<Arc<AppState>>,
    Json(parse): Json<ParseData>,
) -> Json<Scene> {
    Json(build_scene(&parse, &state.viewer_config.visualization.layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::models::{ArcDirection, DependencyArc, Token, ViewerConfig};
    use std::time::Duration;

    /// State whose backend refuses connections.
    fn offline_state() -> Arc<AppState> {
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        Arc::new(AppState::new(client, ViewerConfig::default()))
    }

    fn params(pairs: &[(&str, &str)]) -> ParseParams {
        let mut p = ParseParams::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "text" => p.text = v,
                "scale" => p.scale = v,
                "tx" => p.tx = v,
                "ty" => p.ty = v,
                "zoom" => p.zoom = v,
                "dx" => p.dx = v,
                "dy" => p.dy = v,
                _ => {}
            }
        }
        p
    }

    #[test]
    fn test_transform_from_params() {
        let state = offline_state();
        let t = params(&[("scale", "1.2"), ("tx", "40"), ("zoom", "out")]).transform(&state);
        assert!((t.scale - 1.0).abs() < 1e-12);
        assert_eq!(t.translate_x, 40.0);

        let t = params(&[("scale", "abc"), ("dx", "-40"), ("dy", "inf")]).transform(&state);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.translate_x, -40.0);
        assert_eq!(t.translate_y, 0.0);

        let t = params(&[("scale", "3"), ("tx", "10"), ("zoom", "reset")]).transform(&state);
        assert_eq!(t, ViewTransform::default());
    }

    #[tokio::test]
    async fn test_parse_page_backend_down() {
        let Html(page) = parse_page(State(offline_state()), Query(params(&[("text", "IL-6 binds")]))).await;
        assert!(page.contains("Failed to parse sentence: An unexpected error occurred while parsing the sentence."));
        assert!(page.contains("Could not generate dependency parse."));
    }

    #[tokio::test]
    async fn test_parse_page_empty_text() {
        let Html(page) = parse_page(State(offline_state()), Query(params(&[("text", "  ")]))).await;
        assert!(page.contains("Please enter a sentence."));

        let Html(page) = parse_page(State(offline_state()), Query(ParseParams::default())).await;
        assert!(!page.contains(r#"id="error-message""#));
    }

    #[tokio::test]
    async fn test_entity_fallback() {
        let request = EntityInfoRequest {
            term: "IL-6".to_string(),
            label: "GENE_OR_GENE_PRODUCT".to_string(),
            source: "model".to_string(),
        };
        let Html(page) = entity(State(offline_state()), Query(request)).await;
        assert!(page.contains("Error loading entity information"));
        assert!(page.contains("IL-6 (GENE_OR_GENE_PRODUCT)"));
    }

    #[tokio::test]
    async fn test_paper_requires_pmid() {
        let Html(page) = paper(State(offline_state()), Query(PaperParams { pmid: Some(" ".to_string()) })).await;
        assert!(page.contains("Please enter a PMID."));
    }

    #[tokio::test]
    async fn test_layout_api() {
        let parse = ParseData {
            tokens: vec![Token::new(0, "cells", "NOUN"), Token::new(1, "divide", "VERB")],
            arcs: vec![
                DependencyArc::new(0, 1, "nsubj", ArcDirection::Left),
                DependencyArc::new(1, 4, "punct", ArcDirection::Right),
            ],
            ..Default::default()
        };
        let Json(scene) = layout_api(State(offline_state()), Json(parse)).await;
        assert_eq!(scene.tokens.len(), 2);
        assert_eq!(scene.arcs.len(), 1);
        assert_eq!(scene.skipped.len(), 1);
    }
}
