//! Paper, search, entity and index pages.

use super::components::{error_banner, html_escape};
use super::dependency::sentence_form;
use crate::models::{EntityInfo, PaperView, SearchQuery, SearchResponse, ViewerConfig};
use crate::sentences::{display_label, split_sentences};
use crate::stats::{adjust_color, legend, summarize};

/// Clean highlighted HTML produced by the server. Entity spans keep their
/// class, inline colour and data attributes; scripts and handlers go.
pub fn sanitize_highlight_html(html: &str) -> String {
    ammonia::Builder::default()
        .add_tags(&["span", "mark"])
        .add_generic_attributes(&["class", "style", "title"])
        .add_generic_attribute_prefixes(&["data-"])
        .clean(html)
        .to_string()
}

/// Link to the entity page. `source` is left out when the paper has none.
fn entity_link(term: &str, label: &str, source: Option<&str>) -> String {
    let mut link = format!(
        "/entity?term={}&label={}",
        urlencoding::encode(term),
        urlencoding::encode(label)
    );
    if let Some(source) = source {
        link.push_str("&source=");
        link.push_str(&urlencoding::encode(source));
    }
    link
}

// ============================================================================
// Legend and Statistics
// ============================================================================

pub fn render_legend(config: &ViewerConfig) -> String {
    let items: Vec<String> = legend(config)
        .into_iter()
        .map(|(label, color)| {
            format!(
                r#"<span class="legend-item" data-label="{label}" style="background: {bg}; border: 1px solid {border};">{label}</span>"#,
                label = html_escape(label),
                bg = html_escape(&color.background),
                border = html_escape(&color.border),
            )
        })
        .collect();
    if items.is_empty() {
        return String::new();
    }
    format!(r#"<div class="legend" id="legend">{}</div>"#, items.join(""))
}

pub fn render_entity_table(paper: &PaperView, config: &ViewerConfig) -> String {
    let rows = summarize(&paper.entity_statistics, config);
    if rows.is_empty() {
        return "<p>No entities found in this paper.</p>".to_string();
    }

    let source = paper.source.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let body: String = rows
        .iter()
        .map(|row| {
            let terms: Vec<String> = row
                .top_terms
                .iter()
                .map(|t| {
                    format!(
                        r#"<a href="{}">{}</a> ({})"#,
                        html_escape(&entity_link(&t.term, &row.label, source)),
                        html_escape(&t.term),
                        t.count
                    )
                })
                .collect();
            let edge = adjust_color(&row.color, -40).unwrap_or_else(|| row.color.clone());
            format!(
                r#"<tr>
                    <td><span class="entity-color-box" style="background-color: {bg}; border: 1px solid {edge};"></span>{label}</td>
                    <td>{count}</td>
                    <td>{terms}</td>
                </tr>"#,
                bg = html_escape(&row.color),
                edge = html_escape(&edge),
                label = html_escape(&row.label),
                count = row.count,
                terms = terms.join(", "),
            )
        })
        .collect();

    format!(
        r#"<table class="entity-table">
            <thead><tr><th>Entity Type</th><th>Count</th><th>Most Common Terms</th></tr></thead>
            <tbody>{}</tbody>
        </table>"#,
        body
    )
}

fn render_sentence_list(abstract_text: &str) -> String {
    let items: Vec<String> = split_sentences(abstract_text)
        .iter()
        .map(|s| {
            format!(
                r#"<li><a href="/parse?text={}" title="{}">{}</a></li>"#,
                urlencoding::encode(s),
                html_escape(s),
                html_escape(&display_label(s))
            )
        })
        .collect();
    if items.is_empty() {
        return "<p>No sentences available for parsing.</p>".to_string();
    }
    format!(r#"<ul class="sentence-list">{}</ul>"#, items.join(""))
}

// ============================================================================
// Pages
// ============================================================================

pub fn render_paper_page(pmid: &str, paper: &PaperView, config: &ViewerConfig) -> String {
    let mut meta = Vec::new();
    if let Some(journal) = paper.journal.as_deref().filter(|j| !j.is_empty()) {
        meta.push(html_escape(journal));
    }
    if let Some(source) = paper.source.as_deref().filter(|s| !s.is_empty()) {
        meta.push(format!("source: {}", html_escape(source)));
    }
    meta.push(format!("PMID {}", html_escape(pmid)));

    let title_html = if paper.viz_title_html.is_empty() {
        html_escape(&paper.title)
    } else {
        sanitize_highlight_html(&paper.viz_title_html)
    };
    let abstract_html = if paper.viz_abstract_html.is_empty() {
        html_escape(&paper.abstract_text)
    } else {
        sanitize_highlight_html(&paper.viz_abstract_html)
    };

    format!(
        r#"<h1 class="paper-title">{title}</h1>
        <div class="paper-meta">{meta}</div>
        {legend}
        <div class="paper-abstract">{abstract_html}</div>
        <h2>Entity Statistics</h2>
        {table}
        <h2>Dependency Parse</h2>
        <p><a href="/parse?text={title_link}">Parse the title</a></p>
        {sentences}"#,
        title = title_html,
        meta = meta.join(" &middot; "),
        legend = render_legend(config),
        abstract_html = abstract_html,
        table = render_entity_table(paper, config),
        title_link = urlencoding::encode(&paper.title),
        sentences = render_sentence_list(&paper.abstract_text),
    )
}

pub fn search_form(query: &SearchQuery) -> String {
    let scope_option = |value: &str, label: &str| {
        let selected = if query.scope == value { " selected" } else { "" };
        format!(r#"<option value="{value}"{selected}>{label}</option>"#)
    };
    format!(
        r#"<form action="/search" method="get" class="viewer-form">
            <input type="text" name="term" placeholder="Search term" value="{term}">
            <select name="scope">{all}{local}{pubmed}</select>
            <input type="date" name="start_date" value="{start}">
            <input type="date" name="end_date" value="{end}">
            <button class="btn" type="submit">Search</button>
        </form>"#,
        term = html_escape(&query.term),
        all = scope_option("all", "All sources"),
        local = scope_option("local", "Local database"),
        pubmed = scope_option("pubmed", "PubMed"),
        start = html_escape(query.start_date.as_deref().unwrap_or("")),
        end = html_escape(query.end_date.as_deref().unwrap_or("")),
    )
}

pub fn render_search_page(query: &SearchQuery, results: Option<&SearchResponse>, error: Option<&str>) -> String {
    let body = match results {
        None => String::new(),
        Some(res) if res.count == 0 || res.results.is_empty() => "<p>No results found.</p>".to_string(),
        Some(res) => {
            let mut summary = format!("Found {} results", res.count);
            if let (Some(local), Some(pubmed)) = (res.local_count, res.pubmed_count) {
                summary.push_str(&format!(" ({} from local database, {} from PubMed)", local, pubmed));
            }
            let items: String = res
                .results
                .iter()
                .map(|hit| {
                    let badge = match hit.source.as_deref() {
                        Some("pubmed") => "PubMed",
                        _ => "Local",
                    };
                    format!(
                        r#"<li><span class="type-badge">{badge}</span> PMID: <a href="/paper?pmid={pmid_q}">{pmid}</a> - {title}<span class="meta">{journal}</span></li>"#,
                        badge = badge,
                        pmid_q = urlencoding::encode(&hit.pmid),
                        pmid = html_escape(&hit.pmid),
                        title = html_escape(&hit.title),
                        journal = html_escape(hit.journal.as_deref().unwrap_or("")),
                    )
                })
                .collect();
            format!(r#"<div class="search-summary">{}</div><ul class="result-list">{}</ul>"#, summary, items)
        }
    };

    format!(
        r#"<h1>Search</h1>
        {form}
        {error}
        {body}"#,
        form = search_form(query),
        error = error_banner(error),
        body = body,
    )
}

pub fn render_entity_page(info: &EntityInfo, error: Option<&str>) -> String {
    let mut sections = vec![format!(
        r#"<div class="info-section">
            <h2>Basic Information</h2>
            <p><strong>Label:</strong> {}</p>
            <p><strong>Source:</strong> {}</p>
        </div>"#,
        html_escape(&info.label),
        html_escape(&info.source)
    )];

    if let Some(definition) = info.definition.as_deref().filter(|d| !d.is_empty()) {
        sections.push(format!(
            r#"<div class="info-section"><h2>Definition</h2><p>{}</p></div>"#,
            html_escape(definition)
        ));
    }

    if let Some(traits) = &info.trait_info {
        let list = |items: &[String]| -> String {
            items
                .iter()
                .map(|i| format!("<li>{}</li>", html_escape(i)))
                .collect()
        };
        sections.push(format!(
            r#"<div class="info-section">
                <h2>Trait-specific Information</h2>
                <p><strong>Category:</strong> {}</p>
                <h3>Related Traits</h3><ul>{}</ul>
                <h3>Synonyms</h3><ul>{}</ul>
            </div>"#,
            html_escape(traits.category.as_deref().unwrap_or("")),
            list(&traits.related_traits),
            list(&traits.synonyms)
        ));
    }

    if let Some(links) = info.external_links.as_ref().filter(|l| !l.is_empty()) {
        let items: String = links
            .iter()
            .filter(|l| l.url.starts_with("http://") || l.url.starts_with("https://"))
            .map(|l| {
                format!(
                    r#"<li><a href="{}" target="_blank" rel="noopener">{}</a></li>"#,
                    html_escape(&l.url),
                    html_escape(&l.name)
                )
            })
            .collect();
        sections.push(format!(
            r#"<div class="info-section"><h2>External Resources</h2><ul>{}</ul></div>"#,
            items
        ));
    }

    format!(
        r#"<h1>{term} ({label})</h1>
        {error}
        <div class="entity-info">{sections}</div>"#,
        term = html_escape(&info.term),
        label = html_escape(&info.label),
        error = error_banner(error),
        sections = sections.join("\n"),
    )
}

pub fn render_index_page(config: &ViewerConfig) -> String {
    format!(
        r#"<h1>Biomedical Annotation Viewer</h1>
        <h2>Paper</h2>
        <form action="/paper" method="get" class="viewer-form">
            <input type="text" name="pmid" placeholder="Enter a PMID (e.g., 17179536)">
            <button class="btn" type="submit">Visualize</button>
        </form>
        {legend}
        <h2>Search</h2>
        {search}
        <h2>Dependency Parse</h2>
        {parse}"#,
        legend = render_legend(config),
        search = search_form(&SearchQuery {
            scope: "all".to_string(),
            ..Default::default()
        }),
        parse = sentence_form(""),
    )
}
