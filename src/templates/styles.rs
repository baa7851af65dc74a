//! CSS styles for the dependency viewer.
//!
//! Contains the main STYLE constant with all CSS for the web interface.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base03: #002b36;
    --base02: #073642;
    --base01: #586e75;
    --base00: #657b83;
    --base0: #839496;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --yellow: #b58900;
    --orange: #cb4b16;
    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;
    --green: #859900;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --accent: var(--base2);
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 1100px;
    margin: 0 auto;
    padding: 1rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h1, h2, h3 { font-weight: 600; margin-top: 1.5em; margin-bottom: 0.5em; }
h1 { font-size: 1.5rem; }
h2 { font-size: 1.2rem; }

.nav-bar {
    position: sticky;
    top: 0;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
    flex-wrap: wrap;
    z-index: 100;
}

.nav-bar a { font-size: 0.9rem; }
.nav-bar .spacer { flex: 1; }

.viewer-form {
    display: flex;
    gap: 0.5rem;
    flex-wrap: wrap;
    margin-bottom: 1rem;
}

.viewer-form input, .viewer-form select, .viewer-form textarea {
    padding: 0.4rem 0.75rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
    font-size: 0.9rem;
    font-family: inherit;
}

.viewer-form textarea { flex: 1; min-width: 300px; min-height: 4rem; }

.btn {
    padding: 0.5rem 1rem;
    border: 1px solid var(--base1);
    border-radius: 4px;
    background: var(--blue);
    color: var(--base3);
    cursor: pointer;
    font-size: 0.9rem;
    font-family: inherit;
    text-decoration: none;
    display: inline-block;
}

.btn:hover { background: var(--cyan); border-color: var(--cyan); text-decoration: none; color: var(--base3); }
.btn.secondary { background: var(--base2); color: var(--base00); border-color: var(--base1); }
.btn.secondary:hover { background: var(--base3); }

.error-message {
    color: var(--red);
    border: 1px solid var(--red);
    border-radius: 4px;
    padding: 0.5rem 0.75rem;
    margin: 1rem 0;
}

.warning-message { color: var(--orange); font-size: 0.85rem; margin: 0.5rem 0; }

.paper-meta { color: var(--muted); font-size: 0.85rem; }
.paper-abstract { margin-top: 0.5rem; }

.entity { padding: 0 0.15rem; border-radius: 3px; border: 1px solid transparent; }

.legend { display: flex; flex-wrap: wrap; gap: 0.4rem; margin: 0.75rem 0; }
.legend-item { font-size: 0.75rem; padding: 0.1rem 0.5rem; border-radius: 3px; }

.entity-table { width: 100%; border-collapse: collapse; font-size: 0.85rem; margin-top: 1rem; }
.entity-table th, .entity-table td { padding: 0.5rem; text-align: left; border-bottom: 1px solid var(--border); }
.entity-table th { font-weight: 600; }
.entity-color-box { display: inline-block; width: 0.8rem; height: 0.8rem; border-radius: 2px; margin-right: 0.4rem; vertical-align: middle; }

.sentence-list { list-style: none; }
.sentence-list li { padding: 0.3rem 0; border-bottom: 1px solid var(--border); font-size: 0.9rem; }

.result-list { list-style: none; }
.result-list li { padding: 0.6rem 0; border-bottom: 1px solid var(--border); }
.type-badge {
    font-size: 0.65rem;
    padding: 0.1rem 0.4rem;
    background: var(--accent);
    border-radius: 3px;
    text-transform: uppercase;
    letter-spacing: 0.05em;
    margin-right: 0.5rem;
    vertical-align: middle;
}

.info-section { margin-bottom: 1rem; }
.info-section ul { margin-left: 1.25rem; }

.result-list .meta { font-size: 0.8rem; color: var(--muted); margin-left: 0.5rem; }

.zoom-controls { display: flex; gap: 0.5rem; align-items: center; margin: 0.5rem 0; }
.zoom-controls .scale { font-size: 0.8rem; color: var(--muted); }

.dependency-visualization {
    border: 1px solid var(--border);
    border-radius: 4px;
    background: #fff;
    overflow: auto;
}

.dependency-svg text { fill: var(--base02); }
.dependency-svg .pos-tag { fill: var(--muted); }
.dependency-svg .arc-label { fill: var(--base01); }
"#;
