//! Runtime configuration.
//!
//! Process settings come from environment variables. The visualization
//! config (entity colours, layout and zoom constants) is read from a local
//! `config.json` when `DEPVIZ_CONFIG` points at one, otherwise fetched from
//! the backend's `/static/config.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::client::{ApiClient, DEFAULT_TIMEOUT_SECS};
use crate::models::ViewerConfig;

pub const BACKEND_URL_VAR: &str = "DEPVIZ_BACKEND_URL";
pub const BIND_VAR: &str = "DEPVIZ_BIND";
pub const CONFIG_PATH_VAR: &str = "DEPVIZ_CONFIG";
pub const TIMEOUT_VAR: &str = "DEPVIZ_TIMEOUT_SECS";
pub const STATIC_DIR_VAR: &str = "DEPVIZ_STATIC_DIR";

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid viewer config from {origin}: {reason}")]
    Invalid { origin: String, reason: String },
    #[error("invalid {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend_url: String,
    pub bind: String,
    pub config_path: Option<PathBuf>,
    pub timeout: Duration,
    pub static_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            bind: DEFAULT_BIND.to_string(),
            config_path: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build settings from any variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout = match get(TIMEOUT_VAR) {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidVar {
                    var: TIMEOUT_VAR,
                    value: v,
                })?,
            None => defaults.timeout,
        };

        Ok(Self {
            backend_url: get(BACKEND_URL_VAR).unwrap_or(defaults.backend_url),
            bind: get(BIND_VAR).unwrap_or(defaults.bind),
            config_path: get(CONFIG_PATH_VAR).map(PathBuf::from),
            timeout,
            static_dir: get(STATIC_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.static_dir),
        })
    }
}

pub fn load_viewer_config_file(path: &Path) -> Result<ViewerConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ViewerConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_viewer_config(config, &path.display().to_string())
}

/// Reject zoom and layout overrides that would make the drawing degenerate.
pub fn validate_viewer_config(
    config: ViewerConfig,
    origin: &str,
) -> Result<ViewerConfig, ConfigError> {
    let viz = &config.visualization;
    viz.zoom
        .validate()
        .and_then(|_| viz.layout.validate())
        .map_err(|reason| ConfigError::Invalid {
            origin: origin.to_string(),
            reason,
        })?;
    Ok(config)
}

/// Resolve the visualization config. Never fails: problems are logged and
/// the built-in defaults are used.
pub async fn resolve_viewer_config(settings: &Settings, client: &ApiClient) -> ViewerConfig {
    if let Some(path) = &settings.config_path {
        match load_viewer_config_file(path) {
            Ok(cfg) => {
                info!(path = %path.display(), "loaded viewer config");
                return cfg;
            }
            Err(e) => warn!(error = %e, "falling back to backend config"),
        }
    }

    let remote = client
        .viewer_config()
        .await
        .map_err(|e| e.to_string())
        .and_then(|cfg| {
            let origin = format!("{}static/config.json", client.base_url());
            validate_viewer_config(cfg, &origin).map_err(|e| e.to_string())
        });

    match remote {
        Ok(cfg) => {
            info!(
                colors = cfg.visualization.entity_colors.len(),
                "loaded viewer config from backend"
            );
            cfg
        }
        Err(e) => {
            warn!(error = %e, "error loading config, using defaults");
            ViewerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutSettings;
    use crate::viewport::ZoomSettings;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let s = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let s = Settings::from_lookup(lookup(&[
            (BACKEND_URL_VAR, "http://nlp:8000"),
            (BIND_VAR, "  "),
            (TIMEOUT_VAR, "5"),
            (CONFIG_PATH_VAR, "conf/config.json"),
        ]))
        .unwrap();
        assert_eq!(s.backend_url, "http://nlp:8000");
        assert_eq!(s.bind, DEFAULT_BIND);
        assert_eq!(s.timeout, Duration::from_secs(5));
        assert_eq!(s.config_path, Some(PathBuf::from("conf/config.json")));
    }

    #[test]
    fn test_bad_timeout() {
        let err = Settings::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: TIMEOUT_VAR, .. }));
        assert!(Settings::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).is_err());
    }

    #[test]
    fn test_load_config_file() {
        let dir = std::env::temp_dir().join(format!("depviz-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(
            &path,
            r##"{"visualization": {
                "entity_colors": {"CELL": {"background": "#ffe0b2", "border": "#fb8c00"}},
                "layout": {"token_spacing": 96},
                "zoom": {"min_scale": 0.25}
            }}"##,
        )
        .unwrap();

        let cfg = load_viewer_config_file(&path).unwrap();
        assert_eq!(cfg.visualization.entity_colors["CELL"].border, "#fb8c00");
        assert_eq!(cfg.visualization.layout.token_spacing, 96.0);
        assert_eq!(cfg.visualization.layout.max_arc_height, 120.0);
        assert_eq!(cfg.visualization.zoom.min_scale, 0.25);
        assert_eq!(cfg.visualization.zoom.factor, 1.2);

        fs::write(&path, "{").unwrap();
        assert!(matches!(load_viewer_config_file(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            load_viewer_config_file(&dir.join("missing.json")),
            Err(ConfigError::Io { .. })
        ));
        fs::remove_dir_all(&dir).ok();
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("depviz-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    async fn config_backend(body: &'static str) -> String {
        use axum::{routing::get, Router};

        let app = Router::new().route(
            "/static/config.json",
            get(move || async move {
                ([(axum::http::header::CONTENT_TYPE, "application/json")], body)
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    const BACKEND_CONFIG: &str =
        r##"{"visualization": {"entity_colors": {"GENE": {"background": "#e1f5fe", "border": "#0288d1"}}}}"##;

    fn settings_with(path: Option<PathBuf>) -> Settings {
        Settings {
            config_path: path,
            ..Settings::default()
        }
    }

    #[test]
    fn test_degenerate_zoom_in_file_is_rejected() {
        let dir = scratch_dir("bad-zoom");
        let path = dir.join("config.json");
        fs::write(&path, r#"{"visualization": {"zoom": {"factor": 0, "min_scale": 0}}}"#).unwrap();
        assert!(matches!(load_viewer_config_file(&path), Err(ConfigError::Invalid { .. })));

        fs::write(&path, r#"{"visualization": {"zoom": {"min_scale": -5}}}"#).unwrap();
        assert!(matches!(load_viewer_config_file(&path), Err(ConfigError::Invalid { .. })));

        fs::write(&path, r#"{"visualization": {"layout": {"token_spacing": 0}}}"#).unwrap();
        assert!(matches!(load_viewer_config_file(&path), Err(ConfigError::Invalid { .. })));
        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_local_file_wins_over_backend() {
        let dir = scratch_dir("local-wins");
        let path = dir.join("config.json");
        fs::write(
            &path,
            r##"{"visualization": {"entity_colors": {"CELL": {"background": "#ffe0b2", "border": "#fb8c00"}}}}"##,
        )
        .unwrap();
        let base = config_backend(BACKEND_CONFIG).await;
        let client = ApiClient::new(&base, Duration::from_secs(5)).unwrap();

        let cfg = resolve_viewer_config(&settings_with(Some(path)), &client).await;
        assert!(cfg.visualization.entity_colors.contains_key("CELL"));
        assert!(!cfg.visualization.entity_colors.contains_key("GENE"));
        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_bad_local_file_falls_back_to_backend() {
        let dir = scratch_dir("fallback");
        let broken = dir.join("broken.json");
        fs::write(&broken, "{").unwrap();
        let base = config_backend(BACKEND_CONFIG).await;
        let client = ApiClient::new(&base, Duration::from_secs(5)).unwrap();

        for path in [broken, dir.join("missing.json")] {
            let cfg = resolve_viewer_config(&settings_with(Some(path)), &client).await;
            assert_eq!(cfg.visualization.entity_colors["GENE"].border, "#0288d1");
        }
        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_degenerate_backend_config_uses_defaults() {
        let base = config_backend(r#"{"visualization": {"zoom": {"factor": 0}}}"#).await;
        let client = ApiClient::new(&base, Duration::from_secs(5)).unwrap();

        let cfg = resolve_viewer_config(&settings_with(None), &client).await;
        assert_eq!(cfg.visualization.zoom, ZoomSettings::default());
    }

    #[tokio::test]
    async fn test_unreachable_backend_uses_defaults() {
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        let cfg = resolve_viewer_config(&settings_with(None), &client).await;
        assert!(cfg.visualization.entity_colors.is_empty());
        assert_eq!(cfg.visualization.zoom, ZoomSettings::default());
        assert_eq!(cfg.visualization.layout, LayoutSettings::default());
    }
}
