use std::env;

/// How rendering sources its per-device context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Render from the in-memory enriched devices, one-to-one
    Direct,
    /// Re-read every schema artifact under the schema directory and render
    /// each one independently. Re-renders stale artifacts from earlier runs
    /// if the directory was not cleaned; keeping it tidy is the caller's job.
    Rehydrate,
}

impl RenderStrategy {
    fn parse(s: &str) -> Self {
        match s {
            "rehydrate" => RenderStrategy::Rehydrate,
            _ => RenderStrategy::Direct,
        }
    }
}

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub topology_path: String,
    pub communities_path: String,
    pub secrets_path: String,
    pub templates_dir: String,
    pub schema_dir: String,
    pub config_dir: String,
    pub render_strategy: RenderStrategy,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            topology_path: get_env("TOPOLOGY_PATH", "devices.yaml"),
            communities_path: get_env("COMMUNITIES_PATH", "communities.yaml"),
            secrets_path: get_env("SECRETS_PATH", "secrets.yaml"),
            templates_dir: get_env("TEMPLATES_DIR", "templates"),
            schema_dir: get_env("SCHEMA_DIR", "."),
            config_dir: get_env("CONFIG_DIR", "."),
            render_strategy: RenderStrategy::parse(&get_env("RENDER_STRATEGY", "direct")),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
