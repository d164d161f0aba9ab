use std::fs;
use std::path::PathBuf;

use tera::{Context, Tera};

use crate::errors::{BuildError, EngineError};
use crate::models::Device;

/// Fixed logical name of the device configuration template
pub const TEMPLATE_NAME: &str = "template.cfg";

pub const CONFIG_EXTENSION: &str = "cfg";

/// Narrow seam around the template engine: named-template lookup plus
/// mapping-based context injection. Anything that can do both fits here.
pub trait TemplateEngine {
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String, EngineError>;
}

/// Tera-backed template engine loading every file under a template root
pub struct TeraEngine {
    tera: Tera,
}

impl TeraEngine {
    pub fn load(templates_dir: &str) -> Result<Self, EngineError> {
        let glob = format!("{}/**/*", templates_dir);
        let tera = Tera::new(&glob)
            .map_err(|e| EngineError::Failed(format!("failed to load templates: {}", describe(&e))))?;
        Ok(Self { tera })
    }
}

impl TemplateEngine for TeraEngine {
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String, EngineError> {
        if !self.tera.get_template_names().any(|n| n == name) {
            return Err(EngineError::NotFound(name.to_string()));
        }

        let context = Context::from_value(context.clone())
            .map_err(|e| EngineError::Failed(describe(&e)))?;

        self.tera
            .render(name, &context)
            .map_err(|e| EngineError::Failed(describe(&e)))
    }
}

/// Tera's top-level Display hides the interesting part; walk the source chain
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Drop lines that are empty or whitespace-only and rejoin the rest.
/// Removes engine-introduced blank lines without reordering content.
pub fn squeeze_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders device configurations from schema contexts and persists them
pub struct ConfigRenderer<E: TemplateEngine> {
    engine: E,
    templates_root: String,
    config_dir: PathBuf,
}

impl<E: TemplateEngine> ConfigRenderer<E> {
    pub fn new(engine: E, templates_root: impl Into<String>, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            templates_root: templates_root.into(),
            config_dir: config_dir.into(),
        }
    }

    /// Render one device's configuration text.
    ///
    /// The device schema is exposed to the template under the single root
    /// key `data`. Output is blank-line squeezed; an output with no content
    /// left is always a rendering defect, never a legitimate result.
    pub fn render_device(&self, device: &Device) -> Result<String, BuildError> {
        let context = serde_json::json!({ "data": device });

        let raw = self
            .engine
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| match e {
                EngineError::NotFound(name) => BuildError::TemplateNotFound {
                    name,
                    root: self.templates_root.clone(),
                },
                EngineError::Failed(reason) => BuildError::Render {
                    device: device.name.clone(),
                    reason,
                },
            })?;

        let output = squeeze_blank_lines(&raw);
        if output.is_empty() {
            return Err(BuildError::Render {
                device: device.name.clone(),
                reason: "no template output".to_string(),
            });
        }

        Ok(output)
    }

    /// Render one device and persist the result as `<name>.cfg`.
    /// Nothing is written when rendering fails.
    pub fn render_to_file(&self, device: &Device) -> Result<PathBuf, BuildError> {
        let output = self.render_device(device)?;
        let path = self.config_path(&device.name);

        fs::write(&path, output).map_err(|source| BuildError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!("Rendered {}", path.display());
        Ok(path)
    }

    pub fn config_path(&self, device_name: &str) -> PathBuf {
        self.config_dir
            .join(format!("{}.{}", device_name, CONFIG_EXTENSION))
    }
}
