use std::path::PathBuf;

use crate::config::{Config, RenderStrategy};
use crate::errors::BuildError;
use crate::models::{role, Communities, Device, Network, Secrets};
use crate::render::{ConfigRenderer, TemplateEngine};
use crate::schema;

/// Apply enrichment policy to every device, in order, returning a new
/// enriched Network. Devices with role "leaf" receive the full community
/// set; every device receives the full secrets mapping. Total over any
/// well-formed network; the community and secret inputs are never touched.
///
/// This is the only writer of `Device::communities` and `Device::secrets`.
pub fn enrich(network: Network, communities: &Communities, secrets: &Secrets) -> Network {
    let devices = network
        .devices
        .into_iter()
        .map(|device| {
            let communities = (device.role == role::LEAF).then(|| communities.clone());
            Device {
                communities,
                secrets: Some(secrets.clone()),
                ..device
            }
        })
        .collect();

    Network { devices }
}

/// Orchestrates the build pipeline: enrich, persist every device schema,
/// then render one configuration artifact per device.
pub struct NetworkBuilder<E: TemplateEngine> {
    schema_dir: PathBuf,
    strategy: RenderStrategy,
    renderer: ConfigRenderer<E>,
}

impl<E: TemplateEngine> NetworkBuilder<E> {
    pub fn new(cfg: &Config, engine: E) -> Self {
        Self {
            schema_dir: PathBuf::from(&cfg.schema_dir),
            strategy: cfg.render_strategy,
            renderer: ConfigRenderer::new(engine, cfg.templates_dir.clone(), cfg.config_dir.clone()),
        }
    }

    /// Run the full pipeline and return the rendered config paths.
    ///
    /// All schema artifacts are written before any rendering starts, so the
    /// rehydrated strategy never observes a half-written run. A failure
    /// aborts the run but leaves artifacts already written on disk; re-running
    /// after fixing the input overwrites them byte-for-byte.
    pub fn run(
        &self,
        network: Network,
        communities: &Communities,
        secrets: &Secrets,
    ) -> Result<Vec<PathBuf>, BuildError> {
        let network = enrich(network, communities, secrets);

        for device in &network.devices {
            schema::write_schema(device, &self.schema_dir)?;
        }

        match self.strategy {
            RenderStrategy::Direct => network
                .devices
                .iter()
                .map(|device| self.renderer.render_to_file(device))
                .collect(),
            RenderStrategy::Rehydrate => {
                let mut rendered = Vec::new();
                for path in schema::discover_schemas(&self.schema_dir)? {
                    let device = schema::read_schema(&path)?;
                    rendered.push(self.renderer.render_to_file(&device)?);
                }
                Ok(rendered)
            }
        }
    }
}
