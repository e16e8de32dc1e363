pub mod domain;
mod services;

pub use domain::{CommandAction, CommandRequest, CommandResponse};

use crate::config::{merge_configs, EngageConfig, LoadedConfig};
use anyhow::Result;
use domain::{classify_error, ResponseMeta};
use engage_protocol::ErrorEnvelope;
use engage_sentiment::Scorer;
use serde_json::Value;
use services::Services;
use std::time::Instant;

pub struct CommandHandler {
    base_config: Value,
    config_path: Option<String>,
    services: Services,
}

impl CommandHandler {
    /// Builds the default scorer from the loaded file; a bad `[sentiment]`
    /// section fails here rather than on the first request.
    pub fn new(loaded: LoadedConfig) -> Result<Self> {
        let base_config = loaded.config.to_value()?;
        let scorer = Scorer::new(loaded.config.sentiment)?;
        Ok(Self {
            base_config,
            config_path: loaded.path.map(|p| p.display().to_string()),
            services: Services::new(scorer),
        })
    }

    pub fn execute(&self, request: CommandRequest) -> CommandResponse {
        let started = Instant::now();
        let CommandRequest {
            action,
            payload,
            config,
        } = request;

        let scoped;
        let services = match config {
            None => &self.services,
            Some(overrides) => match self.scoped_services(overrides) {
                Ok(built) => {
                    scoped = built;
                    &scoped
                }
                Err(err) => {
                    log::debug!("rejected request config: {err:#}");
                    let envelope = ErrorEnvelope::new("invalid_config", format!("{err:#}"))
                        .with_hint("Request config uses the same keys as the config file.");
                    return CommandResponse::error(envelope, self.meta(started));
                }
            },
        };

        let response = match services.route(action, payload) {
            Ok(outcome) => CommandResponse::ok(outcome, self.meta(started)),
            Err(err) => {
                log::debug!("action={} failed: {err:#}", action.as_str());
                CommandResponse::error(classify_error(&err), self.meta(started))
            }
        };
        log::debug!(
            "action={} status={:?} in {:?}",
            action.as_str(),
            response.status,
            started.elapsed()
        );
        response
    }

    /// Services for a request carrying its own `config`, overlaid on the file.
    fn scoped_services(&self, overrides: Value) -> Result<Services> {
        let merged = merge_configs(Some(self.base_config.clone()), Some(overrides))
            .unwrap_or_else(|| Value::Object(Default::default()));
        let config = EngageConfig::from_value(merged)?;
        Ok(Services::new(Scorer::new(config.sentiment)?))
    }

    fn meta(&self, started: Instant) -> ResponseMeta {
        ResponseMeta {
            config_path: self.config_path.clone(),
            duration_ms: Some(started.elapsed().as_millis() as u64),
        }
    }
}
