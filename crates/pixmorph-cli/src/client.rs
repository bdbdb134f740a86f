//! HTTP client for the effect endpoints.

use pixmorph_effects::{
    ClientConfig, EffectError, EffectRequest, HealthStatus, SelectedFile, UPLOAD_FIELD,
};
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument};

/// Errors from [`EffectClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An effect request failed; the error names the effect.
    #[error(transparent)]
    Effect(#[from] EffectError),

    /// The health probe could not be completed or decoded.
    #[error("Health check failed: {0}")]
    Health(#[source] reqwest::Error),
}

/// Applies effects by posting files to the configured server.
#[derive(Debug, Clone)]
pub struct EffectClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl EffectClient {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Post `file` to the endpoint of `request` and return the response
    /// body unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::Status`] for a non-2xx response and
    /// [`EffectError::Transport`] when the request cannot be sent or the
    /// body cannot be read.
    #[instrument(skip(self, file), fields(file = file.name(), len = file.len()))]
    pub async fn apply(
        &self,
        file: &SelectedFile,
        request: EffectRequest,
    ) -> Result<Vec<u8>, ClientError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_owned())
            .mime_str(file.mime().as_str())
            .map_err(|e| request.transport_error(e))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = self.config.endpoint(request);
        debug!(%url, "posting file");
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| request.transport_error(e))?;

        request.check_status(response.status().as_u16())?;

        let body = response
            .bytes()
            .await
            .map_err(|e| request.transport_error(e))?;
        debug!(len = body.len(), "received result");
        Ok(body.to_vec())
    }

    /// Query the server's health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Health`] if the server is unreachable,
    /// answers with a non-2xx status, or sends an unexpected body.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.http
            .get(self.config.health_url())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ClientError::Health)?
            .json::<HealthStatus>()
            .await
            .map_err(ClientError::Health)
    }
}
