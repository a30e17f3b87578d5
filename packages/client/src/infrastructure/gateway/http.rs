//! HTTP implementation of [`RegistrationGateway`].

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    domain::{GatewayError, Registration, RegistrationGateway, SubmitOutcome},
    error::ClientError,
    infrastructure::dto::http::{SubmitFormDto, SubmitResponseDto},
};

/// Path of the registration endpoint, relative to the base URL
pub const SUBMIT_PATH: &str = "submit";

/// Posts registrations as `application/x-www-form-urlencoded` to `<base>/submit`.
pub struct HttpRegistrationGateway {
    client: Client,
    endpoint: Url,
}

impl HttpRegistrationGateway {
    /// Create a gateway for the server at `base_url`.
    ///
    /// The endpoint is resolved like a relative link, so `http://host/app/`
    /// posts to `http://host/app/submit`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ClientError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(SUBMIT_PATH))
            .map_err(|e| ClientError::Config(format!("invalid base URL '{base_url}': {e}")))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RegistrationGateway for HttpRegistrationGateway {
    async fn submit(&self, registration: &Registration) -> Result<SubmitOutcome, GatewayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&SubmitFormDto::from(registration))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        // The server reports refusals as 4xx/5xx with a JSON body, so the
        // status is only logged.
        let status = response.status();
        tracing::debug!("POST {} -> {}", self.endpoint, status);

        let body: SubmitResponseDto = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(body.into())
    }
}
