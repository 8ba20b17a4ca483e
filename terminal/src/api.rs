use async_trait::async_trait;
use common::{RemovalControl, ScoreSnapshot, parse_remaining, parse_snapshot};
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};

/// The contest server as seen by the client loops.
///
/// `auth` and `validity` return the raw response body; the callers own the
/// interpretation of the sentinel values.
#[async_trait]
pub trait ContestApi: Send + Sync {
    async fn auth(&self) -> ClientResult<String>;
    async fn scores(&self) -> ClientResult<ScoreSnapshot>;
    async fn remaining_time(&self) -> ClientResult<i64>;
    async fn validity(&self) -> ClientResult<String>;
    async fn remove_user(&self, control: &RemovalControl) -> ClientResult<()>;
    async fn submit(&self, code: &str) -> ClientResult<()>;
}

/// Paths of the server endpoints, relative to the base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub auth: String,
    pub scores: String,
    pub time: String,
    pub validity: String,
    pub leaderboard: String,
    pub submit: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth: "/auth".to_string(),
            scores: "/get_scores".to_string(),
            time: "/get_time".to_string(),
            validity: "/get_valid_username".to_string(),
            leaderboard: "/leaderboard".to_string(),
            submit: "/submit".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct HttpContestApi {
    client: Client,
    base_url: Url,
    endpoints: Endpoints,
}

impl HttpContestApi {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self::with_endpoints(client, base_url, Endpoints::default())
    }

    pub fn with_endpoints(client: Client, base_url: Url, endpoints: Endpoints) -> Self {
        Self {
            client,
            base_url,
            endpoints,
        }
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_text(&self, path: &str) -> ClientResult<String> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Ok(check_status(path, response)?.text().await?)
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> ClientResult<()> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        let response = self.client.post(url).form(form).send().await?;
        check_status(path, response)?;
        Ok(())
    }
}

fn check_status(path: &str, response: Response) -> ClientResult<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            endpoint: path.to_string(),
            status,
        });
    }
    Ok(response)
}

#[async_trait]
impl ContestApi for HttpContestApi {
    async fn auth(&self) -> ClientResult<String> {
        self.get_text(&self.endpoints.auth).await
    }

    async fn scores(&self) -> ClientResult<ScoreSnapshot> {
        let body = self.get_text(&self.endpoints.scores).await?;
        Ok(parse_snapshot(&body)?)
    }

    async fn remaining_time(&self) -> ClientResult<i64> {
        let body = self.get_text(&self.endpoints.time).await?;
        parse_remaining(&body).map_err(|source| ClientError::RemainingTime { body, source })
    }

    async fn validity(&self) -> ClientResult<String> {
        self.get_text(&self.endpoints.validity).await
    }

    async fn remove_user(&self, control: &RemovalControl) -> ClientResult<()> {
        self.post_form(
            &self.endpoints.leaderboard,
            &[(control.field.as_str(), control.value.as_str())],
        )
        .await
    }

    async fn submit(&self, code: &str) -> ClientResult<()> {
        self.post_form(&self.endpoints.submit, &[("code", code)]).await
    }
}
