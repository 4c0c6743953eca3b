#[cfg(test)]
#[path = "rag_server_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::ConfigSnapshot;
use crate::domain::models::ConfigUpdate;
use crate::domain::models::IndexResponse;
use crate::domain::models::QueryPrompt;
use crate::domain::models::QueryResponse;
use crate::domain::models::SaveConfigResponse;

/// HTTP client for the RAG server's `/index`, `/config` and `/query` routes.
pub struct RagServer {
    url: String,
    timeout: String,
    client: reqwest::Client,
}

impl Default for RagServer {
    fn default() -> RagServer {
        return RagServer::new(
            &Config::get(ConfigKey::ServerURL),
            &Config::get(ConfigKey::HealthCheckTimeout),
        );
    }
}

impl RagServer {
    pub fn new(url: &str, timeout: &str) -> RagServer {
        return RagServer {
            url: url.trim_end_matches('/').to_string(),
            timeout: timeout.to_string(),
            client: reqwest::Client::new(),
        };
    }

    fn check_status(res: &reqwest::Response, route: &str) -> Result<()> {
        let status = res.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                route = route,
                "RAG server request failed"
            );
            bail!("Server responded to {route} with status {status}");
        }

        return Ok(());
    }
}

#[async_trait]
impl Backend for RagServer {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<ConfigSnapshot> {
        if self.url.is_empty() {
            bail!("Server URL is not defined");
        }

        let res = self
            .client
            .get(format!("{url}/config", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if let Err(err) = res {
            tracing::error!(error = ?err, "RAG server is not reachable");
            bail!("RAG server is not reachable at {}", self.url);
        }

        let res = res?;
        RagServer::check_status(&res, "/config")?;

        return Ok(res.json::<ConfigSnapshot>().await?);
    }

    #[allow(clippy::implicit_return)]
    async fn index(&self, project_path: &str) -> Result<IndexResponse> {
        tracing::debug!(project_path = project_path, "Index request");

        let res = self
            .client
            .post(format!("{url}/index", url = self.url))
            .form(&[("project_path", project_path)])
            .send()
            .await?;

        RagServer::check_status(&res, "/index")?;
        let body = res.json::<IndexResponse>().await?;
        tracing::debug!(body = ?body, "Index response");

        return Ok(body);
    }

    #[allow(clippy::implicit_return)]
    async fn get_config(&self) -> Result<ConfigSnapshot> {
        let res = self
            .client
            .get(format!("{url}/config", url = self.url))
            .send()
            .await?;

        RagServer::check_status(&res, "/config")?;

        return Ok(res.json::<ConfigSnapshot>().await?);
    }

    #[allow(clippy::implicit_return)]
    async fn update_config(&self, update: &ConfigUpdate) -> Result<SaveConfigResponse> {
        tracing::debug!(update = ?update, "Config update request");

        let res = self
            .client
            .post(format!("{url}/config", url = self.url))
            .json(update)
            .send()
            .await?;

        RagServer::check_status(&res, "/config")?;

        return Ok(res.json::<SaveConfigResponse>().await?);
    }

    #[allow(clippy::implicit_return)]
    async fn query(&self, prompt: &QueryPrompt) -> Result<QueryResponse> {
        tracing::debug!(
            question = %prompt.question,
            llm_type = %prompt.llm_type,
            rerank_enable = prompt.rerank_enable,
            history_len = prompt.chat_history.len(),
            "Query request"
        );

        let res = self
            .client
            .post(format!("{url}/query", url = self.url))
            .form(&prompt.form_fields()?)
            .send()
            .await?;

        RagServer::check_status(&res, "/query")?;
        let body = res.json::<QueryResponse>().await?;
        tracing::debug!(sources = body.sources.len(), "Query response");

        return Ok(body);
    }
}
