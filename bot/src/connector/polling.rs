use crate::connector::{send_request, Connector};
use api::{
    endpoints::{DeleteWebhook, GetUpdates},
    proto::{CommonUpdate, UpdateType},
    request::{DeleteWebhookRequest, GetUpdatesRequest},
    response::CommonResponse,
};
use async_trait::async_trait;
use compact_str::{CompactString, ToCompactString};
use log::{error, info};
use reqwest::Client;
use std::time::Duration;

pub struct PollingConnector {
    token: CompactString,
    client: Client,
    next_offset: Option<i64>,
    config: PollingConnectorConfig,
}

#[derive(Debug, Default)]
pub struct PollingConnectorConfig {
    pub allowed_updates: Vec<UpdateType>,
    pub limit: Option<u32>,
    pub timeout: Option<u32>,
    pub drop_pending_updates: bool,
}

impl PollingConnector {
    pub fn with_config(token: &str, config: PollingConnectorConfig) -> Self {
        Self {
            token: token.to_compact_string(),
            client: Client::new(),
            next_offset: None,
            config,
        }
    }

    /// Leaves room for the server to hold the long poll open
    fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.config.timeout.unwrap_or(0)) + 10)
    }
}

#[async_trait]
impl Connector for PollingConnector {
    async fn on_startup(&mut self) -> eyre::Result<()> {
        let request = DeleteWebhookRequest {
            drop_pending_updates: Some(self.config.drop_pending_updates),
        };
        match send_request::<DeleteWebhook>(&self.client, &self.token, &request, None).await? {
            CommonResponse::Ok(_) => {
                info!("webhook deleted");
            }
            CommonResponse::Err(err) => {
                error!("{err}");
            }
        };
        Ok(())
    }

    async fn fetch_updates(&mut self) -> eyre::Result<Vec<CommonUpdate>> {
        let request = GetUpdatesRequest {
            offset: self.next_offset,
            limit: self.config.limit,
            timeout: self.config.timeout,
            allowed_updates: Some(self.config.allowed_updates.clone()),
        };

        let updates = send_request::<GetUpdates>(
            &self.client,
            &self.token,
            &request,
            Some(self.request_timeout()),
        )
        .await?
        .into_result()?;

        if let Some(last_update_id) = updates.iter().map(|u| u.id).max() {
            self.next_offset.replace(last_update_id + 1);
        };

        Ok(updates)
    }
}
