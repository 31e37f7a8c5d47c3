pub mod polling;

use api::{
    endpoints::Endpoint, files::GetFiles, params::ToParams, proto::CommonUpdate,
    response::CommonResponse,
};
use async_trait::async_trait;
use eyre::eyre;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BASE_URL: &str = "https://api.telegram.org";

/// Source of updates for the bot
#[async_trait]
pub trait Connector: Send {
    async fn on_startup(&mut self) -> eyre::Result<()>;

    async fn fetch_updates(&mut self) -> eyre::Result<Vec<CommonUpdate>>;
}

fn query_url<E: Endpoint>(token: &str) -> String {
    format!("{}/bot{}/{}", BASE_URL, token, E::PATH)
}

fn parse_response<E>(text: &str) -> eyre::Result<CommonResponse<E::Response>>
where
    E: Endpoint,
    E::Response: for<'de> Deserialize<'de>,
{
    serde_json::from_str::<CommonResponse<E::Response>>(text).map_err(|err| {
        eyre!(
            "{}, type = {:?}, response = {}",
            err,
            std::any::type_name::<CommonResponse<E::Response>>(),
            text
        )
    })
}

/// Sends `data` as a JSON body
pub(crate) async fn send_request<E>(
    client: &Client,
    token: &str,
    data: &E::Request,
    timeout: Option<Duration>,
) -> eyre::Result<CommonResponse<E::Response>>
where
    E: Endpoint,
    E::Request: Serialize,
    E::Response: for<'de> Deserialize<'de>,
{
    let mut request = client.request(E::METHOD, query_url::<E>(token)).json(data);
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }
    let text = request.send().await?.text().await?;
    parse_response::<E>(&text)
}

/// Sends `data` as multipart/form-data, uploading its files
pub(crate) async fn send_multipart<E>(
    client: &Client,
    token: &str,
    data: &E::Request,
) -> eyre::Result<CommonResponse<E::Response>>
where
    E: Endpoint,
    E::Request: Serialize + GetFiles,
    E::Response: for<'de> Deserialize<'de>,
{
    let form = data.attach_files(data.to_form()?)?;
    let text = client
        .request(E::METHOD, query_url::<E>(token))
        .multipart(form)
        .send()
        .await?
        .text()
        .await?;
    parse_response::<E>(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::endpoints::{GetUpdates, SendPhoto};

    #[test]
    fn endpoint_url() {
        assert_eq!(
            query_url::<SendPhoto>("123:abc"),
            "https://api.telegram.org/bot123:abc/sendPhoto"
        );
    }

    #[test]
    fn parse_error_mentions_the_body() {
        let err = parse_response::<GetUpdates>("<html>bad gateway</html>").unwrap_err();
        assert!(err.to_string().contains("bad gateway"));
    }
}
