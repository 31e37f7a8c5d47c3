use crate::{
    endpoints::TranslateText,
    request::TranslateRequest,
    response::TranslateResponse,
};
use api::endpoints::Endpoint;
use async_trait::async_trait;
use compact_str::CompactString;
use eyre::{bail, eyre};
use reqwest::Client;
use std::time::Duration;

#[async_trait]
pub trait Translate: Send + Sync {
    async fn translate(&self, input: &str, source: &str, target: &str)
        -> eyre::Result<CompactString>;
}

/// Client of a LibreTranslate instance
pub struct LibreTranslator {
    https_url: CompactString,
    api_key: Option<CompactString>,
    timeout: Duration,
    client: Client,
}

impl LibreTranslator {
    pub fn new(https_url: &str, api_key: Option<&str>) -> Self {
        Self {
            https_url: https_url.trim_end_matches('/').into(),
            api_key: api_key.map(Into::into),
            timeout: Duration::from_secs(15),
            client: Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Translate for LibreTranslator {
    async fn translate(
        &self,
        input: &str,
        source: &str,
        target: &str,
    ) -> eyre::Result<CompactString> {
        let url = format!("{}/{}", self.https_url, TranslateText::PATH);
        let data = TranslateRequest {
            q: input,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        let response = self
            .client
            .request(TranslateText::METHOD, url)
            .json(&data)
            .timeout(self.timeout)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        let response = serde_json::from_str::<TranslateResponse>(&text)
            .map_err(|err| eyre!("{status}, '{text}', {err}"))?;
        match response {
            TranslateResponse::Translation(t) if t.translated_text.trim().is_empty() => {
                bail!("empty translation for '{input}'")
            }
            TranslateResponse::Translation(t) => Ok(t.translated_text),
            TranslateResponse::Error(err) => {
                bail!("translation service responded with {status}, {}", err.error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn translates_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(serde_json::json!({
                "q": "一只猫",
                "source": "zh",
                "target": "en",
                "format": "text",
                "api_key": "secret"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"translatedText": "a cat"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let translator = LibreTranslator::new(&format!("{}/", server.uri()), Some("secret"));
        let text = translator.translate("一只猫", "zh", "en").await.unwrap();
        assert_eq!(text, "a cat");
    }

    #[tokio::test]
    async fn service_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({"error": "Invalid API key"})),
            )
            .mount(&server)
            .await;

        let translator = LibreTranslator::new(&server.uri(), None);
        let err = translator.translate("一只猫", "zh", "en").await.unwrap_err();
        let err = err.to_string();
        assert!(err.contains("403"), "{err}");
        assert!(err.contains("Invalid API key"), "{err}");
    }

    #[tokio::test]
    async fn garbage_response_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let translator = LibreTranslator::new(&server.uri(), None);
        assert!(translator.translate("猫", "zh", "en").await.is_err());
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"translatedText": "a cat"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let translator =
            LibreTranslator::new(&server.uri(), None).with_timeout(Duration::from_millis(100));
        assert!(translator.translate("一只猫", "zh", "en").await.is_err());
    }
}
