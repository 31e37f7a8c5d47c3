use compact_str::CompactString;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

pub type Params = HashMap<CompactString, Value>;

pub trait ToParams {
    fn to_params(&self) -> eyre::Result<Params>;

    /// Params as multipart text fields: strings go as is, everything else as JSON
    fn to_form(&self) -> eyre::Result<reqwest::multipart::Form> {
        let form = self
            .to_params()?
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                form.text(key.to_string(), text)
            });
        Ok(form)
    }
}

impl<T: Serialize> ToParams for T {
    fn to_params(&self) -> eyre::Result<Params> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map
                .into_iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key.into(), value))
                .collect()),
            other => eyre::bail!("request must serialize into an object, got {other}"),
        }
    }
}
