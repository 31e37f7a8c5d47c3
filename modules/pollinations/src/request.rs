use crate::endpoints::GenerateImage;
use api::endpoints::Endpoint;
use compact_str::CompactString;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use serde::Serialize;
use serde_with::skip_serializing_none;

/// Characters left as is by `encodeURIComponent`
const PROMPT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub model: CompactString,
    pub width: CompactString,
    pub height: CompactString,
    pub enhance: bool,
    pub seed: CompactString,
    pub nologo: bool,
    pub safe: bool,
}

impl GenerationParams {
    /// Query pairs in the order the service documents them
    pub fn pairs(&self) -> [(&'static str, &str); 8] {
        [
            ("private", "true"),
            ("model", self.model.as_str()),
            ("width", self.width.as_str()),
            ("height", self.height.as_str()),
            ("enhance", bool_str(self.enhance)),
            ("seed", self.seed.as_str()),
            ("nologo", bool_str(self.nologo)),
            ("safe", bool_str(self.safe)),
        ]
    }

    pub fn details(&self) -> CompactString {
        compact_str::format_compact!(
            "model: {}\nsize: {}x{}\nseed: {}",
            self.model,
            self.width,
            self.height,
            self.seed
        )
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

pub fn encode_prompt(prompt: &str) -> String {
    utf8_percent_encode(prompt, PROMPT_ENCODE_SET).to_string()
}

/// `{base_url}/prompt/{encoded prompt}?{params}`
pub fn image_url(base_url: &str, prompt: &str, params: &GenerationParams) -> eyre::Result<Url> {
    let mut url = Url::parse(&format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        GenerateImage::PATH,
        encode_prompt(prompt)
    ))?;
    url.query_pairs_mut().extend_pairs(params.pairs());
    Ok(url)
}

/// https://github.com/LibreTranslate/LibreTranslate#api-examples
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct TranslateRequest<'a> {
    pub q: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'a str,
    pub api_key: Option<&'a str>,
}
