use compact_str::CompactString;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TranslateResponse {
    Translation(Translation),
    Error(TranslateError),
}

#[derive(Debug, Deserialize)]
pub struct Translation {
    #[serde(rename = "translatedText")]
    pub translated_text: CompactString,
}

#[derive(Debug, Deserialize)]
pub struct TranslateError {
    pub error: CompactString,
}
