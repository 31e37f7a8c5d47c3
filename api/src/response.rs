use compact_str::CompactString;
use serde::{de, Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::{
    error::Error,
    fmt::{Display, Formatter},
};

/// The `{"ok": bool, ...}` envelope every Bot API method answers with
#[derive(Debug)]
pub enum CommonResponse<R> {
    Ok(R),
    Err(ErrorResponse),
}

impl<R> From<CommonResponse<R>> for Result<R, ErrorResponse> {
    fn from(response: CommonResponse<R>) -> Self {
        match response {
            CommonResponse::Ok(response) => Ok(response),
            CommonResponse::Err(error) => Err(error),
        }
    }
}

impl<R> CommonResponse<R> {
    pub fn into_result(self) -> Result<R, ErrorResponse> {
        self.into()
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CommonResponse::Ok(_))
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub description: CompactString,
    pub error_code: i64,
    pub parameters: Option<ResponseParameters>,
}

/// https://core.telegram.org/bots/api#responseparameters
#[derive(Debug, Deserialize)]
pub struct ResponseParameters {
    pub migrate_to_chat_id: Option<i64>,
    pub retry_after: Option<i64>,
}

impl Display for ErrorResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "response error: {}, code: {}",
            self.description, self.error_code
        )
    }
}

impl Error for ErrorResponse {}

impl<'de, R: Deserialize<'de>> Deserialize<'de> for CommonResponse<R> {
    fn deserialize<D>(deserializer: D) -> Result<CommonResponse<R>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::deserialize(deserializer)?;

        let ok = map
            .remove("ok")
            .ok_or_else(|| de::Error::missing_field("ok"))
            .map(Deserialize::deserialize)?
            .map_err(de::Error::custom)?;
        if ok {
            let result = map
                .remove("result")
                .ok_or_else(|| de::Error::missing_field("result"))
                .map(R::deserialize)?
                .map_err(de::Error::custom)?;
            Ok(CommonResponse::Ok(result))
        } else {
            let rest = Value::Object(map);
            ErrorResponse::deserialize(rest)
                .map(CommonResponse::Err)
                .map_err(de::Error::custom)
        }
    }
}
