use api::proto::UpdateType;
use std::collections::HashSet;

#[derive(Debug)]
pub struct BotConfig {
    pub allowed_updates: HashSet<UpdateType>,
    pub update_limit: Option<u32>,
    /// Long polling timeout in seconds
    pub polling_timeout: Option<u32>,
    pub skip_missed_updates: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            allowed_updates: [UpdateType::Message].into(),
            update_limit: Some(100),
            polling_timeout: Some(10),
            skip_missed_updates: false,
        }
    }
}
