use api::proto::{Message, MessageEntityType};
use compact_str::CompactString;
use eyre::bail;

/// A command name with the text following it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCommandInfo {
    name: CompactString,
    query: CompactString,
}

impl TryFrom<&Message> for BotCommandInfo {
    type Error = eyre::Report;

    fn try_from(message: &Message) -> Result<Self, Self::Error> {
        let Some(text) = message.text.as_ref() else {
            bail!("no text for bot command in message {}", message.message_id);
        };
        match message.is_of_entity(MessageEntityType::BotCommand) {
            Some(entity) if entity.offset == 0 => Ok(Self::from_command(text, entity.length)),
            _ => Ok(Self::from_text(text)),
        }
    }
}

impl BotCommandInfo {
    pub fn new(name: &str, query: &str) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
        }
    }

    pub fn name(&self) -> &CompactString {
        &self.name
    }

    pub fn query(&self) -> &CompactString {
        &self.query
    }

    /// `length` counts UTF-16 code units, the way Telegram measures entities
    fn from_command(text: &str, length: usize) -> Self {
        let split = text
            .char_indices()
            .scan(0, |units, (i, c)| {
                let start = *units;
                *units += c.len_utf16();
                Some((i, start))
            })
            .find(|(_, start)| *start >= length)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let (cmd, query) = text.split_at(split);
        let cmd = cmd
            .strip_prefix('/')
            .and_then(|c| c.split('@').next())
            .unwrap_or(cmd);
        Self {
            name: cmd.into(),
            query: query.trim_start().into(),
        }
    }

    fn from_text(text: &str) -> Self {
        let text = text.trim_start();
        let (cmd, query) = text
            .split_once(char::is_whitespace)
            .unwrap_or((text, ""));
        let cmd = cmd.split('@').next().unwrap_or(cmd);
        Self {
            name: cmd.into(),
            query: query.trim_start().into(),
        }
    }
}
