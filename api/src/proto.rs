use compact_str::CompactString;
use derivative::Derivative;
use derive_more::Display;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use serde_json::Map;
use serde_with::skip_serializing_none;

use crate::basic_types::{ChatIntId, Date, MessageId, UpdateId, UserId};

/// This object represents the contents of a file to be uploaded.
/// Must be posted using multipart/form-data in the usual way that files are uploaded via the browser.
/// https://core.telegram.org/bots/api#inputfile
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub enum InputFile {
    /// FileID is an ID of a file already uploaded to Telegram.
    FileID(CompactString),
    /// FileURL is a URL to use as a file for a request.
    FileURL(CompactString),
    /// FileBytes contains a file name and the bytes to upload under it.
    FileBytes(
        CompactString,
        #[derivative(Debug(format_with = "fmt_byte_len"))] Vec<u8>,
    ),
}

#[allow(clippy::ptr_arg)]
fn fmt_byte_len(bytes: &Vec<u8>, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "<{} bytes>", bytes.len())
}

pub enum InputFileResult {
    /// don't need upload
    Text(CompactString),
    /// must upload using multipart/form-data
    Part(reqwest::multipart::Part),
}

impl InputFile {
    pub fn need_upload(&self) -> bool {
        matches!(self, InputFile::FileBytes(_, _))
    }

    pub fn data(&self) -> eyre::Result<InputFileResult> {
        match self {
            InputFile::FileID(id) => Ok(InputFileResult::Text(id.clone())),
            InputFile::FileURL(url) => Ok(InputFileResult::Text(url.clone())),
            InputFile::FileBytes(file_name, bytes) => Ok(InputFileResult::Part(
                reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.to_string())
                    .mime_str(mime_for(file_name))?,
            )),
        }
    }
}

fn mime_for(file_name: &str) -> &'static str {
    match file_name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    InlineQuery,
    CallbackQuery,
    MyChatMember,
    ChatMember,
}

#[derive(Debug)]
pub struct CommonUpdate {
    pub id: UpdateId,
    pub data: Update,
}

#[derive(Debug)]
pub enum Update {
    MessageUpdate(Message),
    EditedMessageUpdate(Message),
    ChannelPostUpdate(Message),
    EditedChannelPostUpdate(Message),
    /// Any update kind the bot does not act on, keyed by its field name
    Unsupported(CompactString),
}

impl<'de> Deserialize<'de> for CommonUpdate {
    fn deserialize<D>(deserializer: D) -> Result<CommonUpdate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::deserialize(deserializer)?;

        let id = map
            .remove("update_id")
            .ok_or_else(|| de::Error::missing_field("update_id"))
            .map(Deserialize::deserialize)?
            .map_err(de::Error::custom)?;

        let (key, value) = map
            .into_iter()
            .next()
            .ok_or_else(|| de::Error::custom("update with no data"))?;

        let update = match key.as_str() {
            "message" => serde_json::from_value::<Message>(value).map(Update::MessageUpdate),
            "edited_message" => {
                serde_json::from_value::<Message>(value).map(Update::EditedMessageUpdate)
            }
            "channel_post" => serde_json::from_value::<Message>(value).map(Update::ChannelPostUpdate),
            "edited_channel_post" => {
                serde_json::from_value::<Message>(value).map(Update::EditedChannelPostUpdate)
            }
            _ => Ok(Update::Unsupported(key.as_str().into())),
        }
        .map_err(de::Error::custom)?;
        Ok(CommonUpdate { id, data: update })
    }
}

#[derive(Debug, Display, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ChatId {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[display(fmt = "{}", _0)]
    Int(ChatIntId),
    #[display(fmt = "{}", _0)]
    Str(CompactString),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<CompactString> for ChatId {
    fn from(id: CompactString) -> Self {
        Self::Str(id)
    }
}

#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    Markdown,
    MarkdownV2,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: CompactString,
    pub last_name: Option<CompactString>,
    pub username: Option<CompactString>,
    pub language_code: Option<CompactString>,
}

impl User {
    pub fn full_name_with_username(&self) -> CompactString {
        let mut name = self.first_name.clone();
        if let Some(s) = &self.username {
            name += &format!(" {s}");
        }
        if let Some(s) = &self.last_name {
            name += &format!(" {s}");
        }
        name
    }
}

#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    Sender,
    #[default]
    Private,
    Group,
    Supergroup,
    Channel,
}

#[derive(Debug, Default, Deserialize)]
pub struct Chat {
    pub id: ChatIntId,
    #[serde(default, rename = "type")]
    pub chat_type: ChatType,
    pub title: Option<CompactString>,
    pub username: Option<CompactString>,
    pub first_name: Option<CompactString>,
    pub last_name: Option<CompactString>,
    pub is_forum: Option<bool>,
}

/// This object represents one special entity in a text message. For example, hashtags, usernames, URLs, etc.
/// https://core.telegram.org/bots/api#messageentity
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub entity_type: MessageEntityType,
    pub offset: i64,
    pub length: usize,
    pub url: Option<CompactString>,
    pub user: Option<User>,
    pub language: Option<CompactString>,
    pub custom_emoji_id: Option<CompactString>,
}

/// https://core.telegram.org/bots/api#messageentity
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEntityType {
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    TextLink,
    TextMention,
    CustomEmoji,
}

/// Only the fields a command handler looks at; the rest of the object is ignored.
/// https://core.telegram.org/bots/api#message
#[derive(Debug, Default, Deserialize)]
pub struct Message {
    pub message_id: MessageId,
    pub message_thread_id: Option<i32>,
    pub from: Option<User>,
    pub date: Date,
    pub chat: Chat,
    pub reply_to_message: Option<Box<Message>>,
    pub edit_date: Option<i64>,
    pub text: Option<CompactString>,
    pub entities: Option<Vec<MessageEntity>>,
    pub caption: Option<CompactString>,
}

impl Message {
    pub fn is_of_entity(&self, entity: MessageEntityType) -> Option<MessageEntity> {
        self.entities
            .as_ref()?
            .iter()
            .find(|msg_entity| msg_entity.entity_type == entity)
            .cloned()
    }
}

/// This object represents a bot command.
/// https://core.telegram.org/bots/api#botcommand
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BotCommand {
    /// Text of the command; 1-32 characters.
    /// Can contain only lowercase English letters, digits and underscores.
    pub command: CompactString,
    /// Description of the command; 1-256 characters.
    pub description: CompactString,
}

/// https://core.telegram.org/bots/api#botcommandscope
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum BotCommandScope {
    #[default]
    Default,
    AllPrivateChats,
    AllGroupChats,
    AllChatAdministrators,
}

#[derive(Debug, Copy, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    UploadDocument,
}
