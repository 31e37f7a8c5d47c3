use crate::{
    basic_types::{MessageId, MessageThreadId},
    files::{Files, GetFiles},
    proto::{BotCommand, BotCommandScope, ChatAction, ChatId, InputFile, ParseMode, UpdateType},
};
use compact_str::CompactString;
use derivative::Derivative;
use serde::Serialize;
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: ChatId,
    pub message_thread_id: Option<MessageThreadId>,
    pub text: CompactString,
    pub parse_mode: Option<ParseMode>,
    pub disable_web_page_preview: Option<bool>,
    pub disable_notification: Option<bool>,
    pub protect_content: Option<bool>,
    pub reply_to_message_id: Option<MessageId>,
    pub allow_sending_without_reply: Option<bool>,
}

impl SendMessageRequest {
    pub fn new(chat_id: ChatId, text: impl Into<CompactString>) -> Self {
        Self {
            chat_id,
            message_thread_id: None,
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: None,
            disable_notification: None,
            protect_content: None,
            reply_to_message_id: None,
            allow_sending_without_reply: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Default, Serialize)]
pub struct GetUpdatesRequest {
    pub offset: Option<i64>,
    pub limit: Option<u32>,
    pub timeout: Option<u32>,
    pub allowed_updates: Option<Vec<UpdateType>>,
}

#[skip_serializing_none]
#[derive(Debug, Default, Serialize)]
pub struct DeleteWebhookRequest {
    pub drop_pending_updates: Option<bool>,
}

/// Use this method to change the list of the bot's commands.
/// https://core.telegram.org/bots/api#setmycommands
#[skip_serializing_none]
#[derive(Debug, Default, Serialize)]
pub struct SetMyCommandsRequest {
    pub commands: Vec<BotCommand>,
    pub scope: Option<BotCommandScope>,
    pub language_code: Option<CompactString>,
}

/// Use this method to send photos. On success, the sent Message is returned.
/// https://core.telegram.org/bots/api#sendphoto
#[skip_serializing_none]
#[derive(Derivative, Serialize)]
#[derivative(Debug)]
pub struct SendPhotoRequest {
    pub chat_id: ChatId,
    pub message_thread_id: Option<MessageThreadId>,
    /// Photo to send. Pass a file_id as String to send a photo that exists
    /// on the Telegram servers (recommended), pass an HTTP URL as a String for Telegram
    /// to get a photo from the Internet, or upload a new photo using multipart/form-data.
    /// The photo must be at most 10 MB in size. The photo's width and height must not exceed 10000 in total.
    /// Width and height ratio must be at most 20.
    #[serde(skip)]
    pub photo: InputFile,
    /// 0-1024 characters after entities parsing
    pub caption: Option<CompactString>,
    pub parse_mode: Option<ParseMode>,
    pub has_spoiler: Option<bool>,
    pub disable_notification: Option<bool>,
    pub protect_content: Option<bool>,
    pub reply_to_message_id: Option<MessageId>,
    pub allow_sending_without_reply: Option<bool>,
}

impl SendPhotoRequest {
    pub fn new(chat_id: ChatId, photo: InputFile) -> Self {
        Self {
            chat_id,
            message_thread_id: None,
            photo,
            caption: None,
            parse_mode: None,
            has_spoiler: None,
            disable_notification: None,
            protect_content: None,
            reply_to_message_id: None,
            allow_sending_without_reply: None,
        }
    }
}

impl GetFiles for SendPhotoRequest {
    fn get_files(&self) -> Files {
        [("photo".into(), self.photo.clone())].into()
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct SendChatActionRequest {
    pub chat_id: ChatId,
    pub message_thread_id: Option<MessageThreadId>,
    pub action: ChatAction,
}
