use crate::connector::{send_multipart, send_request};
use api::{
    basic_types::{MessageId, MessageThreadId},
    endpoints::{SendChatAction, SendMessage, SendPhoto, SetMyCommands},
    proto::{BotCommand, BotCommandScope, ChatAction, ChatId, InputFile, Message, ParseMode},
    request::{SendChatActionRequest, SendMessageRequest, SendPhotoRequest, SetMyCommandsRequest},
    response::CommonResponse,
};
use async_trait::async_trait;
use compact_str::CompactString;
use reqwest::Client;
use std::sync::Arc;

/// Outgoing side of a chat session
#[async_trait]
pub trait Communicate: Send + Sync {
    async fn reply_message(
        &self,
        text: &str,
        chat_id: ChatId,
        reply_to_message_id: MessageId,
        parse_mode: Option<ParseMode>,
    ) -> eyre::Result<CommonResponse<Message>>;

    async fn send_photo(
        &self,
        photo: InputFile,
        chat_id: ChatId,
        reply_to_message_id: Option<MessageId>,
    ) -> eyre::Result<CommonResponse<Message>>;

    async fn send_chat_action(
        &self,
        chat_id: ChatId,
        message_thread_id: Option<MessageThreadId>,
        action: ChatAction,
    ) -> eyre::Result<CommonResponse<bool>>;
}

#[derive(Clone)]
pub struct Communicator {
    token: Arc<CompactString>,
    client: Client,
}

impl Communicator {
    pub fn new(token: &str) -> Self {
        Self {
            token: Arc::new(token.into()),
            client: Client::new(),
        }
    }

    pub(crate) async fn set_my_commands(
        &self,
        commands: Vec<BotCommand>,
        scope: BotCommandScope,
    ) -> eyre::Result<CommonResponse<bool>> {
        let request = commands_request(commands, scope);
        send_request::<SetMyCommands>(&self.client, &self.token, &request, None).await
    }
}

fn commands_request(commands: Vec<BotCommand>, scope: BotCommandScope) -> SetMyCommandsRequest {
    SetMyCommandsRequest {
        commands,
        scope: Some(scope),
        language_code: None,
    }
}

#[async_trait]
impl Communicate for Communicator {
    async fn reply_message(
        &self,
        text: &str,
        chat_id: ChatId,
        reply_to_message_id: MessageId,
        parse_mode: Option<ParseMode>,
    ) -> eyre::Result<CommonResponse<Message>> {
        let request = SendMessageRequest {
            parse_mode,
            reply_to_message_id: Some(reply_to_message_id),
            allow_sending_without_reply: Some(true),
            ..SendMessageRequest::new(chat_id, text)
        };
        send_request::<SendMessage>(&self.client, &self.token, &request, None).await
    }

    async fn send_photo(
        &self,
        photo: InputFile,
        chat_id: ChatId,
        reply_to_message_id: Option<MessageId>,
    ) -> eyre::Result<CommonResponse<Message>> {
        let request = SendPhotoRequest {
            reply_to_message_id,
            allow_sending_without_reply: reply_to_message_id.map(|_| true),
            ..SendPhotoRequest::new(chat_id, photo)
        };
        send_multipart::<SendPhoto>(&self.client, &self.token, &request).await
    }

    async fn send_chat_action(
        &self,
        chat_id: ChatId,
        message_thread_id: Option<MessageThreadId>,
        action: ChatAction,
    ) -> eyre::Result<CommonResponse<bool>> {
        let request = SendChatActionRequest {
            chat_id,
            message_thread_id,
            action,
        };
        send_request::<SendChatAction>(&self.client, &self.token, &request, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_my_commands_body() {
        let request = commands_request(
            vec![BotCommand {
                command: "pd".into(),
                description: "generate an image with Pollinations.AI".into(),
            }],
            BotCommandScope::Default,
        );
        insta::assert_json_snapshot!(request, @r###"
        {
          "commands": [
            {
              "command": "pd",
              "description": "generate an image with Pollinations.AI"
            }
          ],
          "scope": {
            "type": "default"
          }
        }
        "###);
    }
}
