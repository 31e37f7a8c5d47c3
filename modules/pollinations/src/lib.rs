pub mod config;
mod endpoints;
pub mod fetch;
pub mod options;
pub mod request;
mod response;
pub mod translate;

use crate::{
    config::{OutputMode, PollinationsConfig},
    fetch::{FetchImage, HttpImageFetcher},
    options::{resolve_seed, split_size, DrawOptions},
    request::{image_url, GenerationParams},
    translate::Translate,
};
use api::{
    proto::{BotCommand, ChatAction, InputFile, Message},
    response::CommonResponse,
};
use async_trait::async_trait;
use bot::{bot::command::BotCommandInfo, communicator::Communicate, module::Module};
use compact_str::{format_compact, CompactString};
use derivative::Derivative;
use eyre::bail;
use log::{debug, warn};
use reqwest::StatusCode;
use std::str::FromStr;

pub const USAGE: &str = "pd -[options] <prompt>
  -z <width>x<height>  image size
  -s <seed>            seed
  -m <model>           model name
  -e                   prompt enhancement
  -n                   no watermark";
pub const EMPTY_PROMPT: &str = "Please describe the image";
pub const TRANSLATION_FAILED: &str = "Prompt translation failed, using the original text";
const IMAGE_FILE_NAME: &str = "image.png";

#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub enum Reply {
    Text(CompactString),
    Photo {
        #[derivative(Debug(format_with = "fmt_byte_len"))]
        image: Vec<u8>,
        /// Sent as a separate text reply after the image
        details: Option<CompactString>,
    },
}

#[allow(clippy::ptr_arg)]
fn fmt_byte_len(bytes: &Vec<u8>, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "<{} bytes>", bytes.len())
}

fn failure_text(status: Option<StatusCode>) -> CompactString {
    match status {
        Some(status) => format_compact!("Image generation failed (status: {})", status.as_u16()),
        None => "Image generation failed (status: unknown)".into(),
    }
}

/// `pd` command: text to image through Pollinations.AI
pub struct Pollinations {
    config: PollinationsConfig,
    fetcher: Box<dyn FetchImage>,
    translator: Option<Box<dyn Translate>>,
}

impl Pollinations {
    pub fn new(config: PollinationsConfig) -> Self {
        Self {
            config,
            fetcher: Box::new(HttpImageFetcher::new()),
            translator: None,
        }
    }

    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Some(Box::new(translator));
        self
    }

    pub fn with_fetcher(mut self, fetcher: impl FetchImage + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    /// The original prompt comes back when translation is off or fails
    async fn translate_prompt(
        &self,
        comm: &dyn Communicate,
        message: &Message,
        prompt: &CompactString,
    ) -> CompactString {
        let Some(settings) = self.config.translation() else {
            return prompt.clone();
        };
        let result = match self.translator.as_ref() {
            Some(translator) => {
                translator
                    .translate(prompt, &settings.source_lang, &settings.target_lang)
                    .await
            }
            None => Err(eyre::eyre!("no translator available")),
        };
        match result {
            Ok(translated) => {
                debug!("prompt '{prompt}' translated to '{translated}'");
                translated
            }
            Err(err) => {
                warn!("prompt translation failed, {err}");
                if let Err(err) = comm
                    .reply_message(
                        TRANSLATION_FAILED,
                        message.chat.id.into(),
                        message.message_id,
                        None,
                    )
                    .await
                {
                    warn!("failed to send translation notice, {err}");
                }
                prompt.clone()
            }
        }
    }

    /// Runs one `pd` invocation; every failure ends up as a text reply
    pub async fn generate(
        &self,
        comm: &dyn Communicate,
        message: &Message,
        query: &str,
    ) -> Reply {
        let options = match DrawOptions::parse(query, &self.config) {
            Ok(options) => options,
            Err(err) => return Reply::Text(format_compact!("{err}\n{USAGE}")),
        };
        if options.prompt.is_empty() {
            return Reply::Text(format_compact!("{EMPTY_PROMPT}\n{USAGE}"));
        }

        match comm
            .send_chat_action(
                message.chat.id.into(),
                message.message_thread_id,
                ChatAction::UploadPhoto,
            )
            .await
        {
            Ok(CommonResponse::Ok(true)) => {}
            Ok(response) => debug!("upload_photo action not sent, {response:?}"),
            Err(err) => debug!("failed to send upload_photo action, {err}"),
        };

        let prompt = self.translate_prompt(comm, message, &options.prompt).await;

        let (width, height) = split_size(&options.size);
        let params = GenerationParams {
            model: options.model,
            width,
            height,
            enhance: options.enhance,
            seed: resolve_seed(options.seed.as_deref()),
            nologo: options.nologo,
            safe: self.config.safe,
        };
        let url = match image_url(&self.config.base_url, &prompt, &params) {
            Ok(url) => url,
            Err(err) => {
                warn!("failed to build image url for '{prompt}', {err}");
                return Reply::Text(failure_text(None));
            }
        };
        debug!("requesting {url}");

        match self.fetcher.fetch_image(url, self.config.timeout()).await {
            Ok(image) => {
                let details = match self.config.output {
                    OutputMode::ImageOnly => None,
                    OutputMode::Detailed => Some(params.details()),
                };
                Reply::Photo { image, details }
            }
            Err(err) => {
                warn!("image generation failed for '{prompt}', {err}");
                Reply::Text(failure_text(err.status()))
            }
        }
    }

    async fn reply_text(
        comm: &dyn Communicate,
        message: &Message,
        text: &str,
    ) -> eyre::Result<()> {
        comm.reply_message(text, message.chat.id.into(), message.message_id, None)
            .await?
            .into_result()?;
        Ok(())
    }

    /// A rejected upload is reported to the chat as a failed generation
    async fn send_reply(
        comm: &dyn Communicate,
        message: &Message,
        reply: Reply,
    ) -> eyre::Result<()> {
        match reply {
            Reply::Text(text) => Self::reply_text(comm, message, &text).await,
            Reply::Photo { image, details } => {
                let sent = comm
                    .send_photo(
                        InputFile::FileBytes(IMAGE_FILE_NAME.into(), image),
                        message.chat.id.into(),
                        Some(message.message_id),
                    )
                    .await
                    .and_then(|response| response.into_result().map_err(Into::into));
                if let Err(err) = sent {
                    warn!("failed to send the generated image, {err}");
                    return Self::reply_text(comm, message, &failure_text(None)).await;
                }
                match details {
                    Some(details) => Self::reply_text(comm, message, &details).await,
                    None => Ok(()),
                }
            }
        }
    }
}

enum CommandName {
    Draw,
}

impl FromStr for CommandName {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pd" => Ok(CommandName::Draw),
            _ => bail!("failed to recognize '{s}' as a possible command"),
        }
    }
}

#[async_trait]
impl Module for Pollinations {
    async fn try_execute_command(
        &self,
        comm: &dyn Communicate,
        cmd: &BotCommandInfo,
        message: &Message,
    ) -> eyre::Result<()> {
        match CommandName::from_str(cmd.name()) {
            Ok(CommandName::Draw) => {
                let reply = self.generate(comm, message, cmd.query()).await;
                Self::send_reply(comm, message, reply).await
            }
            Err(err) => {
                debug!("{err}");
                Ok(())
            }
        }
    }

    fn commands(&self) -> Vec<BotCommand> {
        vec![BotCommand {
            command: "pd".into(),
            description: "generate an image with Pollinations.AI".into(),
        }]
    }
}
