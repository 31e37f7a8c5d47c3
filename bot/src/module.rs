use crate::{bot::command::BotCommandInfo, communicator::Communicate};
use api::proto::{BotCommand, Message};
use async_trait::async_trait;

/// A command handler plugged into the bot.
/// Every command message is offered to every module; a module ignores names it does not own.
#[async_trait]
pub trait Module: Send + Sync {
    async fn try_execute_command(
        &self,
        comm: &dyn Communicate,
        cmd: &BotCommandInfo,
        message: &Message,
    ) -> eyre::Result<()>;

    /// Commands advertised to chat clients on startup
    fn commands(&self) -> Vec<BotCommand> {
        Vec::new()
    }
}
