use crate::{
    bot::{command::BotCommandInfo, config::BotConfig},
    command::verify_commands,
    communicator::Communicator,
    connector::{
        polling::{PollingConnector, PollingConnectorConfig},
        Connector,
    },
    module::Module,
    ward,
};
use api::proto::{BotCommandScope, Message, Update};
use compact_str::CompactString;
use eyre::bail;
use futures_util::future::join_all;
use log::{debug, error, info};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::mpsc::Receiver;

pub mod command;
pub mod config;

type Modules = HashMap<CompactString, Arc<dyn Module>>;

pub struct Bot {
    connector: Box<dyn Connector>,
    communicator: Communicator,
    modules: Modules,
    state_rx: Receiver<State>,
}

#[derive(Debug)]
pub enum State {
    Shutdown,
}

impl Bot {
    pub fn with_config(token: &str, state_rx: Receiver<State>, config: BotConfig) -> Self {
        let connector_config = PollingConnectorConfig {
            allowed_updates: config.allowed_updates.into_iter().collect(),
            limit: config.update_limit,
            timeout: config.polling_timeout,
            drop_pending_updates: config.skip_missed_updates,
        };
        Self {
            connector: Box::new(PollingConnector::with_config(token, connector_config)),
            communicator: Communicator::new(token),
            modules: Default::default(),
            state_rx,
        }
    }

    /// Each module has to have a unique name
    pub fn add_module(&mut self, name: &str, module: impl Module + 'static) {
        if self.modules.contains_key(name) {
            error!("failed to insert '{name}' as the module with that name is present already");
        } else {
            self.modules.insert(name.into(), Arc::new(module));
        }
    }

    async fn publish_commands(&self) -> eyre::Result<()> {
        let mut commands = self
            .modules
            .values()
            .flat_map(|module| module.commands())
            .collect::<Vec<_>>();
        if commands.is_empty() {
            return Ok(());
        }
        commands.sort_by(|a, b| a.command.cmp(&b.command));
        verify_commands(&commands)?;
        let published = self
            .communicator
            .set_my_commands(commands, BotCommandScope::Default)
            .await?
            .into_result()?;
        debug!("bot commands published: {published}");
        Ok(())
    }

    async fn handle_message_update(modules: Arc<Modules>, comm: Communicator, message: Message) {
        let cmd = ward!(BotCommandInfo::try_from(&message).ok(), return);
        if let Some(from) = message.from.as_ref() {
            debug!(
                "'{}' from {} in chat {}",
                cmd.name(),
                from.full_name_with_username(),
                message.chat.id
            );
        }

        let (comm, cmd, message) = (&comm, &cmd, &message);
        let results = join_all(modules.iter().map(|(name, module)| async move {
            (name, module.try_execute_command(comm, cmd, message).await)
        }))
        .await;

        for (name, result) in results {
            if let Err(report) = result {
                error!("module '{name}' failed on {cmd:?}, {report}");
            }
        }
    }

    /// Polls updates until a shutdown signal arrives, each message is handled on its own task
    pub async fn start(mut self) -> eyre::Result<()> {
        self.connector.on_startup().await?;

        if let Err(err) = self.publish_commands().await {
            error!("failed to publish bot commands, {err}");
        }

        let modules = Arc::new(std::mem::take(&mut self.modules));
        info!("bot started with {} module(s)", modules.len());

        loop {
            let updates = tokio::select! {
                state = self.state_rx.recv() => match state {
                    Some(State::Shutdown) => {
                        info!("shutdown signal received");
                        return Ok(());
                    }
                    None => bail!("bot signal channel died"),
                },
                updates = self.connector.fetch_updates() => updates,
            };

            let updates = match updates {
                Ok(updates) => updates,
                Err(err) => {
                    error!("{err}");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    continue;
                }
            };

            for update in updates {
                debug!("update received: {update:?}");
                match update.data {
                    Update::MessageUpdate(message) => {
                        tokio::spawn(Self::handle_message_update(
                            modules.clone(),
                            self.communicator.clone(),
                            message,
                        ));
                    }
                    Update::Unsupported(kind) => {
                        debug!("skipping unsupported update '{kind}'");
                    }
                    _ => {}
                };
            }
        }
    }
}
