mod config;

use crate::config::GlobalConfig;
use bot::bot::{config::BotConfig, Bot, State};
use log::{error, info, LevelFilter};
use pollinations::{translate::LibreTranslator, Pollinations};
use simple_logger::SimpleLogger;
use std::path::Path;
use tokio::{signal, sync::mpsc};

#[tokio::main]
async fn main() {
    let token = dotenv::var("TOKEN").expect("no token in env");

    SimpleLogger::new()
        .with_level(LevelFilter::Off)
        .with_module_level("pdraw", LevelFilter::Debug)
        .with_module_level("bot", LevelFilter::Debug)
        .with_module_level("api", LevelFilter::Debug)
        .with_module_level("pollinations", LevelFilter::Debug)
        .init()
        .expect("logger failure");

    let work_dir = dotenv::var("WORK_DIR").expect("no work dir in env");
    let path = Path::new(work_dir.as_str()).join(Path::new("config.xml"));

    let config = GlobalConfig::from_file(path.as_path()).expect("failed to load config");

    let (tx, rx) = mpsc::channel::<State>(1);

    let bot_config = BotConfig {
        skip_missed_updates: config.skip_missed_updates,
        update_limit: config.update_limit,
        polling_timeout: config.polling_timeout,
        ..Default::default()
    };
    let mut bot = Bot::with_config(token.as_str(), rx, bot_config);

    let translator = config.pollinations.translation().map(|settings| {
        let api_key = dotenv::var("LIBRETRANSLATE_API_KEY").ok();
        info!("prompt translation via {}", settings.service_url);
        LibreTranslator::new(&settings.service_url, api_key.as_deref())
            .with_timeout(config.pollinations.timeout())
    });
    let mut pollinations = Pollinations::new(config.pollinations);
    if let Some(translator) = translator {
        pollinations = pollinations.with_translator(translator);
    }
    bot.add_module("pollinations", pollinations);

    let (started, _) = tokio::join!(bot.start(), async {
        match signal::ctrl_c().await {
            Ok(()) => {
                tx.send(State::Shutdown)
                    .await
                    .expect("failed to send shutdown signal");
            }
            Err(err) => {
                panic!("unable to listen for shutdown signal: {}", err);
            }
        };
    });
    if let Err(err) = started {
        error!("bot stopped, {err}");
    }
}
