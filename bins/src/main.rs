use std::sync::Arc;

use bot::TgDelivery;
use dotenv::dotenv;
use eyre::Context;
use gate::Gate;
use log::info;
use teloxide::Bot;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Err(err) = dotenv() {
        info!("Failed to load .env file: {}", err);
    }
    pretty_env_logger::init();
    color_eyre::install()?;

    let env = env::Env::load()?;

    info!("connecting to mongo");
    let storage = storage::Storage::new(env.mongo_url())
        .await
        .context("Failed to create storage")?;

    let bot = Bot::new(env.tg_token());
    let delivery = TgDelivery::new(bot.clone(), env.channel_id());
    let gate = Gate::new(Arc::new(storage.users), Arc::new(delivery), env.admin_id());

    bg_process::start(gate.clone());

    info!("Starting bot...");
    bot::start_bot(bot, gate, env).await?;

    Ok(())
}
