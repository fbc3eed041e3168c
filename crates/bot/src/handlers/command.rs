use env::Env;
use eyre::Result;
use gate::Gate;
use log::error;
use teloxide::{
    prelude::{Requester as _, ResponseResult},
    types::{Message, User},
    utils::command::BotCommands,
    Bot,
};

use super::send_review_card;
use crate::format::fmt_dt;
use crate::texts;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "start the payment process")]
    Start,
    #[command(description = "show bot statistics")]
    Stats,
    #[command(description = "show pending approvals")]
    Approvals,
    #[command(description = "show banned users")]
    Banned,
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    gate: Gate,
    env: Env,
) -> ResponseResult<()> {
    let from = match msg.from.as_ref() {
        Some(from) if !from.is_bot => from.clone(),
        _ => return Ok(()),
    };

    if let Err(err) = process_command(&bot, &msg, &from, cmd, &gate, &env).await {
        error!("Failed to handle command: {:#}", err);
        bot.send_message(msg.chat.id, texts::ERROR).await?;
    }
    Ok(())
}

async fn process_command(
    bot: &Bot,
    msg: &Message,
    from: &User,
    cmd: Command,
    gate: &Gate,
    env: &Env,
) -> Result<()> {
    let tg_id = from.id.0 as i64;

    match cmd {
        Command::Start => start(bot, msg, from, gate, env).await,
        Command::Stats | Command::Approvals | Command::Banned if !gate.is_admin(tg_id) => {
            bot.send_message(msg.chat.id, texts::ADMIN_ONLY).await?;
            Ok(())
        }
        Command::Stats => stats(bot, msg, gate).await,
        Command::Approvals => approvals(bot, msg, gate).await,
        Command::Banned => banned(bot, msg, gate).await,
    }
}

async fn start(bot: &Bot, msg: &Message, from: &User, gate: &Gate, env: &Env) -> Result<()> {
    let tg_id = from.id.0 as i64;

    if let Some(user) = gate.get(tg_id).await? {
        if user.banned {
            bot.send_message(msg.chat.id, texts::BANNED_NOTICE).await?;
            return Ok(());
        }
    } else {
        gate.register(tg_id, &from.full_name(), from.username.as_deref())
            .await?;
    }

    bot.send_message(msg.chat.id, texts::welcome(env.payment_phone()))
        .await?;
    bot.send_message(msg.chat.id, texts::SEND_SCREENSHOT).await?;
    Ok(())
}

async fn stats(bot: &Bot, msg: &Message, gate: &Gate) -> Result<()> {
    let stats = gate.stats().await?;
    let text = format!(
        "📊 Bot statistics:\n\
         ├─ Total users: {}\n\
         ├─ Active subscriptions: {}\n\
         ├─ Pending approvals: {}\n\
         └─ Banned users: {}\n\n\
         👑 Admin commands:\n\
         ├─ /approvals - show pending approvals\n\
         ├─ /stats - show statistics\n\
         └─ /banned - show banned users",
        stats.total, stats.active, stats.pending, stats.banned
    );
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

async fn approvals(bot: &Bot, msg: &Message, gate: &Gate) -> Result<()> {
    let pending = gate.pending_approvals().await?;
    if pending.is_empty() {
        bot.send_message(msg.chat.id, texts::NO_PENDING).await?;
        return Ok(());
    }

    bot.send_message(
        msg.chat.id,
        format!("📋 Found {} pending approval(s):", pending.len()),
    )
    .await?;
    for user in &pending {
        send_review_card(bot, msg.chat.id, "🆕 Pending approval:", user).await?;
    }
    Ok(())
}

async fn banned(bot: &Bot, msg: &Message, gate: &Gate) -> Result<()> {
    let banned = gate.banned_users().await?;
    if banned.is_empty() {
        bot.send_message(msg.chat.id, texts::NO_BANNED).await?;
        return Ok(());
    }

    let mut text = "🚫 Banned users:\n\n".to_owned();
    for user in &banned {
        let expired = match &user.subscription_end {
            Some(end) => format!("Expired: {}", fmt_dt(end)),
            None => "No subscription data".to_owned(),
        };
        text.push_str(&format!(
            "👤 @{} (ID: {})\n   {}\n\n",
            user.username.as_deref().unwrap_or("-"),
            user.tg_id,
            expired
        ));
    }
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}
