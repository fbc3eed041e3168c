use eyre::{eyre, Context as _, Result};
use gate::Gate;
use log::error;
use teloxide::{
    prelude::{Requester as _, ResponseResult},
    types::{ChatId, Message, User},
    Bot,
};

use super::send_review_card;
use crate::state::{State, StateHolder};
use crate::texts;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    gate: Gate,
    state: StateHolder,
) -> ResponseResult<()> {
    let from = match msg.from.as_ref() {
        Some(from) if !from.is_bot => from.clone(),
        _ => return Ok(()),
    };

    if let Err(err) = process_message(&bot, &msg, &from, &gate, &state).await {
        error!("Failed to handle message: {:#}", err);
        bot.send_message(msg.chat.id, texts::ERROR).await?;
    }
    Ok(())
}

async fn process_message(
    bot: &Bot,
    msg: &Message,
    from: &User,
    gate: &Gate,
    state: &StateHolder,
) -> Result<()> {
    if msg.photo().is_some() {
        return handle_payment_screenshot(bot, msg, from, gate, state).await;
    }

    if let Some(text) = msg.text() {
        if state.get_state(msg.chat.id) == Some(State::AwaitingName) {
            return handle_full_name(bot, msg, from, gate, state, text).await;
        }
        bot.send_message(msg.chat.id, texts::SEND_START).await?;
    }
    Ok(())
}

async fn handle_payment_screenshot(
    bot: &Bot,
    msg: &Message,
    from: &User,
    gate: &Gate,
    state: &StateHolder,
) -> Result<()> {
    let tg_id = from.id.0 as i64;

    if let Some(user) = gate.get(tg_id).await? {
        if user.banned {
            bot.send_message(msg.chat.id, texts::BANNED_NOTICE).await?;
        }
    }

    // The largest size is last.
    let photo = msg
        .photo()
        .and_then(|sizes| sizes.last())
        .ok_or_else(|| eyre!("Message has no photo"))?;

    gate.attach_proof(tg_id, from.username.as_deref(), &photo.file.id)
        .await
        .context("Failed to attach payment proof")?;

    state.set_state(msg.chat.id, State::AwaitingName);
    bot.send_message(msg.chat.id, texts::ASK_NAME).await?;
    Ok(())
}

async fn handle_full_name(
    bot: &Bot,
    msg: &Message,
    from: &User,
    gate: &Gate,
    state: &StateHolder,
    full_name: &str,
) -> Result<()> {
    let tg_id = from.id.0 as i64;
    gate.set_full_name(tg_id, full_name.trim())
        .await
        .context("Failed to store full name")?;
    state.remove_state(msg.chat.id);

    bot.send_message(msg.chat.id, texts::SUBMISSION_RECEIVED)
        .await?;

    let user = gate
        .get(tg_id)
        .await?
        .ok_or_else(|| eyre!("User disappeared after submission: {}", tg_id))?;
    send_review_card(
        bot,
        ChatId(gate.admin_id()),
        "🆕 New payment submission:",
        &user,
    )
    .await
    .context("Failed to notify the admin")?;
    Ok(())
}
