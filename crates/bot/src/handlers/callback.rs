use gate::{Decided, Gate};
use log::{error, warn};
use model::errors::GateError;
use teloxide::{
    prelude::{Requester as _, ResponseResult},
    types::CallbackQuery,
    Bot,
};

use crate::callback_data::decode;
use crate::format::fmt_dt;
use crate::texts;

pub async fn callback_handler(bot: Bot, q: CallbackQuery, gate: Gate) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some((action, target)) = q.data.as_deref().and_then(decode) else {
        return Ok(());
    };
    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let actor = q.from.id.0 as i64;

    let text = match gate.decide(actor, target, action.into()).await {
        Ok(outcome) => {
            // Drop the buttons so the card cannot be acted on twice.
            if let Err(err) = bot.edit_message_reply_markup(chat_id, message.id()).await {
                warn!("Failed to drop review buttons for {}: {}", target, err);
            }
            match outcome {
                Decided::Approved { until } => format!(
                    "✅ User {} approved successfully!\nSubscription until: {}",
                    target,
                    fmt_dt(&until)
                ),
                Decided::Rejected => format!("❌ User {} rejected and banned.", target),
            }
        }
        Err(GateError::Unauthorized { .. }) => texts::ADMIN_ONLY.to_owned(),
        Err(GateError::UserNotFound(_)) => "❌ User not found in database.".to_owned(),
        Err(err) => {
            error!("Failed to apply decision for {}: {:#}", target, err);
            texts::ERROR.to_owned()
        }
    };

    bot.send_message(chat_id, text).await?;
    Ok(())
}
