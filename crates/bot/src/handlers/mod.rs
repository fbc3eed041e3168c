pub mod callback;
pub mod command;
pub mod message;

use eyre::Result;
use model::user::UserAccount;
use teloxide::{
    payloads::{SendMessageSetters as _, SendPhotoSetters as _},
    prelude::Requester as _,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile},
    Bot,
};

use crate::callback_data::{encode, ReviewAction};
use crate::format::fmt_dt;

/// A submission card for the administrator: the screenshot (when present),
/// who sent it, and the approve/reject buttons.
pub(crate) async fn send_review_card(
    bot: &Bot,
    chat_id: ChatId,
    title: &str,
    user: &UserAccount,
) -> Result<()> {
    let text = format!(
        "{}\n\
         ├─ User: @{}\n\
         ├─ Name: {}\n\
         ├─ ID: {}\n\
         └─ Submitted: {}",
        title,
        user.username.as_deref().unwrap_or("-"),
        user.full_name,
        user.tg_id,
        fmt_dt(&user.created_at),
    );
    let markup = review_keyboard(user.tg_id);

    match &user.payment_proof {
        Some(file_id) => {
            bot.send_photo(chat_id, InputFile::file_id(file_id.clone()))
                .caption(text)
                .reply_markup(markup)
                .await?;
        }
        None => {
            bot.send_message(chat_id, text).reply_markup(markup).await?;
        }
    }
    Ok(())
}

fn review_keyboard(tg_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Approve", encode(ReviewAction::Approve, tg_id)),
        InlineKeyboardButton::callback("❌ Reject", encode(ReviewAction::Reject, tg_id)),
    ]])
}
