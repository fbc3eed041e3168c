use async_trait::async_trait;
use model::delivery::{Delivery, DeliveryError};
use teloxide::{
    payloads::CreateChatInviteLinkSetters as _,
    prelude::Requester as _,
    types::{ChatId, UserId},
    Bot,
};

/// Telegram-backed side effects. Channel access is granted with a one-use
/// invite link and revoked with a kick (ban + unban), so a kicked user can
/// come back through a fresh approval cycle.
pub struct TgDelivery {
    bot: Bot,
    channel: ChatId,
}

impl TgDelivery {
    pub fn new(bot: Bot, channel_id: i64) -> TgDelivery {
        TgDelivery {
            bot,
            channel: ChatId(channel_id),
        }
    }
}

#[async_trait]
impl Delivery for TgDelivery {
    async fn notify(&self, tg_id: i64, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(ChatId(tg_id), text)
            .await
            .map_err(eyre::Error::from)?;
        Ok(())
    }

    async fn grant_access(&self, tg_id: i64) -> Result<(), DeliveryError> {
        let link = self
            .bot
            .create_chat_invite_link(self.channel)
            .member_limit(1)
            .await
            .map_err(eyre::Error::from)?;
        self.bot
            .send_message(
                ChatId(tg_id),
                format!("🔗 Here is your invite link: {}", link.invite_link),
            )
            .await
            .map_err(eyre::Error::from)?;
        Ok(())
    }

    async fn revoke_access(&self, tg_id: i64) -> Result<(), DeliveryError> {
        let user = UserId(tg_id as u64);
        self.bot
            .ban_chat_member(self.channel, user)
            .await
            .map_err(eyre::Error::from)?;
        self.bot
            .unban_chat_member(self.channel, user)
            .await
            .map_err(eyre::Error::from)?;
        Ok(())
    }
}
