use std::{env::var, sync::Arc};

use eyre::{Context, Error};

/// Process configuration, read once at startup. Missing or malformed
/// values fail fast naming the offending variable.
#[derive(Clone)]
pub struct Env(Arc<EnvInner>);

struct EnvInner {
    tg_token: String,
    admin_id: i64,
    channel_id: i64,
    mongo_url: String,
    payment_phone: String,
}

impl Env {
    pub fn load() -> Result<Env, Error> {
        Ok(Env(Arc::new(EnvInner {
            tg_token: var("TG_TOKEN").context("TG_TOKEN is not set")?,
            admin_id: var("ADMIN_ID")
                .context("ADMIN_ID is not set")?
                .parse()
                .context("ADMIN_ID must be an integer")?,
            channel_id: var("CHANNEL_ID")
                .context("CHANNEL_ID is not set")?
                .parse()
                .context("CHANNEL_ID must be an integer")?,
            mongo_url: var("MONGO_URL").context("MONGO_URL is not set")?,
            payment_phone: var("PAYMENT_PHONE").context("PAYMENT_PHONE is not set")?,
        })))
    }

    pub fn tg_token(&self) -> &str {
        &self.0.tg_token
    }

    pub fn admin_id(&self) -> i64 {
        self.0.admin_id
    }

    pub fn channel_id(&self) -> i64 {
        self.0.channel_id
    }

    pub fn mongo_url(&self) -> &str {
        &self.0.mongo_url
    }

    pub fn payment_phone(&self) -> &str {
        &self.0.payment_phone
    }
}
