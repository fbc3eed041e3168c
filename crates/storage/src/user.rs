use async_trait::async_trait;
use bson::{doc, to_document, Document};
use eyre::{Error, Result};
use futures_util::stream::TryStreamExt;
use log::info;
use model::store::{UserStore, UserUpdate};
use model::user::UserAccount;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::db::Db;

const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct Users {
    users: Collection<UserAccount>,
}

impl Users {
    pub(crate) async fn new(db: &Db) -> Result<Self> {
        let users = db.collection(COLLECTION);
        users
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "tg_id": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;
        Ok(Users { users })
    }
}

#[async_trait]
impl UserStore for Users {
    async fn insert(&self, user: UserAccount) -> Result<()> {
        info!("Inserting user: {:?}", user);
        let result = self
            .users
            .update_one(
                doc! { "tg_id": user.tg_id },
                doc! { "$setOnInsert": to_document(&user)? },
            )
            .upsert(true)
            .await?;
        if result.upserted_id.is_none() {
            return Err(Error::msg("User already exists"));
        }
        Ok(())
    }

    async fn get(&self, tg_id: i64) -> Result<Option<UserAccount>> {
        Ok(self.users.find_one(doc! { "tg_id": tg_id }).await?)
    }

    async fn update(&self, tg_id: i64, update: UserUpdate) -> Result<Option<UserAccount>> {
        let set = set_document(update);
        if set.is_empty() {
            return self.get(tg_id).await;
        }
        Ok(self
            .users
            .find_one_and_update(doc! { "tg_id": tg_id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn find_all(&self) -> Result<Vec<UserAccount>> {
        let cursor = self.users.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_pending(&self) -> Result<Vec<UserAccount>> {
        let cursor = self
            .users
            .find(doc! { "approved": false, "banned": false })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_banned(&self) -> Result<Vec<UserAccount>> {
        let cursor = self.users.find(doc! { "banned": true }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.users.count_documents(doc! {}).await?)
    }
}

fn set_document(update: UserUpdate) -> Document {
    let mut set = Document::new();
    if let Some(full_name) = update.full_name {
        set.insert("full_name", full_name);
    }
    if let Some(username) = update.username {
        set.insert("username", username);
    }
    if let Some(approved) = update.approved {
        set.insert("approved", approved);
    }
    if let Some(banned) = update.banned {
        set.insert("banned", banned);
    }
    if let Some(end) = update.subscription_end {
        set.insert("subscription_end", bson::DateTime::from_chrono(end));
    }
    if let Some(proof) = update.payment_proof {
        set.insert("payment_proof", proof);
    }
    set
}
