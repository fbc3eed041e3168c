pub mod db;
pub mod user;

use db::Db;
use eyre::Result;
use user::Users;

const DB_NAME: &str = "gatekeeper_db";

#[derive(Clone)]
pub struct Storage {
    pub db: Db,
    pub users: Users,
}

impl Storage {
    pub async fn new(uri: &str) -> Result<Self> {
        let db = Db::new(uri, DB_NAME).await?;
        let users = Users::new(&db).await?;
        Ok(Storage { db, users })
    }
}
