use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of the access window granted by an approval.
pub const SUBSCRIPTION_DAYS: i64 = 30;

/// How long before expiry the sweep starts warning the user.
pub const WARNING_WINDOW_HOURS: i64 = 24;

/// One record per Telegram identity. Created on first contact and never
/// deleted; `banned` is a terminal marker until the next approval cycle.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserAccount {
    #[serde(rename = "_id")]
    pub id: bson::oid::ObjectId,
    pub tg_id: i64,
    pub full_name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub banned: bool,
    #[serde(default)]
    #[serde(with = "opt_chrono_datetime_as_bson_datetime")]
    pub subscription_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub payment_proof: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(tg_id: i64, full_name: &str, username: Option<&str>) -> UserAccount {
        UserAccount {
            id: bson::oid::ObjectId::new(),
            tg_id,
            full_name: full_name.to_owned(),
            username: username.map(ToOwned::to_owned),
            approved: false,
            banned: false,
            subscription_end: None,
            payment_proof: None,
            created_at: Utc::now(),
        }
    }

    /// `banned` always overrides `approved` here, even if both flags are set.
    pub fn subscription_active(&self, now: DateTime<Utc>) -> bool {
        self.approved
            && !self.banned
            && self.subscription_end.map_or(false, |end| end > now)
    }

    /// Opens a fresh access window measured from `now`. Any previous
    /// expiry date is discarded, never extended.
    pub fn approve(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let until = now + Duration::days(SUBSCRIPTION_DAYS);
        self.approved = true;
        self.banned = false;
        self.subscription_end = Some(until);
        until
    }

    pub fn reject(&mut self) {
        self.approved = false;
        self.banned = true;
    }

    /// Terminal expiry transition applied by the sweep. The user must go
    /// through a full approval cycle again to regain access.
    pub fn expire(&mut self) {
        self.approved = false;
        self.banned = true;
    }

    /// What the sweep should do with this record at `now`. Pending and
    /// already-banned users yield `None` and are never touched.
    pub fn sweep_status(&self, now: DateTime<Utc>) -> Option<SweepStatus> {
        if !self.approved {
            return None;
        }
        let end = self.subscription_end?;
        if now >= end {
            Some(SweepStatus::Expired)
        } else if end - Duration::hours(WARNING_WINDOW_HOURS) <= now {
            Some(SweepStatus::ExpiresSoon)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStatus {
    Expired,
    ExpiresSoon,
}

// bson ships a chrono serde helper only for the non-optional case.
mod opt_chrono_datetime_as_bson_datetime {
    use bson::DateTime as BsonDateTime;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.map(BsonDateTime::from_chrono).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value = Option::<BsonDateTime>::deserialize(deserializer)?;
        Ok(value.map(|date| date.to_chrono()))
    }
}
