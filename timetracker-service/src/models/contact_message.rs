use crate::dtos::CreateContactMessageRequest;
use crate::services::IdGenerator;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_company: Option<String>,
    pub user_phone: Option<String>,
    pub message: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl ContactMessage {
    /// `now` is cut to milliseconds, the precision of a BSON datetime.
    pub fn new(
        input: CreateContactMessageRequest,
        now: DateTime<Utc>,
        ids: &dyn IdGenerator,
    ) -> Self {
        Self {
            id: ids.next_id(),
            user_name: input.user_name,
            user_email: input.user_email,
            user_company: input.user_company,
            user_phone: input.user_phone,
            message: input.message,
            timestamp: now.trunc_subsecs(3),
        }
    }
}
