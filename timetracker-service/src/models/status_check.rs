use crate::dtos::CreateStatusCheckRequest;
use crate::services::IdGenerator;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusCheck {
    #[serde(rename = "_id")]
    pub id: String,
    pub client_name: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    /// `now` is cut to milliseconds, the precision of a BSON datetime.
    pub fn new(input: CreateStatusCheckRequest, now: DateTime<Utc>, ids: &dyn IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            client_name: input.client_name,
            timestamp: now.trunc_subsecs(3),
        }
    }
}
