use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CheckInStatus {
    NotCheckedIn,
    CheckedIn,
}

impl std::fmt::Display for CheckInStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckInStatus::NotCheckedIn => write!(f, "not_checked_in"),
            CheckInStatus::CheckedIn => write!(f, "checked_in"),
        }
    }
}

/// A ticket held by one customer for one event.
///
/// `customer_id` and `event_id` are shape-validated references only;
/// existence checks belong to the owning application layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub customer_id: ObjectId,
    pub event_id: ObjectId,
    pub qr_code_data: String,
    pub payment_status: PaymentStatus,
    pub check_in_status: CheckInStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::opt_chrono_datetime_as_bson_datetime"
    )]
    pub checked_in_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_by: Option<ObjectId>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(customer_id: ObjectId, event_id: ObjectId, qr_code_data: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            customer_id,
            event_id,
            qr_code_data,
            payment_status: PaymentStatus::Pending,
            check_in_status: CheckInStatus::NotCheckedIn,
            checked_in_at: None,
            checked_in_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}
