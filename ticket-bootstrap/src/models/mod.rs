pub mod admin;
pub mod customer;
pub mod event;
pub mod ticket;

pub use admin::{Admin, AdminRole};
pub use customer::Customer;
pub use event::Event;
pub use ticket::{CheckInStatus, PaymentStatus, Ticket};

// Helper module for optional DateTime<Utc> as BSON DateTime
pub(crate) mod opt_chrono_datetime_as_bson_datetime {
    use chrono::{DateTime, Utc};
    use mongodb::bson;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => bson::DateTime::from_chrono(*d).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<bson::DateTime>::deserialize(deserializer)?;
        Ok(opt.map(|d| d.to_chrono()))
    }
}
