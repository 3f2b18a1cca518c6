//! `$jsonSchema` validators for the ticket management collections.
//!
//! The storage engine is the enforcement point: a write that violates the
//! required fields, field types, or enumerations below is rejected by MongoDB
//! at insert/update time, not by application code.

use mongodb::bson::{doc, Document};

/// Collection names, in the order the bootstrapper provisions them.
pub const COLLECTIONS: [&str; 4] = ["admins", "customers", "events", "tickets"];

/// Validator for the named collection, if it has one.
pub fn validator_for(collection: &str) -> Option<Document> {
    match collection {
        "admins" => Some(admins_validator()),
        "customers" => Some(customers_validator()),
        "events" => Some(events_validator()),
        "tickets" => Some(tickets_validator()),
        _ => None,
    }
}

pub fn admins_validator() -> Document {
    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": ["username", "password_hash", "role"],
            "properties": {
                "username": { "bsonType": "string", "description": "Username is required and must be a string" },
                "password_hash": { "bsonType": "string", "description": "Password hash is required and must be a string" },
                "full_name": { "bsonType": "string", "description": "Full name must be a string" },
                "email": { "bsonType": "string", "description": "Email must be a string" },
                "role": { "bsonType": "string", "enum": ["admin", "super_admin"], "description": "Role must be admin or super_admin" },
                "created_at": { "bsonType": "date", "description": "Created at must be a date" },
                "updated_at": { "bsonType": "date", "description": "Updated at must be a date" }
            }
        }
    }
}

pub fn customers_validator() -> Document {
    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": ["email", "password_hash", "full_name"],
            "properties": {
                "email": { "bsonType": "string", "description": "Email is required and must be a string" },
                "password_hash": { "bsonType": "string", "description": "Password hash is required and must be a string" },
                "full_name": { "bsonType": "string", "description": "Full name is required and must be a string" },
                "phone_number": { "bsonType": "string", "description": "Phone number must be a string" },
                "created_at": { "bsonType": "date", "description": "Created at must be a date" },
                "updated_at": { "bsonType": "date", "description": "Updated at must be a date" }
            }
        }
    }
}

pub fn events_validator() -> Document {
    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": ["event_name", "event_date", "ticket_limit"],
            "properties": {
                "event_name": { "bsonType": "string", "description": "Event name is required and must be a string" },
                "event_date": { "bsonType": "date", "description": "Event date is required and must be a date" },
                "description": { "bsonType": "string", "description": "Description must be a string" },
                "ticket_limit": { "bsonType": "int", "minimum": 1, "description": "Ticket limit is required and must be a positive integer" },
                "images": { "bsonType": "array", "items": { "bsonType": "string" }, "description": "Images must be an array of strings" },
                "created_at": { "bsonType": "date", "description": "Created at must be a date" },
                "updated_at": { "bsonType": "date", "description": "Updated at must be a date" }
            }
        }
    }
}

pub fn tickets_validator() -> Document {
    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": ["customer_id", "event_id", "qr_code_data", "payment_status", "check_in_status"],
            "properties": {
                "customer_id": { "bsonType": "objectId", "description": "Customer ID is required and must be an ObjectId" },
                "event_id": { "bsonType": "objectId", "description": "Event ID is required and must be an ObjectId" },
                "qr_code_data": { "bsonType": "string", "description": "QR code data is required and must be a string" },
                "payment_status": { "bsonType": "string", "enum": ["pending", "completed", "failed"], "description": "Payment status must be pending, completed, or failed" },
                "check_in_status": { "bsonType": "string", "enum": ["not_checked_in", "checked_in"], "description": "Check-in status must be not_checked_in or checked_in" },
                "checked_in_at": { "bsonType": "date", "description": "Checked in at must be a date" },
                "checked_in_by": { "bsonType": "objectId", "description": "Checked in by must be an ObjectId" },
                "created_at": { "bsonType": "date", "description": "Created at must be a date" },
                "updated_at": { "bsonType": "date", "description": "Updated at must be a date" }
            }
        }
    }
}
