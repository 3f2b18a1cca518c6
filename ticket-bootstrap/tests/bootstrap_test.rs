mod common;

use chrono::Utc;
use common::{seed_admin_config, write_error_code, TestDb, TEST_ADMIN_PASSWORD};
use mongodb::bson::{doc, oid::ObjectId, Document};
use ticket_bootstrap::models::{Admin, AdminRole, Customer, Event, Ticket};
use ticket_bootstrap::schema;
use ticket_core::utils::{verify_password, Password, PasswordHashString};

const DOCUMENT_VALIDATION_FAILURE: i32 = 121;
const DUPLICATE_KEY: i32 = 11000;

fn sample_customer(email: &str) -> Customer {
    Customer::new(
        email.to_string(),
        "$argon2id$test-hash".to_string(),
        "Jamie Attendee".to_string(),
    )
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn bootstrap_creates_all_collections() {
    let test_db = TestDb::spawn().await;

    let collections = test_db
        .db
        .database()
        .list_collection_names(None)
        .await
        .expect("Failed to list collections");

    for name in schema::COLLECTIONS {
        assert!(
            collections.iter().any(|c| c == name),
            "missing collection {}",
            name
        );
    }
    assert_eq!(test_db.report.collections_created, 4);
    assert!(test_db.report.admin_seeded);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn seeded_admin_is_a_super_admin_with_verifiable_hash() {
    let test_db = TestDb::spawn().await;

    let admin = test_db
        .db
        .admins()
        .find_one(doc! { "username": "admin" }, None)
        .await
        .expect("Failed to query admins")
        .expect("Seed admin missing");

    assert_eq!(admin.role, AdminRole::SuperAdmin);
    assert_eq!(admin.full_name.as_deref(), Some("Test Administrator"));

    // The stored hash must verify against the configured password
    let hash = PasswordHashString::new(admin.password_hash);
    let password = Password::new(TEST_ADMIN_PASSWORD.to_string());
    assert!(verify_password(&password, &hash).is_ok());

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn missing_required_fields_are_rejected() {
    let test_db = TestDb::spawn().await;
    let db = test_db.db.database();

    // One incomplete document per collection, each missing a required field
    let cases: [(&str, Document); 4] = [
        ("admins", doc! { "username": "no-role", "password_hash": "x" }),
        ("customers", doc! { "email": "a@b.test", "password_hash": "x" }),
        ("events", doc! { "event_name": "No date", "ticket_limit": 10 }),
        (
            "tickets",
            doc! {
                "customer_id": ObjectId::new(),
                "event_id": ObjectId::new(),
                "qr_code_data": "qr-x",
                "payment_status": "pending",
                // check_in_status missing
            },
        ),
    ];

    for (collection, document) in cases {
        let err = db
            .collection::<Document>(collection)
            .insert_one(document, None)
            .await
            .expect_err(&format!("{} accepted an incomplete document", collection));
        assert_eq!(write_error_code(&err), Some(DOCUMENT_VALIDATION_FAILURE));
    }

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn wrong_typed_fields_are_rejected() {
    let test_db = TestDb::spawn().await;
    let db = test_db.db.database();

    let cases: [(&str, Document); 4] = [
        (
            "admins",
            doc! { "username": "typed", "password_hash": "x", "role": "owner" },
        ),
        (
            "customers",
            doc! { "email": 42, "password_hash": "x", "full_name": "N" },
        ),
        (
            "events",
            doc! { "event_name": "E", "event_date": Utc::now().to_rfc3339(), "ticket_limit": 10 },
        ),
        (
            "tickets",
            doc! {
                "customer_id": "not-an-object-id",
                "event_id": ObjectId::new(),
                "qr_code_data": "qr-y",
                "payment_status": "pending",
                "check_in_status": "not_checked_in",
            },
        ),
    ];

    for (collection, document) in cases {
        let err = db
            .collection::<Document>(collection)
            .insert_one(document, None)
            .await
            .expect_err(&format!("{} accepted a mistyped document", collection));
        assert_eq!(write_error_code(&err), Some(DOCUMENT_VALIDATION_FAILURE));
    }

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn duplicate_admin_username_is_rejected() {
    let test_db = TestDb::spawn().await;

    let first = Admin::new("ops".to_string(), "hash-1".to_string(), AdminRole::Admin);
    test_db
        .db
        .admins()
        .insert_one(&first, None)
        .await
        .expect("First admin insert failed");

    let second = Admin::new("ops".to_string(), "hash-2".to_string(), AdminRole::Admin);
    let err = test_db
        .db
        .admins()
        .insert_one(&second, None)
        .await
        .expect_err("Duplicate username accepted");
    assert_eq!(write_error_code(&err), Some(DUPLICATE_KEY));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn duplicate_qr_code_is_rejected() {
    let test_db = TestDb::spawn().await;

    let first = Ticket::new(ObjectId::new(), ObjectId::new(), "qr-shared".to_string());
    test_db
        .db
        .tickets()
        .insert_one(&first, None)
        .await
        .expect("First ticket insert failed");

    let second = Ticket::new(ObjectId::new(), ObjectId::new(), "qr-shared".to_string());
    let err = test_db
        .db
        .tickets()
        .insert_one(&second, None)
        .await
        .expect_err("Duplicate qr_code_data accepted");
    assert_eq!(write_error_code(&err), Some(DUPLICATE_KEY));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn duplicate_customer_event_pair_is_rejected() {
    let test_db = TestDb::spawn().await;

    let customer_id = ObjectId::new();
    let event_id = ObjectId::new();

    let first = Ticket::new(customer_id, event_id, "qr-a".to_string());
    test_db
        .db
        .tickets()
        .insert_one(&first, None)
        .await
        .expect("First ticket insert failed");

    // Different QR code, same (customer, event) pair
    let second = Ticket::new(customer_id, event_id, "qr-b".to_string());
    let err = test_db
        .db
        .tickets()
        .insert_one(&second, None)
        .await
        .expect_err("Duplicate (customer_id, event_id) accepted");
    assert_eq!(write_error_code(&err), Some(DUPLICATE_KEY));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn nonpositive_ticket_limit_is_rejected() {
    let test_db = TestDb::spawn().await;

    for limit in [0, -5] {
        let event = Event::new("Sold out before it starts".to_string(), Utc::now(), limit);
        let err = test_db
            .db
            .events()
            .insert_one(&event, None)
            .await
            .expect_err("Event with nonpositive ticket_limit accepted");
        assert_eq!(write_error_code(&err), Some(DOCUMENT_VALIDATION_FAILURE));
    }

    let event = Event::new("Opening night".to_string(), Utc::now(), 1);
    test_db
        .db
        .events()
        .insert_one(&event, None)
        .await
        .expect("Minimum ticket_limit of 1 rejected");

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn customer_email_uniqueness_is_enforced() {
    let test_db = TestDb::spawn().await;

    test_db
        .db
        .customers()
        .insert_one(&sample_customer("dup@example.test"), None)
        .await
        .expect("First customer insert failed");

    let err = test_db
        .db
        .customers()
        .insert_one(&sample_customer("dup@example.test"), None)
        .await
        .expect_err("Duplicate customer email accepted");
    assert_eq!(write_error_code(&err), Some(DUPLICATE_KEY));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn bootstrapping_twice_is_idempotent() {
    let test_db = TestDb::spawn().await;

    // Second run against the already-initialized database must succeed
    let report = test_db
        .db
        .initialize(&seed_admin_config())
        .await
        .expect("Second bootstrap run failed");

    assert_eq!(report.collections_created, 0);
    assert!(!report.admin_seeded);

    // Still exactly one seed admin
    let admins = test_db
        .db
        .admins()
        .count_documents(doc! { "username": "admin" }, None)
        .await
        .expect("Failed to count admins");
    assert_eq!(admins, 1);

    test_db.cleanup().await;
}
