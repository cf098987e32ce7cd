// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caisse::commands::credits::{self, CreditInput};
use caisse::commands::customers::{self, PartyUpdate};
use caisse::commands::payments::{self, PaymentInput};
use caisse::error::CaisseError;
use caisse::models::{PaymentMethod, Shift};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    caisse::db::init_schema(&mut conn).unwrap();
    conn
}

fn add_credit(conn: &Connection, name: &str, amount: &str, day: u32) -> i64 {
    credits::create(
        conn,
        &CreditInput {
            party_name: name.into(),
            amount: amount.parse().unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            group: "Group A".into(),
            shift: Shift::Morning,
            notes: String::new(),
        },
    )
    .unwrap()
}

fn add_payment(conn: &Connection, name: &str, amount: &str) -> i64 {
    payments::create(
        conn,
        &PaymentInput {
            customer_name: name.into(),
            amount: amount.parse().unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            method: PaymentMethod::Cash,
            notes: String::new(),
        },
    )
    .unwrap()
}

#[test]
fn name_is_trimmed_and_unique() {
    let conn = setup();
    customers::create(&conn, "  Alice  ", "", "", "").unwrap();
    assert_eq!(customers::find(&conn, "Alice").unwrap().name, "Alice");

    let err = customers::create(&conn, "Alice", "", "", "").unwrap_err();
    assert!(matches!(err, CaisseError::Conflict(_)));
}

#[test]
fn empty_name_is_rejected() {
    let conn = setup();
    let err = customers::create(&conn, "   ", "", "", "").unwrap_err();
    assert!(matches!(err, CaisseError::Validation(_)));
}

#[test]
fn rename_rewrites_credit_records() {
    let mut conn = setup();
    customers::create(&conn, "Alice", "", "", "").unwrap();
    add_credit(&conn, "Alice", "10", 1);
    add_credit(&conn, "Alice", "20", 2);

    customers::update(
        &mut conn,
        "Alice",
        &PartyUpdate {
            name: Some("Alicia".into()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(customers::find(&conn, "Alicia").unwrap().name, "Alicia");
    assert!(matches!(
        customers::find(&conn, "Alice").unwrap_err(),
        CaisseError::NotFound(_)
    ));
    let moved = credits::credits_for(&conn, "Alicia").unwrap();
    assert_eq!(moved.len(), 2);
    assert!(credits::credits_for(&conn, "Alice").unwrap().is_empty());
}

#[test]
fn rename_to_taken_name_is_conflict_and_mutates_nothing() {
    let mut conn = setup();
    customers::create(&conn, "Bob", "", "", "").unwrap();
    customers::create(&conn, "Carol", "", "", "").unwrap();
    add_credit(&conn, "Bob", "15", 3);

    let err = customers::update(
        &mut conn,
        "Bob",
        &PartyUpdate {
            name: Some("Carol".into()),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, CaisseError::Conflict(_)));

    assert_eq!(customers::find(&conn, "Bob").unwrap().name, "Bob");
    assert_eq!(credits::credits_for(&conn, "Bob").unwrap().len(), 1);
}

#[test]
fn rename_leaves_payments_under_old_name() {
    // Legacy parity: payments are not rewritten on rename; doctor reports
    // them as orphans.
    let mut conn = setup();
    customers::create(&conn, "Dora", "", "", "").unwrap();
    add_payment(&conn, "Dora", "5");

    customers::update(
        &mut conn,
        "Dora",
        &PartyUpdate {
            name: Some("Dorothea".into()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(payments::payments_for(&conn, "Dora").unwrap().len(), 1);
    assert!(payments::payments_for(&conn, "Dorothea").unwrap().is_empty());
}

#[test]
fn delete_cascades_credits_and_payments() {
    let mut conn = setup();
    customers::create(&conn, "Eve", "", "", "").unwrap();
    add_credit(&conn, "Eve", "10", 4);
    add_payment(&conn, "Eve", "3");

    customers::delete(&mut conn, "Eve").unwrap();

    assert!(matches!(
        customers::find(&conn, "Eve").unwrap_err(),
        CaisseError::NotFound(_)
    ));
    assert!(credits::credits_for(&conn, "Eve").unwrap().is_empty());
    assert!(payments::payments_for(&conn, "Eve").unwrap().is_empty());
}

#[test]
fn delete_missing_customer_is_not_found() {
    let mut conn = setup();
    customers::create(&conn, "Frank", "", "", "").unwrap();
    add_credit(&conn, "Frank", "10", 5);

    let err = customers::delete(&mut conn, "Nobody").unwrap_err();
    assert!(matches!(err, CaisseError::NotFound(_)));
    // No cascade ran.
    assert_eq!(credits::credits_for(&conn, "Frank").unwrap().len(), 1);
}

#[test]
fn summary_aggregates_full_history() {
    let conn = setup();
    customers::create(&conn, "Gina", "", "", "").unwrap();
    customers::create(&conn, "Hank", "", "", "").unwrap();
    add_credit(&conn, "Gina", "10", 1);
    add_credit(&conn, "Gina", "20", 9);
    add_payment(&conn, "Gina", "5");

    let summaries = customers::summary(&conn).unwrap();
    assert_eq!(summaries.len(), 2);

    let gina = summaries.iter().find(|s| s.name == "Gina").unwrap();
    assert_eq!(gina.summary.balance, Decimal::from(25));
    assert_eq!(gina.summary.credit_count, 2);
    assert_eq!(gina.summary.payment_count, 1);
    assert_eq!(
        gina.summary.last_credit_date,
        Some(NaiveDate::from_ymd_opt(2024, 5, 9).unwrap())
    );

    let hank = summaries.iter().find(|s| s.name == "Hank").unwrap();
    assert_eq!(hank.summary.balance, Decimal::ZERO);
    assert_eq!(hank.summary.last_credit_date, None);
}

#[test]
fn search_matches_substring() {
    let conn = setup();
    customers::create(&conn, "Amelie", "", "", "").unwrap();
    customers::create(&conn, "Emil", "", "", "").unwrap();
    customers::create(&conn, "Bela", "", "", "").unwrap();

    let hits = customers::search(&conn, "mel", 20).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Amelie");
}
