// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caisse::balance::summarize;
use caisse::commands::credits::{self, CreditInput};
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

fn payment(amount: &str) -> PaymentInput {
    PaymentInput {
        customer_name: "Alice".into(),
        amount: amount.parse().unwrap(),
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        method: PaymentMethod::Card,
        notes: String::new(),
    }
}

#[test]
fn non_positive_amounts_are_rejected() {
    let conn = setup();
    let err = payments::create(&conn, &payment("0")).unwrap_err();
    assert!(matches!(err, CaisseError::Validation(_)));
    let err = payments::create(&conn, &payment("-5")).unwrap_err();
    assert!(matches!(err, CaisseError::Validation(_)));
}

#[test]
fn update_enforces_positivity_too() {
    let conn = setup();
    let id = payments::create(&conn, &payment("10")).unwrap();
    let err = payments::update(&conn, id, &payment("0")).unwrap_err();
    assert!(matches!(err, CaisseError::Validation(_)));
    assert_eq!(payments::get(&conn, id).unwrap().amount, Decimal::from(10));
}

#[test]
fn update_missing_payment_is_not_found() {
    let conn = setup();
    let err = payments::update(&conn, 7, &payment("10")).unwrap_err();
    assert!(matches!(err, CaisseError::NotFound(_)));
}

#[test]
fn balance_over_fetched_records() {
    let conn = setup();
    for (amount, day) in [("10", 1), ("20", 2)] {
        credits::create(
            &conn,
            &CreditInput {
                party_name: "Alice".into(),
                amount: amount.parse().unwrap(),
                date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                group: "Group A".into(),
                shift: Shift::Morning,
                notes: String::new(),
            },
        )
        .unwrap();
    }
    payments::create(&conn, &payment("5")).unwrap();

    let credits = credits::credits_for(&conn, "Alice").unwrap();
    let pays = payments::payments_for(&conn, "Alice").unwrap();
    let s = summarize(&credits, &pays);
    assert_eq!(s.total_credits, Decimal::from(30));
    assert_eq!(s.total_payments, Decimal::from(5));
    assert_eq!(s.balance, Decimal::from(25));
}

#[test]
fn list_filters_by_customer() {
    let conn = setup();
    payments::create(&conn, &payment("10")).unwrap();
    let mut other = payment("7");
    other.customer_name = "Bob".into();
    payments::create(&conn, &other).unwrap();

    assert_eq!(payments::list(&conn, Some("Alice"), None).unwrap().len(), 1);
    assert_eq!(payments::list(&conn, None, None).unwrap().len(), 2);
}
