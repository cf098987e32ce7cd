// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caisse::commands::credits::CreditInput;
use caisse::commands::customers::PartyUpdate;
use caisse::commands::employee_credits;
use caisse::commands::employees::{self, ConsumptionInput};
use caisse::error::CaisseError;
use caisse::models::Shift;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    caisse::db::init_schema(&mut conn).unwrap();
    conn
}

fn add_employee(conn: &Connection, name: &str) {
    employees::create(conn, name, "", "", Decimal::from(1200), "").unwrap();
}

fn consumption(name: &str, year: i32, month: u32, amount: &str) -> ConsumptionInput {
    ConsumptionInput {
        employee_name: name.into(),
        year,
        month,
        amount: amount.parse().unwrap(),
        notes: String::new(),
    }
}

fn add_staff_credit(conn: &Connection, name: &str, amount: &str) -> i64 {
    employee_credits::create(
        conn,
        &CreditInput {
            party_name: name.into(),
            amount: amount.parse().unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            group: "Group B".into(),
            shift: Shift::Evening,
            notes: String::new(),
        },
    )
    .unwrap()
}

#[test]
fn negative_salary_is_rejected() {
    let conn = setup();
    let err =
        employees::create(&conn, "Zed", "", "", "-1".parse().unwrap(), "").unwrap_err();
    assert!(matches!(err, CaisseError::Validation(_)));
}

#[test]
fn consumption_requires_existing_employee() {
    let conn = setup();
    let err = employees::create_consumption(&conn, &consumption("Ghost", 2024, 3, "10"))
        .unwrap_err();
    assert!(matches!(err, CaisseError::NotFound(_)));
}

#[test]
fn second_consumption_for_same_month_is_conflict() {
    let conn = setup();
    add_employee(&conn, "Dan");
    employees::create_consumption(&conn, &consumption("Dan", 2024, 3, "10")).unwrap();

    let err = employees::create_consumption(&conn, &consumption("Dan", 2024, 3, "99"))
        .unwrap_err();
    assert!(matches!(err, CaisseError::Conflict(_)));

    // The original record is unchanged.
    let rows = employees::consumptions_for(&conn, "Dan", Some(2024), Some(3)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, Decimal::from(10));
}

#[test]
fn consumption_period_is_validated() {
    let conn = setup();
    add_employee(&conn, "Mia");
    let err = employees::create_consumption(&conn, &consumption("Mia", 2024, 13, "5"))
        .unwrap_err();
    assert!(matches!(err, CaisseError::Validation(_)));
    let err = employees::create_consumption(&conn, &consumption("Mia", 1999, 5, "5"))
        .unwrap_err();
    assert!(matches!(err, CaisseError::Validation(_)));
}

#[test]
fn rename_rewrites_consumptions_but_not_staff_credits() {
    // The legacy backend only propagated employee renames to consumption
    // records; staff credits keep the old name and surface via doctor.
    let mut conn = setup();
    add_employee(&conn, "Omar");
    employees::create_consumption(&conn, &consumption("Omar", 2024, 2, "30")).unwrap();
    add_staff_credit(&conn, "Omar", "12");

    employees::update(
        &mut conn,
        "Omar",
        &PartyUpdate {
            name: Some("Omar K".into()),
            ..Default::default()
        },
        None,
    )
    .unwrap();

    assert_eq!(
        employees::consumptions_for(&conn, "Omar K", None, None)
            .unwrap()
            .len(),
        1
    );
    assert!(employees::consumptions_for(&conn, "Omar", None, None)
        .unwrap()
        .is_empty());
    assert_eq!(
        employee_credits::credits_for(&conn, "Omar").unwrap().len(),
        1
    );
}

#[test]
fn rename_to_taken_name_is_conflict_and_mutates_nothing() {
    let mut conn = setup();
    add_employee(&conn, "Pia");
    add_employee(&conn, "Quinn");
    employees::create_consumption(&conn, &consumption("Pia", 2024, 1, "7")).unwrap();

    let err = employees::update(
        &mut conn,
        "Pia",
        &PartyUpdate {
            name: Some("Quinn".into()),
            ..Default::default()
        },
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CaisseError::Conflict(_)));
    assert_eq!(
        employees::consumptions_for(&conn, "Pia", None, None)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn delete_cascades_credits_and_consumptions() {
    let mut conn = setup();
    add_employee(&conn, "Eve");
    employees::create_consumption(&conn, &consumption("Eve", 2024, 4, "18")).unwrap();
    add_staff_credit(&conn, "Eve", "6");

    employees::delete(&mut conn, "Eve").unwrap();

    assert!(matches!(
        employees::find(&conn, "Eve").unwrap_err(),
        CaisseError::NotFound(_)
    ));
    assert!(employees::consumptions_for(&conn, "Eve", None, None)
        .unwrap()
        .is_empty());
    assert!(employee_credits::credits_for(&conn, "Eve")
        .unwrap()
        .is_empty());
}

#[test]
fn delete_missing_employee_is_not_found() {
    let mut conn = setup();
    add_employee(&conn, "Rita");
    add_staff_credit(&conn, "Rita", "4");

    let err = employees::delete(&mut conn, "Nobody").unwrap_err();
    assert!(matches!(err, CaisseError::NotFound(_)));
    assert_eq!(
        employee_credits::credits_for(&conn, "Rita").unwrap().len(),
        1
    );
}

#[test]
fn summary_filters_by_period() {
    let conn = setup();
    add_employee(&conn, "Sam");
    employees::create_consumption(&conn, &consumption("Sam", 2024, 1, "10")).unwrap();
    employees::create_consumption(&conn, &consumption("Sam", 2024, 2, "15")).unwrap();
    employees::create_consumption(&conn, &consumption("Sam", 2023, 2, "99")).unwrap();

    let all = employees::summary(&conn, None, None).unwrap();
    assert_eq!(all[0].total_consumption, Decimal::from(124));
    assert_eq!(all[0].consumption_count, 3);

    let y2024 = employees::summary(&conn, Some(2024), None).unwrap();
    assert_eq!(y2024[0].total_consumption, Decimal::from(25));

    let feb24 = employees::summary(&conn, Some(2024), Some(2)).unwrap();
    assert_eq!(feb24[0].total_consumption, Decimal::from(15));
}
