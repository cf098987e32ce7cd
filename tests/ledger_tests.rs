// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caisse::commands::entries::{self, EntryInput};
use caisse::ledger::{compute, RawCounts};
use caisse::models::Shift;
use caisse::utils::amount_or_zero;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    caisse::db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn derived_identities_hold() {
    let raw = RawCounts {
        billet: dec("100"),
        money: dec("50"),
        font_caisse: dec("30"),
        total_credit: dec("20"),
        total_achat: dec("10"),
        total_journal: dec("125"),
    };
    let d = compute(&raw);
    assert_eq!(d.total_calculated, dec("150"));
    assert_eq!(d.total_calculated_formula, dec("150"));
    assert_eq!(d.difference, d.total_calculated_formula - raw.total_journal);
    assert_eq!(d.daily_revenue, raw.total_journal - raw.total_achat);
    assert_eq!(d.difference, dec("25"));
    assert_eq!(d.daily_revenue, dec("115"));
}

#[test]
fn absent_counts_behave_as_zero() {
    let raw = RawCounts {
        billet: dec("5"),
        ..RawCounts::default()
    };
    let d = compute(&raw);
    assert_eq!(d.total_calculated, dec("5"));
    assert_eq!(d.total_calculated_formula, dec("5"));
    assert_eq!(d.difference, dec("5"));
    assert_eq!(d.daily_revenue, Decimal::ZERO);
}

#[test]
fn negative_counts_pass_through() {
    let raw = RawCounts {
        billet: dec("-10"),
        total_journal: dec("-5"),
        ..RawCounts::default()
    };
    let d = compute(&raw);
    assert_eq!(d.total_calculated, dec("-10"));
    assert_eq!(d.difference, dec("-5"));
    assert_eq!(d.daily_revenue, dec("-5"));
}

#[test]
fn unparseable_cli_amounts_coerce_to_zero() {
    assert_eq!(amount_or_zero(None), Decimal::ZERO);
    assert_eq!(amount_or_zero(Some(&"abc".to_string())), Decimal::ZERO);
    assert_eq!(amount_or_zero(Some(&" 7.50 ".to_string())), dec("7.50"));
}

#[test]
fn create_stores_recomputed_derived_fields() {
    let conn = setup();
    let id = entries::create(
        &conn,
        &EntryInput {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            group: "Group A".into(),
            shift: Shift::Morning,
            raw: RawCounts {
                billet: dec("200"),
                money: dec("35.50"),
                font_caisse: dec("50"),
                total_credit: dec("12"),
                total_achat: dec("8"),
                total_journal: dec("210"),
            },
            notes: String::new(),
        },
    )
    .unwrap();

    let e = entries::get(&conn, id).unwrap();
    assert_eq!(e.total_calculated, dec("235.50"));
    assert_eq!(e.total_calculated_formula, dec("205.50"));
    assert_eq!(e.difference, dec("-4.50"));
    assert_eq!(e.daily_revenue, dec("202"));
}

#[test]
fn update_discards_tampered_derived_fields() {
    let conn = setup();
    let input = EntryInput {
        date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        group: "Group A".into(),
        shift: Shift::Evening,
        raw: RawCounts {
            billet: dec("80"),
            money: dec("20"),
            ..RawCounts::default()
        },
        notes: String::new(),
    };
    let id = entries::create(&conn, &input).unwrap();

    // Hand-written figures in the database get replaced on the next write.
    conn.execute(
        "UPDATE entries SET total_calculated='9999', difference='9999' WHERE id=?1",
        [id],
    )
    .unwrap();
    entries::update(&conn, id, &input).unwrap();

    let e = entries::get(&conn, id).unwrap();
    assert_eq!(e.total_calculated, dec("100"));
    assert_eq!(e.difference, dec("100"));
}

#[test]
fn list_filters_and_limit() {
    let conn = setup();
    for (day, group) in [(1, "Group A"), (2, "Group A"), (3, "Group B")] {
        entries::create(
            &conn,
            &EntryInput {
                date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
                group: group.into(),
                shift: Shift::Morning,
                raw: RawCounts::default(),
                notes: String::new(),
            },
        )
        .unwrap();
    }

    let all = entries::list(&conn, Some("2024-04"), None, None, None).unwrap();
    assert_eq!(all.len(), 3);
    // Newest first.
    assert_eq!(all[0].date, NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());

    let group_a = entries::list(&conn, None, Some("Group A"), None, None).unwrap();
    assert_eq!(group_a.len(), 2);

    let limited = entries::list(&conn, None, None, None, Some(1)).unwrap();
    assert_eq!(limited.len(), 1);
}

#[test]
fn delete_missing_entry_is_not_found() {
    let conn = setup();
    let err = entries::delete(&conn, 42).unwrap_err();
    assert!(matches!(err, caisse::error::CaisseError::NotFound(_)));
}
