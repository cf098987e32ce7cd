// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caisse::balance::summarize;
use caisse::models::{Credit, Payment, PaymentMethod, Shift};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn credit(amount: &str, date: (i32, u32, u32)) -> Credit {
    Credit {
        id: 0,
        party_name: "Alice".into(),
        amount: amount.parse().unwrap(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        group: "Group A".into(),
        shift: Shift::Morning,
        notes: String::new(),
    }
}

fn payment(amount: &str, date: (i32, u32, u32)) -> Payment {
    Payment {
        id: 0,
        customer_name: "Alice".into(),
        amount: amount.parse().unwrap(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        method: PaymentMethod::Cash,
        notes: String::new(),
    }
}

#[test]
fn no_records_yields_zeroes() {
    let s = summarize(&[], &[]);
    assert_eq!(s.total_credits, Decimal::ZERO);
    assert_eq!(s.total_payments, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
    assert_eq!(s.credit_count, 0);
    assert_eq!(s.payment_count, 0);
    assert_eq!(s.last_credit_date, None);
}

#[test]
fn balance_is_credits_minus_payments() {
    let credits = vec![credit("10", (2024, 1, 5)), credit("20", (2024, 2, 1))];
    let payments = vec![payment("5", (2024, 2, 10))];
    let s = summarize(&credits, &payments);
    assert_eq!(s.total_credits, Decimal::from(30));
    assert_eq!(s.total_payments, Decimal::from(5));
    assert_eq!(s.balance, Decimal::from(25));
    assert_eq!(s.credit_count, 2);
    assert_eq!(s.payment_count, 1);
}

#[test]
fn last_credit_date_is_max_regardless_of_order() {
    let credits = vec![
        credit("1", (2024, 6, 1)),
        credit("1", (2023, 12, 31)),
        credit("1", (2024, 5, 30)),
    ];
    let s = summarize(&credits, &[]);
    assert_eq!(
        s.last_credit_date,
        Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    );
}

#[test]
fn payments_alone_go_negative() {
    let s = summarize(&[], &[payment("12.50", (2024, 3, 3))]);
    assert_eq!(s.balance, "-12.50".parse::<Decimal>().unwrap());
    assert_eq!(s.last_credit_date, None);
}
