// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Credit, Payment};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Aggregate position of one party over its full credit and payment
/// history. No date filtering: callers fetch every record for the party
/// before summarising.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceSummary {
    pub total_credits: Decimal,
    pub total_payments: Decimal,
    pub balance: Decimal,
    pub credit_count: usize,
    pub payment_count: usize,
    pub last_credit_date: Option<NaiveDate>,
}

/// Sums credits and payments into an outstanding balance. A party with no
/// records at all yields zeros and no last credit date.
pub fn summarize(credits: &[Credit], payments: &[Payment]) -> BalanceSummary {
    let total_credits: Decimal = credits.iter().map(|c| c.amount).sum();
    let total_payments: Decimal = payments.iter().map(|p| p.amount).sum();
    BalanceSummary {
        total_credits,
        total_payments,
        balance: total_credits - total_payments,
        credit_count: credits.len(),
        payment_count: payments.len(),
        last_credit_date: credits.iter().map(|c| c.date).max(),
    }
}
