// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::CaisseError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two till shifts a day is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shift {
    #[serde(rename = "7am to 2pm")]
    Morning,
    #[serde(rename = "2pm to 10pm")]
    Evening,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "7am to 2pm",
            Shift::Evening => "2pm to 10pm",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CaisseError> {
        match s.trim() {
            "7am to 2pm" | "morning" => Ok(Shift::Morning),
            "2pm to 10pm" | "evening" => Ok(Shift::Evening),
            other => Err(CaisseError::Validation(format!(
                "Invalid shift '{}', expected '7am to 2pm' or '2pm to 10pm'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CaisseError> {
        match s.trim() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "transfer" => Ok(PaymentMethod::Transfer),
            "other" => Ok(PaymentMethod::Other),
            other => Err(CaisseError::Validation(format!(
                "Invalid payment method '{}', expected cash|card|transfer|other",
                other
            ))),
        }
    }
}

/// One shift's cash reconciliation. The last four fields are derived and
/// recomputed on every write (see `ledger::compute`); they are never taken
/// from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub date: NaiveDate,
    pub group: String,
    pub shift: Shift,
    pub billet: Decimal,
    pub money: Decimal,
    pub font_caisse: Decimal,
    pub total_credit: Decimal,
    pub total_achat: Decimal,
    pub total_journal: Decimal,
    pub notes: String,
    pub total_calculated: Decimal,
    pub total_calculated_formula: Decimal,
    pub difference: Decimal,
    pub daily_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub monthly_salary: Decimal,
    pub notes: String,
}

/// A charge against a party's running balance. `party_name` is a weak
/// by-name reference; nothing in the schema enforces that the party exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credit {
    pub id: i64,
    pub party_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub group: String,
    pub shift: Shift,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub customer_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub notes: String,
}

/// One employee's in-kind usage for a calendar month. At most one row per
/// (employee_name, year, month).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consumption {
    pub id: i64,
    pub employee_name: String,
    pub year: i32,
    pub month: u32,
    pub amount: Decimal,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub groups: Vec<String>,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            groups: vec!["Group A".to_string(), "Group B".to_string()],
            currency: "€".to_string(),
        }
    }
}
