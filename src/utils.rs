// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{CaisseError, Result as CaisseResult};
use crate::models::{PaymentMethod, Settings, Shift};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", s))
}

/// Leniency policy for the raw cash counts: an absent or unparseable
/// amount counts as zero. Not a validation step; negatives pass through.
pub fn amount_or_zero(s: Option<&String>) -> Decimal {
    s.and_then(|v| v.trim().parse::<Decimal>().ok())
        .unwrap_or(Decimal::ZERO)
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    format!("{}{}", symbol, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn id_for_employee(conn: &Connection, name: &str) -> CaisseResult<i64> {
    let id: Option<i64> = conn
        .query_row("SELECT id FROM employees WHERE name=?1", params![name], |r| {
            r.get(0)
        })
        .optional()?;
    id.ok_or_else(|| CaisseError::NotFound(format!("Employee '{}' not found", name)))
}

// Column readers for TEXT-encoded domain values.

pub fn dec_col(r: &rusqlite::Row, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub fn shift_col(r: &rusqlite::Row, idx: usize) -> rusqlite::Result<Shift> {
    let s: String = r.get(idx)?;
    Shift::parse(&s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub fn method_col(r: &rusqlite::Row, idx: usize) -> rusqlite::Result<PaymentMethod> {
    let s: String = r.get(idx)?;
    PaymentMethod::parse(&s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

// Settings live as key/value rows; the singleton is materialised with its
// defaults on first read.

pub fn get_settings(conn: &Connection) -> CaisseResult<Settings> {
    let groups: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='groups'", [], |r| {
            r.get(0)
        })
        .optional()?;
    let currency: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='currency'", [], |r| {
            r.get(0)
        })
        .optional()?;

    if groups.is_none() || currency.is_none() {
        let defaults = Settings::default();
        save_settings(conn, &defaults)?;
        return Ok(defaults);
    }

    let groups = groups.unwrap_or_default();
    let parsed: Vec<String> =
        serde_json::from_str(&groups).unwrap_or_else(|_| Settings::default().groups);
    Ok(Settings {
        groups: parsed,
        currency: currency.unwrap_or_default(),
    })
}

pub fn save_settings(conn: &Connection, settings: &Settings) -> CaisseResult<()> {
    let groups = serde_json::to_string(&settings.groups)
        .map_err(|e| CaisseError::Validation(format!("Invalid group list: {}", e)))?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('groups', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![groups],
    )?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![settings.currency],
    )?;
    Ok(())
}
