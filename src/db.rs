// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("org.caisse", "Caisse", "caisse"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("caisse.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

/// Credit, payment, and consumption rows reference parties by name on
/// purpose, with no foreign keys: renames rewrite the name column on the
/// dependent rows (see the customer/employee edit paths) and deletes
/// cascade in application code.
pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS entries(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        till_group TEXT NOT NULL,
        shift TEXT NOT NULL CHECK(shift IN ('7am to 2pm','2pm to 10pm')),
        billet TEXT NOT NULL DEFAULT '0',
        money TEXT NOT NULL DEFAULT '0',
        font_caisse TEXT NOT NULL DEFAULT '0',
        total_credit TEXT NOT NULL DEFAULT '0',
        total_achat TEXT NOT NULL DEFAULT '0',
        total_journal TEXT NOT NULL DEFAULT '0',
        notes TEXT NOT NULL DEFAULT '',
        total_calculated TEXT NOT NULL DEFAULT '0',
        total_calculated_formula TEXT NOT NULL DEFAULT '0',
        difference TEXT NOT NULL DEFAULT '0',
        daily_revenue TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date);
    CREATE INDEX IF NOT EXISTS idx_entries_till ON entries(till_group, shift, date);

    CREATE TABLE IF NOT EXISTS customers(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        phone TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL DEFAULT '',
        notes TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS employees(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        phone TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL DEFAULT '',
        monthly_salary TEXT NOT NULL DEFAULT '0',
        notes TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS customer_credits(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_name TEXT NOT NULL,
        amount TEXT NOT NULL DEFAULT '0',
        date TEXT NOT NULL,
        till_group TEXT NOT NULL,
        shift TEXT NOT NULL CHECK(shift IN ('7am to 2pm','2pm to 10pm')),
        notes TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_customer_credits_name ON customer_credits(customer_name);
    CREATE INDEX IF NOT EXISTS idx_customer_credits_date ON customer_credits(date);

    CREATE TABLE IF NOT EXISTS employee_credits(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_name TEXT NOT NULL,
        amount TEXT NOT NULL DEFAULT '0',
        date TEXT NOT NULL,
        till_group TEXT NOT NULL,
        shift TEXT NOT NULL CHECK(shift IN ('7am to 2pm','2pm to 10pm')),
        notes TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_employee_credits_name ON employee_credits(employee_name, date);

    CREATE TABLE IF NOT EXISTS payments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_name TEXT NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        method TEXT NOT NULL DEFAULT 'cash' CHECK(method IN ('cash','card','transfer','other')),
        notes TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_payments_name ON payments(customer_name);
    CREATE INDEX IF NOT EXISTS idx_payments_date ON payments(date);

    CREATE TABLE IF NOT EXISTS consumptions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_name TEXT NOT NULL,
        year INTEGER NOT NULL,
        month INTEGER NOT NULL,
        amount TEXT NOT NULL DEFAULT '0',
        notes TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(employee_name, year, month)
    );
    CREATE INDEX IF NOT EXISTS idx_consumptions_period ON consumptions(year, month);
    "#,
    )?;
    Ok(())
}
