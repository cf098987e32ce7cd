// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, RawCounts};
use crate::utils::{dec_col, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = report(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Integrity report for the by-name reference graph and the derived ledger
/// figures. Orphans are expected after a rename raced a write, or where the
/// legacy data predates rename propagation. One (issue, detail) pair per
/// finding.
pub fn report(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    orphans(
        conn,
        "SELECT DISTINCT customer_name FROM customer_credits \
         EXCEPT SELECT name FROM customers",
        "credit_without_customer",
        &mut rows,
    )?;
    orphans(
        conn,
        "SELECT DISTINCT customer_name FROM payments EXCEPT SELECT name FROM customers",
        "payment_without_customer",
        &mut rows,
    )?;
    orphans(
        conn,
        "SELECT DISTINCT employee_name FROM employee_credits \
         EXCEPT SELECT name FROM employees",
        "staff_credit_without_employee",
        &mut rows,
    )?;
    orphans(
        conn,
        "SELECT DISTINCT employee_name FROM consumptions EXCEPT SELECT name FROM employees",
        "consumption_without_employee",
        &mut rows,
    )?;

    stale_derived(conn, &mut rows)?;
    Ok(rows)
}

fn orphans(
    conn: &Connection,
    sql: &str,
    issue: &str,
    rows: &mut Vec<Vec<String>>,
) -> Result<()> {
    let mut stmt = conn.prepare(sql)?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let name: String = r.get(0)?;
        rows.push(vec![issue.into(), name]);
    }
    Ok(())
}

/// Entries whose stored derived columns disagree with recomputation from
/// the raw counts. Should never happen through this tool; catches rows
/// written by older software or by hand.
fn stale_derived(conn: &Connection, rows: &mut Vec<Vec<String>>) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT id, billet, money, font_caisse, total_credit, total_achat, total_journal, \
         total_calculated, total_calculated_formula, difference, daily_revenue FROM entries",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let raw = RawCounts {
            billet: dec_col(r, 1)?,
            money: dec_col(r, 2)?,
            font_caisse: dec_col(r, 3)?,
            total_credit: dec_col(r, 4)?,
            total_achat: dec_col(r, 5)?,
            total_journal: dec_col(r, 6)?,
        };
        let expect = ledger::compute(&raw);
        let stored_calculated = dec_col(r, 7)?;
        let stored_formula = dec_col(r, 8)?;
        let stored_difference = dec_col(r, 9)?;
        let stored_revenue = dec_col(r, 10)?;
        if stored_calculated != expect.total_calculated
            || stored_formula != expect.total_calculated_formula
            || stored_difference != expect.difference
            || stored_revenue != expect.daily_revenue
        {
            rows.push(vec!["stale_derived_fields".into(), format!("entry {}", id)]);
        }
    }
    Ok(())
}
