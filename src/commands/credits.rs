// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{CaisseError, Result as CaisseResult};
use crate::models::{Credit, Shift};
use crate::utils::{dec_col, maybe_print_json, parse_date, parse_decimal, pretty_table, shift_col};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct CreditInput {
    pub party_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub group: String,
    pub shift: Shift,
    pub notes: String,
}

/// Shared between customer and employee credits; both tables carry the same
/// column order after the name column.
pub(crate) fn credit_from_row(r: &rusqlite::Row) -> rusqlite::Result<Credit> {
    Ok(Credit {
        id: r.get(0)?,
        party_name: r.get(1)?,
        amount: dec_col(r, 2)?,
        date: r.get(3)?,
        group: r.get(4)?,
        shift: shift_col(r, 5)?,
        notes: r.get(6)?,
    })
}

pub(crate) fn validate_credit(input: &CreditInput) -> CaisseResult<()> {
    if input.party_name.trim().is_empty() {
        return Err(CaisseError::Validation("Party name is required".into()));
    }
    if input.amount < Decimal::ZERO {
        return Err(CaisseError::Validation(
            "Credit amount must not be negative".into(),
        ));
    }
    Ok(())
}

const COLS: &str = "id, customer_name, amount, date, till_group, shift, notes";

pub fn create(conn: &Connection, input: &CreditInput) -> CaisseResult<i64> {
    validate_credit(input)?;
    conn.execute(
        "INSERT INTO customer_credits(customer_name, amount, date, till_group, shift, notes) \
         VALUES (?1,?2,?3,?4,?5,?6)",
        params![
            input.party_name.trim(),
            input.amount.to_string(),
            input.date,
            input.group,
            input.shift.as_str(),
            input.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, input: &CreditInput) -> CaisseResult<()> {
    validate_credit(input)?;
    let n = conn.execute(
        "UPDATE customer_credits SET customer_name=?1, amount=?2, date=?3, till_group=?4, \
         shift=?5, notes=?6 WHERE id=?7",
        params![
            input.party_name.trim(),
            input.amount.to_string(),
            input.date,
            input.group,
            input.shift.as_str(),
            input.notes,
            id,
        ],
    )?;
    if n == 0 {
        return Err(CaisseError::NotFound(format!("Credit {} not found", id)));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> CaisseResult<Credit> {
    conn.query_row(
        &format!("SELECT {} FROM customer_credits WHERE id=?1", COLS),
        params![id],
        credit_from_row,
    )
    .optional()?
    .ok_or_else(|| CaisseError::NotFound(format!("Credit {} not found", id)))
}

pub fn delete(conn: &Connection, id: i64) -> CaisseResult<()> {
    let n = conn.execute("DELETE FROM customer_credits WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(CaisseError::NotFound(format!("Credit {} not found", id)));
    }
    Ok(())
}

pub fn clear(conn: &Connection) -> CaisseResult<usize> {
    Ok(conn.execute("DELETE FROM customer_credits", [])?)
}

/// Every credit row for one customer, the full set the balance aggregation
/// runs over.
pub fn credits_for(conn: &Connection, customer: &str) -> CaisseResult<Vec<Credit>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM customer_credits WHERE customer_name=?1 ORDER BY date DESC, id DESC",
        COLS
    ))?;
    let rows = stmt.query_map(params![customer], credit_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn list(
    conn: &Connection,
    customer: Option<&str>,
    entry_key: Option<(NaiveDate, &str, Shift)>,
    limit: Option<usize>,
) -> CaisseResult<Vec<Credit>> {
    let mut sql = format!("SELECT {} FROM customer_credits WHERE 1=1", COLS);
    let mut args: Vec<String> = Vec::new();
    if let Some(name) = customer {
        sql.push_str(" AND customer_name=?");
        args.push(name.to_string());
    }
    if let Some((date, group, shift)) = entry_key {
        sql.push_str(" AND date=? AND till_group=? AND shift=?");
        args.push(date.to_string());
        args.push(group.to_string());
        args.push(shift.as_str().to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(n) = limit {
        sql.push_str(" LIMIT ?");
        args.push(n.to_string());
    }
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), credit_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub(crate) fn input_from_args(sub: &clap::ArgMatches) -> Result<CreditInput> {
    Ok(CreditInput {
        party_name: sub.get_one::<String>("name").unwrap().clone(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        group: sub.get_one::<String>("group").unwrap().clone(),
        shift: Shift::parse(sub.get_one::<String>("shift").unwrap())?,
        notes: sub
            .get_one::<String>("notes")
            .cloned()
            .unwrap_or_default(),
    })
}

pub(crate) fn entry_key_from_args(
    sub: &clap::ArgMatches,
) -> Result<Option<(NaiveDate, String, Shift)>> {
    let date = sub.get_one::<String>("entry-date");
    let group = sub.get_one::<String>("entry-group");
    let shift = sub.get_one::<String>("entry-shift");
    match (date, group, shift) {
        (Some(d), Some(g), Some(s)) => Ok(Some((parse_date(d)?, g.clone(), Shift::parse(s)?))),
        (None, None, None) => Ok(None),
        _ => Err(CaisseError::Validation(
            "Filtering by entry needs --entry-date, --entry-group, and --entry-shift together"
                .into(),
        )
        .into()),
    }
}

pub(crate) fn credit_rows(data: &[Credit]) -> Vec<Vec<String>> {
    data.iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.party_name.clone(),
                c.amount.to_string(),
                c.date.to_string(),
                c.group.clone(),
                c.shift.as_str().to_string(),
                c.notes.clone(),
            ]
        })
        .collect()
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = input_from_args(sub)?;
            let id = create(conn, &input)?;
            println!(
                "Recorded credit {} of {} for '{}'",
                id, input.amount, input.party_name
            );
        }
        Some(("list", sub)) => {
            let entry_key = entry_key_from_args(sub)?;
            let data = list(
                conn,
                sub.get_one::<String>("customer").map(|s| s.as_str()),
                entry_key.as_ref().map(|(d, g, s)| (*d, g.as_str(), *s)),
                sub.get_one::<usize>("limit").copied(),
            )?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Customer", "Amount", "Date", "Group", "Shift", "Notes"],
                        credit_rows(&data),
                    )
                );
            }
        }
        Some(("show", sub)) => {
            let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
            println!("{}", serde_json::to_string_pretty(&get(conn, id)?)?);
        }
        Some(("edit", sub)) => {
            let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
            let current = get(conn, id)?;
            let merged = CreditInput {
                party_name: sub
                    .get_one::<String>("name")
                    .cloned()
                    .unwrap_or(current.party_name),
                amount: match sub.get_one::<String>("amount") {
                    Some(a) => parse_decimal(a)?,
                    None => current.amount,
                },
                date: match sub.get_one::<String>("date") {
                    Some(d) => parse_date(d)?,
                    None => current.date,
                },
                group: sub
                    .get_one::<String>("group")
                    .cloned()
                    .unwrap_or(current.group),
                shift: match sub.get_one::<String>("shift") {
                    Some(s) => Shift::parse(s)?,
                    None => current.shift,
                },
                notes: sub
                    .get_one::<String>("notes")
                    .cloned()
                    .unwrap_or(current.notes),
            };
            update(conn, id, &merged)?;
            println!("Updated credit {}", id);
        }
        Some(("rm", sub)) => {
            let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
            delete(conn, id)?;
            println!("Removed credit {}", id);
        }
        Some(("clear", _)) => {
            let n = clear(conn)?;
            println!("Removed {} credits", n);
        }
        _ => {}
    }
    Ok(())
}
