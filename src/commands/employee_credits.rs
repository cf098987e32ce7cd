// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::credits::{
    credit_from_row, credit_rows, entry_key_from_args, input_from_args, validate_credit,
    CreditInput,
};
use crate::error::{CaisseError, Result as CaisseResult};
use crate::models::{Credit, Shift};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

const COLS: &str = "id, employee_name, amount, date, till_group, shift, notes";

pub fn create(conn: &Connection, input: &CreditInput) -> CaisseResult<i64> {
    validate_credit(input)?;
    conn.execute(
        "INSERT INTO employee_credits(employee_name, amount, date, till_group, shift, notes) \
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
        "UPDATE employee_credits SET employee_name=?1, amount=?2, date=?3, till_group=?4, \
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
        return Err(CaisseError::NotFound(format!(
            "Employee credit {} not found",
            id
        )));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> CaisseResult<Credit> {
    conn.query_row(
        &format!("SELECT {} FROM employee_credits WHERE id=?1", COLS),
        params![id],
        credit_from_row,
    )
    .optional()?
    .ok_or_else(|| CaisseError::NotFound(format!("Employee credit {} not found", id)))
}

pub fn delete(conn: &Connection, id: i64) -> CaisseResult<()> {
    let n = conn.execute("DELETE FROM employee_credits WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(CaisseError::NotFound(format!(
            "Employee credit {} not found",
            id
        )));
    }
    Ok(())
}

pub fn clear(conn: &Connection) -> CaisseResult<usize> {
    Ok(conn.execute("DELETE FROM employee_credits", [])?)
}

pub fn credits_for(conn: &Connection, employee: &str) -> CaisseResult<Vec<Credit>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM employee_credits WHERE employee_name=?1 ORDER BY date DESC, id DESC",
        COLS
    ))?;
    let rows = stmt.query_map(params![employee], credit_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn list(
    conn: &Connection,
    employee: Option<&str>,
    entry_key: Option<(NaiveDate, &str, Shift)>,
    limit: Option<usize>,
) -> CaisseResult<Vec<Credit>> {
    let mut sql = format!("SELECT {} FROM employee_credits WHERE 1=1", COLS);
    let mut args: Vec<String> = Vec::new();
    if let Some(name) = employee {
        sql.push_str(" AND employee_name=?");
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

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = input_from_args(sub)?;
            let id = create(conn, &input)?;
            println!(
                "Recorded staff credit {} of {} for '{}'",
                id, input.amount, input.party_name
            );
        }
        Some(("list", sub)) => {
            let entry_key = entry_key_from_args(sub)?;
            let data = list(
                conn,
                sub.get_one::<String>("employee").map(|s| s.as_str()),
                entry_key.as_ref().map(|(d, g, s)| (*d, g.as_str(), *s)),
                sub.get_one::<usize>("limit").copied(),
            )?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Employee", "Amount", "Date", "Group", "Shift", "Notes"],
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
            println!("Updated staff credit {}", id);
        }
        Some(("rm", sub)) => {
            let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
            delete(conn, id)?;
            println!("Removed staff credit {}", id);
        }
        Some(("clear", _)) => {
            let n = clear(conn)?;
            println!("Removed {} staff credits", n);
        }
        _ => {}
    }
    Ok(())
}
