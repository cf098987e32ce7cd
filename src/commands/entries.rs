// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{CaisseError, Result as CaisseResult};
use crate::ledger::{self, RawCounts};
use crate::models::{Entry, Shift};
use crate::utils::{
    amount_or_zero, dec_col, maybe_print_json, parse_date, pretty_table, shift_col,
};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

const COLS: &str = "id, date, till_group, shift, billet, money, font_caisse, total_credit, \
                    total_achat, total_journal, notes, total_calculated, \
                    total_calculated_formula, difference, daily_revenue";

#[derive(Debug, Clone)]
pub struct EntryInput {
    pub date: NaiveDate,
    pub group: String,
    pub shift: Shift,
    pub raw: RawCounts,
    pub notes: String,
}

fn entry_from_row(r: &rusqlite::Row) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: r.get(0)?,
        date: r.get(1)?,
        group: r.get(2)?,
        shift: shift_col(r, 3)?,
        billet: dec_col(r, 4)?,
        money: dec_col(r, 5)?,
        font_caisse: dec_col(r, 6)?,
        total_credit: dec_col(r, 7)?,
        total_achat: dec_col(r, 8)?,
        total_journal: dec_col(r, 9)?,
        notes: r.get(10)?,
        total_calculated: dec_col(r, 11)?,
        total_calculated_formula: dec_col(r, 12)?,
        difference: dec_col(r, 13)?,
        daily_revenue: dec_col(r, 14)?,
    })
}

/// Derived figures come from `ledger::compute` on every write; whatever the
/// caller holds for them is discarded.
pub fn create(conn: &Connection, input: &EntryInput) -> CaisseResult<i64> {
    if input.group.trim().is_empty() {
        return Err(CaisseError::Validation("Entry group is required".into()));
    }
    let d = ledger::compute(&input.raw);
    conn.execute(
        "INSERT INTO entries(date, till_group, shift, billet, money, font_caisse, total_credit, \
         total_achat, total_journal, notes, total_calculated, total_calculated_formula, \
         difference, daily_revenue) \
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14)",
        params![
            input.date,
            input.group.trim(),
            input.shift.as_str(),
            input.raw.billet.to_string(),
            input.raw.money.to_string(),
            input.raw.font_caisse.to_string(),
            input.raw.total_credit.to_string(),
            input.raw.total_achat.to_string(),
            input.raw.total_journal.to_string(),
            input.notes,
            d.total_calculated.to_string(),
            d.total_calculated_formula.to_string(),
            d.difference.to_string(),
            d.daily_revenue.to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Full replace, recomputing the derived figures from the new raw counts.
pub fn update(conn: &Connection, id: i64, input: &EntryInput) -> CaisseResult<()> {
    let d = ledger::compute(&input.raw);
    let n = conn.execute(
        "UPDATE entries SET date=?1, till_group=?2, shift=?3, billet=?4, money=?5, \
         font_caisse=?6, total_credit=?7, total_achat=?8, total_journal=?9, notes=?10, \
         total_calculated=?11, total_calculated_formula=?12, difference=?13, daily_revenue=?14 \
         WHERE id=?15",
        params![
            input.date,
            input.group.trim(),
            input.shift.as_str(),
            input.raw.billet.to_string(),
            input.raw.money.to_string(),
            input.raw.font_caisse.to_string(),
            input.raw.total_credit.to_string(),
            input.raw.total_achat.to_string(),
            input.raw.total_journal.to_string(),
            input.notes,
            d.total_calculated.to_string(),
            d.total_calculated_formula.to_string(),
            d.difference.to_string(),
            d.daily_revenue.to_string(),
            id,
        ],
    )?;
    if n == 0 {
        return Err(CaisseError::NotFound(format!("Entry {} not found", id)));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> CaisseResult<Entry> {
    conn.query_row(
        &format!("SELECT {} FROM entries WHERE id=?1", COLS),
        params![id],
        entry_from_row,
    )
    .optional()?
    .ok_or_else(|| CaisseError::NotFound(format!("Entry {} not found", id)))
}

pub fn list(
    conn: &Connection,
    month: Option<&str>,
    group: Option<&str>,
    shift: Option<Shift>,
    limit: Option<usize>,
) -> CaisseResult<Vec<Entry>> {
    let mut sql = format!("SELECT {} FROM entries WHERE 1=1", COLS);
    let mut args: Vec<String> = Vec::new();
    if let Some(m) = month {
        sql.push_str(" AND substr(date,1,7)=?");
        args.push(m.to_string());
    }
    if let Some(g) = group {
        sql.push_str(" AND till_group=?");
        args.push(g.to_string());
    }
    if let Some(s) = shift {
        sql.push_str(" AND shift=?");
        args.push(s.as_str().to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(n) = limit {
        sql.push_str(" LIMIT ?");
        args.push(n.to_string());
    }
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), entry_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn delete(conn: &Connection, id: i64) -> CaisseResult<()> {
    let n = conn.execute("DELETE FROM entries WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(CaisseError::NotFound(format!("Entry {} not found", id)));
    }
    Ok(())
}

pub fn clear(conn: &Connection) -> CaisseResult<usize> {
    Ok(conn.execute("DELETE FROM entries", [])?)
}

fn input_from_args(sub: &clap::ArgMatches) -> Result<EntryInput> {
    Ok(EntryInput {
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        group: sub.get_one::<String>("group").unwrap().clone(),
        shift: Shift::parse(sub.get_one::<String>("shift").unwrap())?,
        raw: RawCounts {
            billet: amount_or_zero(sub.get_one::<String>("billet")),
            money: amount_or_zero(sub.get_one::<String>("money")),
            font_caisse: amount_or_zero(sub.get_one::<String>("font-caisse")),
            total_credit: amount_or_zero(sub.get_one::<String>("total-credit")),
            total_achat: amount_or_zero(sub.get_one::<String>("total-achat")),
            total_journal: amount_or_zero(sub.get_one::<String>("total-journal")),
        },
        notes: sub
            .get_one::<String>("notes")
            .cloned()
            .unwrap_or_default(),
    })
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = input_from_args(sub)?;
            let id = create(conn, &input)?;
            let e = get(conn, id)?;
            println!(
                "Recorded entry {} for {} / {} / {} (difference {})",
                id,
                e.date,
                e.group,
                e.shift.as_str(),
                e.difference
            );
        }
        Some(("list", sub)) => {
            let data = list(
                conn,
                sub.get_one::<String>("month").map(|s| s.as_str()),
                sub.get_one::<String>("group").map(|s| s.as_str()),
                sub.get_one::<String>("shift")
                    .map(|s| Shift::parse(s))
                    .transpose()?,
                sub.get_one::<usize>("limit").copied(),
            )?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|e| {
                        vec![
                            e.id.to_string(),
                            e.date.to_string(),
                            e.group.clone(),
                            e.shift.as_str().to_string(),
                            e.total_calculated.to_string(),
                            e.total_journal.to_string(),
                            e.difference.to_string(),
                            e.daily_revenue.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Date", "Group", "Shift", "Counted", "Journal", "Diff", "Revenue"],
                        rows,
                    )
                );
            }
        }
        Some(("show", sub)) => {
            let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
            let e = get(conn, id)?;
            println!("{}", serde_json::to_string_pretty(&e)?);
        }
        Some(("edit", sub)) => {
            let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
            let current = get(conn, id)?;
            let merged = EntryInput {
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
                raw: RawCounts {
                    billet: sub
                        .get_one::<String>("billet")
                        .map(|s| amount_or_zero(Some(s)))
                        .unwrap_or(current.billet),
                    money: sub
                        .get_one::<String>("money")
                        .map(|s| amount_or_zero(Some(s)))
                        .unwrap_or(current.money),
                    font_caisse: sub
                        .get_one::<String>("font-caisse")
                        .map(|s| amount_or_zero(Some(s)))
                        .unwrap_or(current.font_caisse),
                    total_credit: sub
                        .get_one::<String>("total-credit")
                        .map(|s| amount_or_zero(Some(s)))
                        .unwrap_or(current.total_credit),
                    total_achat: sub
                        .get_one::<String>("total-achat")
                        .map(|s| amount_or_zero(Some(s)))
                        .unwrap_or(current.total_achat),
                    total_journal: sub
                        .get_one::<String>("total-journal")
                        .map(|s| amount_or_zero(Some(s)))
                        .unwrap_or(current.total_journal),
                },
                notes: sub
                    .get_one::<String>("notes")
                    .cloned()
                    .unwrap_or(current.notes),
            };
            update(conn, id, &merged)?;
            println!("Updated entry {}", id);
        }
        Some(("rm", sub)) => {
            let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
            delete(conn, id)?;
            println!("Removed entry {}", id);
        }
        Some(("clear", _)) => {
            let n = clear(conn)?;
            println!("Removed {} entries", n);
        }
        _ => {}
    }
    Ok(())
}
