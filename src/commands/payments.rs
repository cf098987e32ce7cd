// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balance;
use crate::commands::credits;
use crate::error::{CaisseError, Result as CaisseResult};
use crate::models::{Payment, PaymentMethod};
use crate::utils::{dec_col, maybe_print_json, method_col, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

const COLS: &str = "id, customer_name, amount, date, method, notes";

#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub customer_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub notes: String,
}

fn payment_from_row(r: &rusqlite::Row) -> rusqlite::Result<Payment> {
    Ok(Payment {
        id: r.get(0)?,
        customer_name: r.get(1)?,
        amount: dec_col(r, 2)?,
        date: r.get(3)?,
        method: method_col(r, 4)?,
        notes: r.get(5)?,
    })
}

fn validate(input: &PaymentInput) -> CaisseResult<()> {
    if input.customer_name.trim().is_empty() {
        return Err(CaisseError::Validation("Customer name is required".into()));
    }
    if input.amount <= Decimal::ZERO {
        return Err(CaisseError::Validation(
            "Payment amount must be greater than 0".into(),
        ));
    }
    Ok(())
}

pub fn create(conn: &Connection, input: &PaymentInput) -> CaisseResult<i64> {
    validate(input)?;
    conn.execute(
        "INSERT INTO payments(customer_name, amount, date, method, notes) \
         VALUES (?1,?2,?3,?4,?5)",
        params![
            input.customer_name.trim(),
            input.amount.to_string(),
            input.date,
            input.method.as_str(),
            input.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, input: &PaymentInput) -> CaisseResult<()> {
    validate(input)?;
    let n = conn.execute(
        "UPDATE payments SET customer_name=?1, amount=?2, date=?3, method=?4, notes=?5 \
         WHERE id=?6",
        params![
            input.customer_name.trim(),
            input.amount.to_string(),
            input.date,
            input.method.as_str(),
            input.notes,
            id,
        ],
    )?;
    if n == 0 {
        return Err(CaisseError::NotFound(format!("Payment {} not found", id)));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> CaisseResult<Payment> {
    conn.query_row(
        &format!("SELECT {} FROM payments WHERE id=?1", COLS),
        params![id],
        payment_from_row,
    )
    .optional()?
    .ok_or_else(|| CaisseError::NotFound(format!("Payment {} not found", id)))
}

pub fn delete(conn: &Connection, id: i64) -> CaisseResult<()> {
    let n = conn.execute("DELETE FROM payments WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(CaisseError::NotFound(format!("Payment {} not found", id)));
    }
    Ok(())
}

/// Every payment row for one customer, the full set the balance aggregation
/// runs over.
pub fn payments_for(conn: &Connection, customer: &str) -> CaisseResult<Vec<Payment>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM payments WHERE customer_name=?1 ORDER BY date DESC, id DESC",
        COLS
    ))?;
    let rows = stmt.query_map(params![customer], payment_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn list(
    conn: &Connection,
    customer: Option<&str>,
    limit: Option<usize>,
) -> CaisseResult<Vec<Payment>> {
    let mut sql = format!("SELECT {} FROM payments WHERE 1=1", COLS);
    let mut args: Vec<String> = Vec::new();
    if let Some(name) = customer {
        sql.push_str(" AND customer_name=?");
        args.push(name.to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(n) = limit {
        sql.push_str(" LIMIT ?");
        args.push(n.to_string());
    }
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), payment_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = PaymentInput {
                customer_name: sub.get_one::<String>("customer").unwrap().clone(),
                amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
                date: match sub.get_one::<String>("date") {
                    Some(d) => parse_date(d)?,
                    None => chrono::Local::now().date_naive(),
                },
                method: match sub.get_one::<String>("method") {
                    Some(s) => PaymentMethod::parse(s)?,
                    None => PaymentMethod::Cash,
                },
                notes: sub
                    .get_one::<String>("notes")
                    .cloned()
                    .unwrap_or_default(),
            };
            let id = create(conn, &input)?;
            println!(
                "Recorded payment {} of {} from '{}' ({})",
                id,
                input.amount,
                input.customer_name,
                input.method.as_str()
            );
        }
        Some(("list", sub)) => {
            let data = list(
                conn,
                sub.get_one::<String>("customer").map(|s| s.as_str()),
                sub.get_one::<usize>("limit").copied(),
            )?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|p| {
                        vec![
                            p.id.to_string(),
                            p.customer_name.clone(),
                            p.amount.to_string(),
                            p.date.to_string(),
                            p.method.as_str().to_string(),
                            p.notes.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Customer", "Amount", "Date", "Method", "Notes"],
                        rows,
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
            let merged = PaymentInput {
                customer_name: sub
                    .get_one::<String>("customer")
                    .cloned()
                    .unwrap_or(current.customer_name),
                amount: match sub.get_one::<String>("amount") {
                    Some(a) => parse_decimal(a)?,
                    None => current.amount,
                },
                date: match sub.get_one::<String>("date") {
                    Some(d) => parse_date(d)?,
                    None => current.date,
                },
                method: match sub.get_one::<String>("method") {
                    Some(s) => PaymentMethod::parse(s)?,
                    None => current.method,
                },
                notes: sub
                    .get_one::<String>("notes")
                    .cloned()
                    .unwrap_or(current.notes),
            };
            update(conn, id, &merged)?;
            println!("Updated payment {}", id);
        }
        Some(("rm", sub)) => {
            let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
            delete(conn, id)?;
            println!("Removed payment {}", id);
        }
        Some(("balance", sub)) => {
            let name = sub.get_one::<String>("customer").unwrap();
            let credits = credits::credits_for(conn, name)?;
            let payments = payments_for(conn, name)?;
            let summary = balance::summarize(&credits, &payments);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
                let symbol = crate::utils::get_settings(conn)?.currency;
                println!(
                    "{}",
                    pretty_table(
                        &["Customer", "Credits", "Payments", "Balance", "#Cr", "#Pay"],
                        vec![vec![
                            name.clone(),
                            crate::utils::fmt_money(&summary.total_credits, &symbol),
                            crate::utils::fmt_money(&summary.total_payments, &symbol),
                            crate::utils::fmt_money(&summary.balance, &symbol),
                            summary.credit_count.to_string(),
                            summary.payment_count.to_string(),
                        ]],
                    )
                );
            }
        }
        _ => {}
    }
    Ok(())
}
