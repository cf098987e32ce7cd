// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("entries", sub)) => export_entries(conn, sub),
        Some(("credits", sub)) => export_credits(conn, sub),
        Some(("payments", sub)) => export_payments(conn, sub),
        _ => Ok(()),
    }
}

fn export_entries(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT date, till_group, shift, billet, money, font_caisse, total_credit, total_achat, \
         total_journal, total_calculated, total_calculated_formula, difference, daily_revenue, \
         notes FROM entries ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        let mut rec = Vec::with_capacity(14);
        for i in 0..14 {
            rec.push(r.get::<_, String>(i)?);
        }
        Ok(rec)
    })?;

    let header = [
        "date",
        "group",
        "shift",
        "billet",
        "money",
        "font_caisse",
        "total_credit",
        "total_achat",
        "total_journal",
        "total_calculated",
        "total_calculated_formula",
        "difference",
        "daily_revenue",
        "notes",
    ];
    write_rows(&fmt, out, &header, rows)?;
    println!("Exported entries to {}", out);
    Ok(())
}

fn export_credits(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT customer_name, amount, date, till_group, shift, notes \
         FROM customer_credits ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        let mut rec = Vec::with_capacity(6);
        for i in 0..6 {
            rec.push(r.get::<_, String>(i)?);
        }
        Ok(rec)
    })?;

    let header = ["customer", "amount", "date", "group", "shift", "notes"];
    write_rows(&fmt, out, &header, rows)?;
    println!("Exported credits to {}", out);
    Ok(())
}

fn export_payments(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT customer_name, amount, date, method, notes FROM payments ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        let mut rec = Vec::with_capacity(5);
        for i in 0..5 {
            rec.push(r.get::<_, String>(i)?);
        }
        Ok(rec)
    })?;

    let header = ["customer", "amount", "date", "method", "notes"];
    write_rows(&fmt, out, &header, rows)?;
    println!("Exported payments to {}", out);
    Ok(())
}

fn write_rows(
    fmt: &str,
    out: &str,
    header: &[&str],
    rows: impl Iterator<Item = rusqlite::Result<Vec<String>>>,
) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(header)?;
            for row in rows {
                wtr.write_record(row?)?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let row = row?;
                let obj: serde_json::Map<String, serde_json::Value> = header
                    .iter()
                    .zip(row)
                    .map(|(k, v)| (k.to_string(), json!(v)))
                    .collect();
                items.push(serde_json::Value::Object(obj));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    Ok(())
}
