// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::customers::PartyUpdate;
use crate::error::{CaisseError, Result as CaisseResult};
use crate::models::{Consumption, Employee};
use crate::utils::{dec_col, id_for_employee, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

const COLS: &str = "id, name, phone, email, monthly_salary, notes";
const CONSUMPTION_COLS: &str = "id, employee_name, year, month, amount, notes";

fn employee_from_row(r: &rusqlite::Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: r.get(0)?,
        name: r.get(1)?,
        phone: r.get(2)?,
        email: r.get(3)?,
        monthly_salary: dec_col(r, 4)?,
        notes: r.get(5)?,
    })
}

fn consumption_from_row(r: &rusqlite::Row) -> rusqlite::Result<Consumption> {
    Ok(Consumption {
        id: r.get(0)?,
        employee_name: r.get(1)?,
        year: r.get(2)?,
        month: r.get(3)?,
        amount: dec_col(r, 4)?,
        notes: r.get(5)?,
    })
}

pub fn create(
    conn: &Connection,
    name: &str,
    phone: &str,
    email: &str,
    monthly_salary: Decimal,
    notes: &str,
) -> CaisseResult<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CaisseError::Validation("Employee name is required".into()));
    }
    if monthly_salary < Decimal::ZERO {
        return Err(CaisseError::Validation(
            "Monthly salary must not be negative".into(),
        ));
    }
    conn.execute(
        "INSERT INTO employees(name, phone, email, monthly_salary, notes) VALUES (?1,?2,?3,?4,?5)",
        params![name, phone, email, monthly_salary.to_string(), notes],
    )
    .map_err(|e| CaisseError::from_sqlite(e, "Employee with this name already exists"))?;
    Ok(conn.last_insert_rowid())
}

pub fn find(conn: &Connection, name: &str) -> CaisseResult<Employee> {
    conn.query_row(
        &format!("SELECT {} FROM employees WHERE name=?1", COLS),
        params![name],
        employee_from_row,
    )
    .optional()?
    .ok_or_else(|| CaisseError::NotFound(format!("Employee '{}' not found", name)))
}

pub fn list(conn: &Connection) -> CaisseResult<Vec<Employee>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM employees ORDER BY name", COLS))?;
    let rows = stmt.query_map([], employee_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Rename propagation for employees rewrites consumption rows only.
/// Employee credit rows keep the old name, matching the legacy backend.
/// TODO: decide with the shop whether rename should also rewrite
/// employee_credits; until then `caisse doctor` reports the orphans.
pub fn update(
    conn: &mut Connection,
    name: &str,
    update: &PartyUpdate,
    monthly_salary: Option<Decimal>,
) -> CaisseResult<()> {
    let current = find(conn, name)?;
    let tx = conn.transaction()?;

    if let Some(new_name) = update.name.as_deref().map(str::trim) {
        if !new_name.is_empty() && new_name != current.name {
            let taken: Option<i64> = tx
                .query_row(
                    "SELECT id FROM employees WHERE name=?1",
                    params![new_name],
                    |r| r.get(0),
                )
                .optional()?;
            if taken.is_some() {
                return Err(CaisseError::Conflict(
                    "Employee with this name already exists".into(),
                ));
            }
            tx.execute(
                "UPDATE consumptions SET employee_name=?1 WHERE employee_name=?2",
                params![new_name, current.name],
            )?;
            tx.execute(
                "UPDATE employees SET name=?1 WHERE id=?2",
                params![new_name, current.id],
            )?;
        }
    }
    if let Some(phone) = &update.phone {
        tx.execute(
            "UPDATE employees SET phone=?1 WHERE id=?2",
            params![phone, current.id],
        )?;
    }
    if let Some(email) = &update.email {
        tx.execute(
            "UPDATE employees SET email=?1 WHERE id=?2",
            params![email, current.id],
        )?;
    }
    if let Some(salary) = monthly_salary {
        if salary < Decimal::ZERO {
            return Err(CaisseError::Validation(
                "Monthly salary must not be negative".into(),
            ));
        }
        tx.execute(
            "UPDATE employees SET monthly_salary=?1 WHERE id=?2",
            params![salary.to_string(), current.id],
        )?;
    }
    if let Some(notes) = &update.notes {
        tx.execute(
            "UPDATE employees SET notes=?1 WHERE id=?2",
            params![notes, current.id],
        )?;
    }
    tx.commit()?;
    Ok(())
}

/// Removes the employee and every row that weak-references it by name:
/// staff credits and consumption records. One transaction.
pub fn delete(conn: &mut Connection, name: &str) -> CaisseResult<()> {
    let current = find(conn, name)?;
    let tx = conn.transaction()?;
    tx.execute(
        "DELETE FROM employee_credits WHERE employee_name=?1",
        params![current.name],
    )?;
    tx.execute(
        "DELETE FROM consumptions WHERE employee_name=?1",
        params![current.name],
    )?;
    tx.execute("DELETE FROM employees WHERE id=?1", params![current.id])?;
    tx.commit()?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ConsumptionInput {
    pub employee_name: String,
    pub year: i32,
    pub month: u32,
    pub amount: Decimal,
    pub notes: String,
}

fn validate_consumption(input: &ConsumptionInput) -> CaisseResult<()> {
    if !(1..=12).contains(&input.month) {
        return Err(CaisseError::Validation(format!(
            "Invalid month {}, expected 1-12",
            input.month
        )));
    }
    if input.year < 2000 {
        return Err(CaisseError::Validation(format!(
            "Invalid year {}, expected 2000 or later",
            input.year
        )));
    }
    if input.amount < Decimal::ZERO {
        return Err(CaisseError::Validation(
            "Consumption amount must not be negative".into(),
        ));
    }
    Ok(())
}

/// At most one consumption row per (employee, year, month); a second create
/// for the same period is a conflict, never an overwrite. The employee must
/// exist.
pub fn create_consumption(conn: &Connection, input: &ConsumptionInput) -> CaisseResult<i64> {
    validate_consumption(input)?;
    id_for_employee(conn, input.employee_name.trim())?;
    conn.execute(
        "INSERT INTO consumptions(employee_name, year, month, amount, notes) \
         VALUES (?1,?2,?3,?4,?5)",
        params![
            input.employee_name.trim(),
            input.year,
            input.month,
            input.amount.to_string(),
            input.notes,
        ],
    )
    .map_err(|e| {
        CaisseError::from_sqlite(
            e,
            "Consumption record for this employee and month already exists",
        )
    })?;
    Ok(conn.last_insert_rowid())
}

pub fn update_consumption(
    conn: &Connection,
    id: i64,
    input: &ConsumptionInput,
) -> CaisseResult<()> {
    validate_consumption(input)?;
    let n = conn
        .execute(
            "UPDATE consumptions SET employee_name=?1, year=?2, month=?3, amount=?4, notes=?5 \
             WHERE id=?6",
            params![
                input.employee_name.trim(),
                input.year,
                input.month,
                input.amount.to_string(),
                input.notes,
                id,
            ],
        )
        .map_err(|e| {
            CaisseError::from_sqlite(
                e,
                "Consumption record for this employee and month already exists",
            )
        })?;
    if n == 0 {
        return Err(CaisseError::NotFound(format!(
            "Consumption record {} not found",
            id
        )));
    }
    Ok(())
}

pub fn delete_consumption(conn: &Connection, id: i64) -> CaisseResult<()> {
    let n = conn.execute("DELETE FROM consumptions WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(CaisseError::NotFound(format!(
            "Consumption record {} not found",
            id
        )));
    }
    Ok(())
}

pub fn consumptions_for(
    conn: &Connection,
    employee: &str,
    year: Option<i32>,
    month: Option<u32>,
) -> CaisseResult<Vec<Consumption>> {
    let mut sql = format!(
        "SELECT {} FROM consumptions WHERE employee_name=?",
        CONSUMPTION_COLS
    );
    let mut args: Vec<String> = vec![employee.to_string()];
    if let Some(y) = year {
        sql.push_str(" AND year=?");
        args.push(y.to_string());
    }
    if let Some(m) = month {
        sql.push_str(" AND month=?");
        args.push(m.to_string());
    }
    sql.push_str(" ORDER BY year DESC, month DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), consumption_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

#[derive(Debug, Serialize)]
pub struct EmployeeSummary {
    pub name: String,
    pub monthly_salary: Decimal,
    pub consumptions: Vec<Consumption>,
    pub total_consumption: Decimal,
    pub consumption_count: usize,
}

/// Every employee with their consumption records, optionally narrowed to a
/// year and/or month.
pub fn summary(
    conn: &Connection,
    year: Option<i32>,
    month: Option<u32>,
) -> CaisseResult<Vec<EmployeeSummary>> {
    let mut out = Vec::new();
    for e in list(conn)? {
        let consumptions = consumptions_for(conn, &e.name, year, month)?;
        let total_consumption: Decimal = consumptions.iter().map(|c| c.amount).sum();
        out.push(EmployeeSummary {
            name: e.name,
            monthly_salary: e.monthly_salary,
            consumption_count: consumptions.len(),
            total_consumption,
            consumptions,
        });
    }
    Ok(out)
}

#[derive(Debug, Serialize)]
pub struct EmployeeDetail {
    pub employee: Employee,
    pub consumptions: Vec<Consumption>,
}

pub fn detail(conn: &Connection, name: &str) -> CaisseResult<EmployeeDetail> {
    let employee = find(conn, name)?;
    let consumptions = consumptions_for(conn, &employee.name, None, None)?;
    Ok(EmployeeDetail {
        employee,
        consumptions,
    })
}

fn handle_consumption(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = ConsumptionInput {
                employee_name: sub.get_one::<String>("employee").unwrap().clone(),
                year: sub.get_one::<String>("year").unwrap().parse()?,
                month: sub.get_one::<String>("month").unwrap().parse()?,
                amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
                notes: sub
                    .get_one::<String>("notes")
                    .cloned()
                    .unwrap_or_default(),
            };
            let id = create_consumption(conn, &input)?;
            println!(
                "Recorded consumption {} of {} for '{}' ({}-{:02})",
                id, input.amount, input.employee_name, input.year, input.month
            );
        }
        Some(("edit", sub)) => {
            let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
            let current = conn
                .query_row(
                    &format!("SELECT {} FROM consumptions WHERE id=?1", CONSUMPTION_COLS),
                    params![id],
                    consumption_from_row,
                )
                .optional()?
                .ok_or_else(|| {
                    CaisseError::NotFound(format!("Consumption record {} not found", id))
                })?;
            let merged = ConsumptionInput {
                employee_name: sub
                    .get_one::<String>("employee")
                    .cloned()
                    .unwrap_or(current.employee_name),
                year: match sub.get_one::<String>("year") {
                    Some(y) => y.parse()?,
                    None => current.year,
                },
                month: match sub.get_one::<String>("month") {
                    Some(m) => m.parse()?,
                    None => current.month,
                },
                amount: match sub.get_one::<String>("amount") {
                    Some(a) => parse_decimal(a)?,
                    None => current.amount,
                },
                notes: sub
                    .get_one::<String>("notes")
                    .cloned()
                    .unwrap_or(current.notes),
            };
            update_consumption(conn, id, &merged)?;
            println!("Updated consumption record {}", id);
        }
        Some(("rm", sub)) => {
            let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
            delete_consumption(conn, id)?;
            println!("Removed consumption record {}", id);
        }
        _ => {}
    }
    Ok(())
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let salary = match sub.get_one::<String>("salary") {
                Some(s) => parse_decimal(s)?,
                None => Decimal::ZERO,
            };
            create(
                conn,
                name,
                sub.get_one::<String>("phone").map_or("", |s| s.as_str()),
                sub.get_one::<String>("email").map_or("", |s| s.as_str()),
                salary,
                sub.get_one::<String>("notes").map_or("", |s| s.as_str()),
            )?;
            println!("Added employee '{}'", name.trim());
        }
        Some(("list", sub)) => {
            let data = list(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let symbol = crate::utils::get_settings(conn)?.currency;
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|e| {
                        vec![
                            e.name.clone(),
                            e.phone.clone(),
                            e.email.clone(),
                            crate::utils::fmt_money(&e.monthly_salary, &symbol),
                            e.notes.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Name", "Phone", "Email", "Salary", "Notes"], rows)
                );
            }
        }
        Some(("show", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            println!("{}", serde_json::to_string_pretty(&detail(conn, name)?)?);
        }
        Some(("summary", sub)) => {
            let year = sub
                .get_one::<String>("year")
                .map(|s| s.parse::<i32>())
                .transpose()?;
            let month = sub
                .get_one::<String>("month")
                .map(|s| s.parse::<u32>())
                .transpose()?;
            let data = summary(conn, year, month)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let symbol = crate::utils::get_settings(conn)?.currency;
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|e| {
                        vec![
                            e.name.clone(),
                            crate::utils::fmt_money(&e.monthly_salary, &symbol),
                            crate::utils::fmt_money(&e.total_consumption, &symbol),
                            e.consumption_count.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Name", "Salary", "Consumption", "#Months"], rows)
                );
            }
        }
        Some(("edit", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().clone();
            let upd = PartyUpdate {
                name: sub.get_one::<String>("new-name").cloned(),
                phone: sub.get_one::<String>("phone").cloned(),
                email: sub.get_one::<String>("email").cloned(),
                notes: sub.get_one::<String>("notes").cloned(),
            };
            let salary = sub
                .get_one::<String>("salary")
                .map(|s| parse_decimal(s))
                .transpose()?;
            update(conn, &name, &upd, salary)?;
            println!("Updated employee '{}'", name);
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            delete(conn, name)?;
            println!(
                "Removed employee '{}' and all associated credits/consumption records",
                name
            );
        }
        Some(("consumption", sub)) => handle_consumption(conn, sub)?,
        _ => {}
    }
    Ok(())
}
