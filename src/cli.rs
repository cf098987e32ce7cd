// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn with_output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn opt(name: &'static str) -> Arg {
    Arg::new(name).long(name)
}

fn entry_amount_args(cmd: Command) -> Command {
    cmd.arg(opt("billet").help("Bill-cash count"))
        .arg(opt("money").help("Coin-cash count"))
        .arg(opt("font-caisse").help("Starting register float"))
        .arg(opt("total-credit").help("Credit sales total"))
        .arg(opt("total-achat").help("Purchases/expenses total"))
        .arg(opt("total-journal").help("Register-reported total"))
        .arg(opt("notes"))
}

fn credit_write_args(cmd: Command, required: bool) -> Command {
    cmd.arg(opt("name").required(required).help("Party name"))
        .arg(opt("amount").required(required))
        .arg(opt("date").required(required).help("YYYY-MM-DD"))
        .arg(opt("group").required(required).help("Till group"))
        .arg(opt("shift").required(required).help("'7am to 2pm' or '2pm to 10pm'"))
        .arg(opt("notes"))
}

fn credit_list_args(cmd: Command, party_flag: &'static str) -> Command {
    with_output_flags(
        cmd.arg(opt(party_flag).help("Filter by party name"))
            .arg(opt("entry-date").help("Entry filter: date (YYYY-MM-DD)"))
            .arg(opt("entry-group").help("Entry filter: till group"))
            .arg(opt("entry-shift").help("Entry filter: shift"))
            .arg(opt("limit").value_parser(value_parser!(usize))),
    )
}

fn credit_cmd(name: &'static str, about: &'static str, party_flag: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(credit_write_args(
            Command::new("add").about("Record a credit"),
            true,
        ))
        .subcommand(credit_list_args(
            Command::new("list").about("List credits"),
            party_flag,
        ))
        .subcommand(Command::new("show").arg(Arg::new("id").required(true)))
        .subcommand(credit_write_args(
            Command::new("edit")
                .about("Edit a credit")
                .arg(Arg::new("id").required(true)),
            false,
        ))
        .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
        .subcommand(Command::new("clear").about("Delete all credits of this kind"))
}

pub fn build_cli() -> Command {
    Command::new("caisse")
        .about("Coffee-shop cash ledger, customer credit, and staff consumption tracking")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("entry")
                .about("Shift cash reconciliation entries")
                .subcommand_required(true)
                .subcommand(entry_amount_args(
                    Command::new("add")
                        .about("Record a shift close-out")
                        .arg(opt("date").required(true).help("YYYY-MM-DD"))
                        .arg(opt("group").required(true).help("Till group"))
                        .arg(
                            opt("shift")
                                .required(true)
                                .help("'7am to 2pm' or '2pm to 10pm'"),
                        ),
                ))
                .subcommand(with_output_flags(
                    Command::new("list")
                        .about("List entries, newest first")
                        .arg(opt("month").help("Filter by month (YYYY-MM)"))
                        .arg(opt("group"))
                        .arg(opt("shift"))
                        .arg(opt("limit").value_parser(value_parser!(usize))),
                ))
                .subcommand(Command::new("show").arg(Arg::new("id").required(true)))
                .subcommand(entry_amount_args(
                    Command::new("edit")
                        .about("Correct an entry (derived figures are recomputed)")
                        .arg(Arg::new("id").required(true))
                        .arg(opt("date"))
                        .arg(opt("group"))
                        .arg(opt("shift")),
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(Command::new("clear").about("Delete all entries")),
        )
        .subcommand(
            Command::new("customer")
                .about("Customers and their credit balances")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(opt("phone"))
                        .arg(opt("email"))
                        .arg(opt("notes")),
                )
                .subcommand(with_output_flags(Command::new("list")))
                .subcommand(with_output_flags(
                    Command::new("search").arg(Arg::new("query").required(true)),
                ))
                .subcommand(Command::new("show").arg(Arg::new("name").required(true)))
                .subcommand(with_output_flags(
                    Command::new("summary").about("Balance summary for every customer"),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("name").required(true))
                        .arg(opt("new-name").help("Rename; rewrites credit records"))
                        .arg(opt("phone"))
                        .arg(opt("email"))
                        .arg(opt("notes")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a customer and all its credits/payments")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("employee")
                .about("Employees, salaries, and monthly consumption")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(opt("salary").help("Monthly salary"))
                        .arg(opt("phone"))
                        .arg(opt("email"))
                        .arg(opt("notes")),
                )
                .subcommand(with_output_flags(Command::new("list")))
                .subcommand(Command::new("show").arg(Arg::new("name").required(true)))
                .subcommand(with_output_flags(
                    Command::new("summary")
                        .about("Consumption summary for every employee")
                        .arg(opt("year"))
                        .arg(opt("month")),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("name").required(true))
                        .arg(opt("new-name").help("Rename; rewrites consumption records"))
                        .arg(opt("salary"))
                        .arg(opt("phone"))
                        .arg(opt("email"))
                        .arg(opt("notes")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an employee and all its credits/consumption records")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("consumption")
                        .about("Monthly in-kind consumption records")
                        .subcommand_required(true)
                        .subcommand(
                            Command::new("add")
                                .arg(opt("employee").required(true))
                                .arg(opt("year").required(true))
                                .arg(opt("month").required(true).help("1-12"))
                                .arg(opt("amount").required(true))
                                .arg(opt("notes")),
                        )
                        .subcommand(
                            Command::new("edit")
                                .arg(Arg::new("id").required(true))
                                .arg(opt("employee"))
                                .arg(opt("year"))
                                .arg(opt("month"))
                                .arg(opt("amount"))
                                .arg(opt("notes")),
                        )
                        .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
                ),
        )
        .subcommand(credit_cmd(
            "credit",
            "Customer credit records",
            "customer",
        ))
        .subcommand(credit_cmd(
            "staff-credit",
            "Employee credit records",
            "employee",
        ))
        .subcommand(
            Command::new("payment")
                .about("Customer payments against credit balances")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(opt("customer").required(true))
                        .arg(opt("amount").required(true))
                        .arg(opt("date").help("Defaults to today"))
                        .arg(opt("method").help("cash|card|transfer|other"))
                        .arg(opt("notes")),
                )
                .subcommand(with_output_flags(
                    Command::new("list")
                        .arg(opt("customer"))
                        .arg(opt("limit").value_parser(value_parser!(usize))),
                ))
                .subcommand(Command::new("show").arg(Arg::new("id").required(true)))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(opt("customer"))
                        .arg(opt("amount"))
                        .arg(opt("date"))
                        .arg(opt("method"))
                        .arg(opt("notes")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(with_output_flags(
                    Command::new("balance")
                        .about("Outstanding balance for one customer")
                        .arg(Arg::new("customer").required(true)),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("Till groups and display currency")
                .subcommand_required(true)
                .subcommand(with_output_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(opt("groups").help("Comma-separated group names"))
                        .arg(opt("currency")),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Flat-file export for accountant handoff")
                .subcommand_required(true)
                .subcommand(export_cmd("entries"))
                .subcommand(export_cmd("credits"))
                .subcommand(export_cmd("payments")),
        )
        .subcommand(Command::new("doctor").about("Report orphaned references and stale figures"))
}

fn export_cmd(name: &'static str) -> Command {
    Command::new(name)
        .arg(
            opt("format")
                .required(true)
                .help("csv or json"),
        )
        .arg(opt("out").required(true).help("Output file path"))
}
