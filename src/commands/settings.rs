// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{CaisseError, Result as CaisseResult};
use crate::models::Settings;
use crate::utils::{get_settings, maybe_print_json, pretty_table, save_settings};
use anyhow::Result;
use rusqlite::Connection;

/// Replaces groups and/or currency; untouched fields keep their value. The
/// singleton is materialised with defaults first if it never existed.
pub fn update(
    conn: &Connection,
    groups: Option<Vec<String>>,
    currency: Option<String>,
) -> CaisseResult<Settings> {
    let mut settings = get_settings(conn)?;
    if let Some(groups) = groups {
        let groups: Vec<String> = groups
            .into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();
        if groups.is_empty() {
            return Err(CaisseError::Validation(
                "At least one group name is required".into(),
            ));
        }
        settings.groups = groups;
    }
    if let Some(currency) = currency {
        settings.currency = currency;
    }
    save_settings(conn, &settings)?;
    Ok(settings)
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let settings = get_settings(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &settings)? {
                println!(
                    "{}",
                    pretty_table(
                        &["Groups", "Currency"],
                        vec![vec![settings.groups.join(", "), settings.currency]],
                    )
                );
            }
        }
        Some(("set", sub)) => {
            let groups = sub
                .get_one::<String>("groups")
                .map(|s| s.split(',').map(|g| g.to_string()).collect::<Vec<_>>());
            let currency = sub.get_one::<String>("currency").cloned();
            let settings = update(conn, groups, currency)?;
            println!(
                "Settings updated: groups [{}], currency {}",
                settings.groups.join(", "),
                settings.currency
            );
        }
        _ => {}
    }
    Ok(())
}
