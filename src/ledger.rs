// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

/// Raw cash counts for one shift, as supplied at close-out. Absent or
/// unparseable amounts are taken as zero; negative values pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCounts {
    pub billet: Decimal,
    pub money: Decimal,
    pub font_caisse: Decimal,
    pub total_credit: Decimal,
    pub total_achat: Decimal,
    pub total_journal: Decimal,
}

/// Figures derived from the raw counts. Stored alongside the entry but
/// recomputed on every write; caller-supplied values are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Derived {
    pub total_calculated: Decimal,
    pub total_calculated_formula: Decimal,
    pub difference: Decimal,
    pub daily_revenue: Decimal,
}

/// Turns one shift's raw counts into the derived ledger figures:
///
///   total_calculated         = billet + money
///   total_calculated_formula = total_calculated + total_credit
///                              + total_achat - font_caisse
///   difference               = total_calculated_formula - total_journal
///   daily_revenue            = total_journal - total_achat
pub fn compute(raw: &RawCounts) -> Derived {
    let total_calculated = raw.billet + raw.money;
    let total_calculated_formula =
        total_calculated + raw.total_credit + raw.total_achat - raw.font_caisse;
    let difference = total_calculated_formula - raw.total_journal;
    let daily_revenue = raw.total_journal - raw.total_achat;
    Derived {
        total_calculated,
        total_calculated_formula,
        difference,
        daily_revenue,
    }
}
