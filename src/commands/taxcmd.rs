// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::tax::{self, TaxResult};
use crate::utils::{maybe_print_json, parse_positive_decimal, pretty_table};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("salary", sub)) => {
            let amount = parse_positive_decimal(sub.get_one::<String>("amount").unwrap())?;
            let dependents = *sub.get_one::<u32>("dependents").unwrap_or(&1);
            print_result(sub, &tax::salary(amount, dependents))?;
        }
        Some(("financial", sub)) => {
            let amount = parse_positive_decimal(sub.get_one::<String>("amount").unwrap())?;
            print_result(sub, &tax::financial(amount))?;
        }
        _ => {}
    }
    Ok(())
}

// Deduction display order mirrors the pay-slip layout rather than the
// map's alphabetical key order.
const DEDUCTION_ORDER: [&str; 7] = [
    "national_pension",
    "health_insurance",
    "long_term_care",
    "employment_insurance",
    "income_tax",
    "local_income_tax",
    "total_deduction",
];

fn print_result(sub: &clap::ArgMatches, result: &TaxResult) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, result)? {
        return Ok(());
    }

    let mut rows = Vec::new();
    for key in DEDUCTION_ORDER {
        if let Some(v) = result.deductions.get(key) {
            rows.push(vec![key.to_string(), v.to_string()]);
        }
    }
    println!("{}", pretty_table(&["Deduction", "Amount"], rows));
    println!("gross: {}  net: {}", result.gross_amount, result.net_amount);
    for (k, v) in &result.details {
        println!("{}: {}", k, v);
    }
    Ok(())
}
