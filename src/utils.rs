// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use serde::Serialize;

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Prints `value` as pretty JSON when the flag is set; returns whether it
/// printed so callers can skip the table.
pub fn maybe_print_json<T: Serialize>(json_flag: bool, value: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(true);
    }
    Ok(false)
}

/// Minor units to a display string: 1234 -> "12.34", -5 -> "-0.05".
pub fn fmt_amount(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Parses a positive decimal amount with up to two fraction digits into
/// minor units: "10" -> 1000, "10.5" -> 1050, "10.50" -> 1050.
pub fn parse_amount(s: &str) -> Result<i64> {
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        bail!("Invalid amount '{}', expected e.g. 10 or 10.50", s);
    }
    if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        bail!("Invalid amount '{}', at most two fraction digits", s);
    }
    let whole: i64 = whole
        .parse()
        .with_context(|| format!("Invalid amount '{}'", s))?;
    let mut minor = whole
        .checked_mul(100)
        .with_context(|| format!("Amount '{}' out of range", s))?;
    if !frac.is_empty() {
        let mut cents: i64 = frac.parse()?;
        if frac.len() == 1 {
            cents *= 10;
        }
        minor = minor
            .checked_add(cents)
            .with_context(|| format!("Amount '{}' out of range", s))?;
    }
    Ok(minor)
}
