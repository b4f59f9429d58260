//! Seeded tabular row generator.
//!
//! Rows come out in the same shape the delimited-table parser produces: an
//! array of objects whose values are strings, keys in column order.

use super::SyntheticGenerator;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};

/// How a column's cells are produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    /// `prefix` + zero-padded counter starting at `start`
    Sequence {
        prefix: String,
        width: usize,
        start: u64,
    },
    /// Decimal amount in `[min, max]`, two decimal places
    Amount { min: f64, max: f64 },
    /// ISO date within `span_days` after `start`
    Date { start: NaiveDate, span_days: u64 },
    /// One of the listed values
    Choice(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn sequence(name: &str, prefix: &str, width: usize, start: u64) -> Self {
        Self {
            name: name.to_string(),
            kind: ColumnKind::Sequence {
                prefix: prefix.to_string(),
                width,
                start,
            },
        }
    }

    /// Non-finite bounds are replaced with `0.0`.
    pub fn amount(name: &str, min: f64, max: f64) -> Self {
        let finite = |bound: f64| if bound.is_finite() { bound } else { 0.0 };
        let (min, max) = (finite(min), finite(max));
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            name: name.to_string(),
            kind: ColumnKind::Amount { min, max },
        }
    }

    pub fn date(name: &str, start: NaiveDate, span_days: u64) -> Self {
        Self {
            name: name.to_string(),
            kind: ColumnKind::Date { start, span_days },
        }
    }

    pub fn choice(name: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: ColumnKind::Choice(options.iter().map(|o| o.to_string()).collect()),
        }
    }

    fn cell(&self, row: usize, rng: &mut StdRng) -> String {
        match &self.kind {
            ColumnKind::Sequence {
                prefix,
                width,
                start,
            } => format!(
                "{}{:0width$}",
                prefix,
                start.saturating_add(row as u64),
                width = *width
            ),
            ColumnKind::Amount { min, max } => format!("{:.2}", rng.gen_range(*min..=*max)),
            ColumnKind::Date { start, span_days } => {
                let offset = rng.gen_range(0..=*span_days);
                start
                    .checked_add_days(Days::new(offset))
                    .unwrap_or(*start)
                    .format("%Y-%m-%d")
                    .to_string()
            }
            ColumnKind::Choice(options) if options.is_empty() => String::new(),
            ColumnKind::Choice(options) => options[rng.gen_range(0..options.len())].clone(),
        }
    }
}

fn epoch_2024() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// Deterministic row generator: a fresh RNG seeded with `seed` on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularGenerator {
    columns: Vec<Column>,
    rows: usize,
    seed: u64,
}

impl TabularGenerator {
    pub fn new(columns: Vec<Column>, rows: usize, seed: u64) -> Self {
        Self {
            columns,
            rows,
            seed,
        }
    }

    /// Invoice rows: id, vendor, amount, issue date, status.
    pub fn invoices(rows: usize, seed: u64) -> Self {
        Self::new(
            vec![
                Column::sequence("invoice_id", "INV-", 5, 1),
                Column::choice(
                    "vendor",
                    &[
                        "Northwind Traders",
                        "Contoso Ltd",
                        "Fabrikam Inc",
                        "Tailspin Toys",
                        "Globex Corp",
                    ],
                ),
                Column::amount("amount", 25.0, 25_000.0),
                Column::date("issued_on", epoch_2024(), 365),
                Column::choice("status", &["paid", "pending", "overdue", "disputed"]),
            ],
            rows,
            seed,
        )
    }

    /// Generic rows for files without a dedicated preset.
    pub fn generic(rows: usize, seed: u64) -> Self {
        Self::new(
            vec![
                Column::sequence("id", "ROW-", 4, 1),
                Column::choice("category", &["alpha", "beta", "gamma", "delta"]),
                Column::amount("value", 0.0, 1_000.0),
                Column::date("recorded_on", epoch_2024(), 365),
            ],
            rows,
            seed,
        )
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl SyntheticGenerator for TabularGenerator {
    fn generate(&self) -> Value {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let rows = (0..self.rows)
            .map(|row| {
                let mut record = Map::with_capacity(self.columns.len());
                for column in &self.columns {
                    record.insert(column.name.clone(), Value::String(column.cell(row, &mut rng)));
                }
                Value::Object(record)
            })
            .collect();
        Value::Array(rows)
    }
}
