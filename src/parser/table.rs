//! Delimited-table parser.
//!
//! The first non-blank line is the header row; each following line becomes a
//! map from header cell to value cell, in column order. Cells are trimmed.
//! There is no quoting or escaping: a delimiter inside a value splits it.

use super::ContentParser;
use crate::error::ParseError;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
pub struct DelimitedTableParser {
    delimiter: char,
}

impl DelimitedTableParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn csv() -> Self {
        Self::new(',')
    }

    pub fn tsv() -> Self {
        Self::new('\t')
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.split(self.delimiter).map(str::trim).collect()
    }
}

impl Default for DelimitedTableParser {
    fn default() -> Self {
        Self::csv()
    }
}

impl ContentParser for DelimitedTableParser {
    fn parse(&self, raw: &str) -> Result<Value, ParseError> {
        let mut lines = raw.lines().filter(|line| !line.trim().is_empty());
        let header = lines.next().ok_or(ParseError::EmptyTable)?;
        let columns = self.split(header);

        let rows = lines
            .map(|line| {
                let cells = self.split(line);
                // Missing trailing cells become empty strings; surplus cells are dropped.
                let mut row = Map::with_capacity(columns.len());
                for (idx, column) in columns.iter().enumerate() {
                    let cell = cells.get(idx).copied().unwrap_or_default();
                    row.insert((*column).to_string(), Value::String(cell.to_string()));
                }
                Value::Object(row)
            })
            .collect();

        Ok(Value::Array(rows))
    }
}
