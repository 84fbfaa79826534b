//! Inventory CSV
//!
//! `name,category,quantity,expiry` with RFC 4180 quoting: fields holding a
//! comma, quote or line break are wrapped in quotes, inner quotes doubled.

use chrono::NaiveDate;

use crate::domain::{Category, DomainError, DomainResult, PantryItem, PantryItemPatch};

pub const CSV_HEADER: &str = "name,category,quantity,expiry";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One parsed inventory row
#[derive(Debug, Clone, PartialEq)]
pub struct PantryRecord {
    pub name: String,
    pub category: Category,
    pub quantity: String,
    pub expiry: NaiveDate,
}

impl PantryRecord {
    /// Fields to upsert under `self.name`
    pub fn into_patch(self) -> PantryItemPatch {
        PantryItemPatch {
            name: Some(self.name),
            category: Some(self.category),
            quantity: Some(self.quantity),
            expiry: Some(self.expiry),
        }
    }
}

impl From<&PantryItem> for PantryRecord {
    fn from(item: &PantryItem) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity.clone(),
            expiry: item.expiry,
        }
    }
}

pub fn csv_export(items: &[PantryItem]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for item in items {
        let expiry = item.expiry.format(DATE_FORMAT).to_string();
        let fields = [item.name.as_str(), item.category.as_str(), item.quantity.as_str(), expiry.as_str()];
        let line: Vec<String> = fields.iter().map(|field| escape(field)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Parse inventory rows. A leading header row and blank lines are skipped;
/// any malformed row rejects the whole document.
pub fn csv_import(text: &str) -> DomainResult<Vec<PantryRecord>> {
    let rows = parse_rows(text)?;
    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        if index == 0 && is_header(&row) {
            continue;
        }
        records.push(parse_record(index + 1, row)?);
    }
    Ok(records)
}

fn is_header(row: &[String]) -> bool {
    let header: Vec<&str> = CSV_HEADER.split(',').collect();
    row.len() == header.len()
        && row
            .iter()
            .zip(header)
            .all(|(field, expected)| field.trim().eq_ignore_ascii_case(expected))
}

fn parse_record(number: usize, row: Vec<String>) -> DomainResult<PantryRecord> {
    let invalid = |reason: String| DomainError::InvalidInput(format!("row {}: {}", number, reason));
    let [name, category, quantity, expiry]: [String; 4] = row
        .try_into()
        .map_err(|row: Vec<String>| invalid(format!("expected 4 fields, found {}", row.len())))?;

    let name = name.trim().to_string();
    let quantity = quantity.trim().to_string();
    if name.is_empty() {
        return Err(invalid("name is required".to_string()));
    }
    if quantity.is_empty() {
        return Err(invalid("quantity is required".to_string()));
    }
    let expiry = NaiveDate::parse_from_str(expiry.trim(), DATE_FORMAT)
        .map_err(|e| invalid(format!("bad expiry '{}': {}", expiry.trim(), e)))?;

    Ok(PantryRecord {
        name,
        category: Category::from_str(&category),
        quantity,
        expiry,
    })
}

/// Split text into rows of fields, honouring quoted fields that span
/// commas and line breaks. Blank lines produce no row.
fn parse_rows(text: &str) -> DomainResult<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row_has_content = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                row_has_content = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                row_has_content = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                if row_has_content || !field.trim().is_empty() {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                field.clear();
                row_has_content = false;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(DomainError::InvalidInput("unterminated quoted field".to_string()));
    }
    if row_has_content || !field.trim().is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}
