//! Tab-separated document table partitioned by category.

use std::{fs, mem, path::Path};

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};

pub const CATEGORY_COLUMN: &str = "Category";
pub const CONTENT_COLUMN: &str = "Content";

/// One row of a category partition.
/// `index` is the row position inside its category, starting at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub index: usize,
    pub content: String,
}

/// Documents grouped by category label.
/// Categories keep first-appearance order, documents keep row order.
#[derive(Debug, Clone, Default)]
pub struct DocumentTable {
    partitions: IndexMap<String, Vec<Document>>,
}

impl DocumentTable {
    pub fn new() -> Self {
        Self {
            partitions: IndexMap::new(),
        }
    }

    /// Append a row; its index is the current size of its category.
    pub fn push(&mut self, category: impl Into<String>, content: impl Into<String>) -> &mut Self {
        let docs = self.partitions.entry(category.into()).or_default();
        let index = docs.len();
        docs.push(Document {
            index,
            content: content.into(),
        });
        self
    }

    /// Read a tab-separated file with a header row.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let table = Self::parse(&text)?;
        debug!(path = %path.display(), rows = table.len(), categories = table.category_num(), "document table loaded");
        Ok(table)
    }

    /// Parse tab-separated text.
    ///
    /// The header must name `Category` and `Content` columns; other columns
    /// are ignored. Blank lines are skipped. A field that starts with a double
    /// quote may hold tabs and line breaks up to its closing quote, and `""`
    /// inside it is a literal `"`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = records(text)?.into_iter();
        let (category_col, content_col) = match records.next() {
            Some((_, header)) => {
                let header: Vec<&str> = header.iter().map(|h| h.trim()).collect();
                (column(&header, CATEGORY_COLUMN)?, column(&header, CONTENT_COLUMN)?)
            }
            None => return Err(Error::MissingColumn { column: CATEGORY_COLUMN.to_string() }),
        };
        let needed = category_col.max(content_col) + 1;

        let mut table = Self::new();
        for (line, mut fields) in records {
            if fields.len() < needed {
                return Err(Error::MalformedTable {
                    line,
                    reason: format!("expected at least {needed} fields, found {}", fields.len()),
                });
            }
            let content = mem::take(&mut fields[content_col]);
            let category = mem::take(&mut fields[category_col]);
            table.push(category, content);
        }
        Ok(table)
    }

    /// total number of rows
    pub fn len(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn category_num(&self) -> usize {
        self.partitions.len()
    }

    /// Labels in first-appearance order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.partitions.keys().map(String::as_str)
    }

    pub fn contains_category(&self, label: &str) -> bool {
        self.partitions.contains_key(label)
    }

    /// Documents of one category, in row order
    pub fn partition(&self, label: &str) -> Option<&[Document]> {
        self.partitions.get(label).map(Vec::as_slice)
    }
}

impl<C, T> FromIterator<(C, T)> for DocumentTable
where
    C: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, T)>>(iter: I) -> Self {
        let mut table = DocumentTable::new();
        for (category, content) in iter {
            table.push(category, content);
        }
        table
    }
}

fn column(header: &[&str], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| *h == name)
        .ok_or_else(|| Error::MissingColumn { column: name.to_string() })
}

/// Split text into records of fields, each tagged with the 1-based line it
/// starts on. Records whose fields are all blank are dropped.
fn records(text: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut line = 1;
    let mut start = 1;
    let mut quoted = false;
    let mut field_start = true;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if quoted {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => quoted = false,
                _ => {
                    if c == '\n' {
                        line += 1;
                    }
                    field.push(c);
                }
            }
            continue;
        }
        match c {
            '"' if field_start => {
                quoted = true;
                field_start = false;
            }
            '\t' => {
                fields.push(mem::take(&mut field));
                field_start = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                end_record(&mut records, &mut fields, &mut field, start);
                line += 1;
                start = line;
                field_start = true;
            }
            _ => {
                field.push(c);
                field_start = false;
            }
        }
    }
    if quoted {
        return Err(Error::MalformedTable {
            line: start,
            reason: "unterminated quoted field".to_string(),
        });
    }
    end_record(&mut records, &mut fields, &mut field, start);
    Ok(records)
}

fn end_record(records: &mut Vec<(usize, Vec<String>)>, fields: &mut Vec<String>, field: &mut String, line: usize) {
    fields.push(mem::take(field));
    let fields = mem::take(fields);
    if fields.iter().any(|f| !f.trim().is_empty()) {
        records.push((line, fields));
    }
}
