//! In-memory, column-oriented table.
//!
//! Columns are stored as typed vectors in header order. Every column of a
//! table has the same length; constructors enforce it.

use crate::error::{MockDataError, Result};
use crate::schema::{ColumnType, Field};

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => f.write_str(v),
        }
    }
}

/// Values of one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Str(Vec<String>),
}

impl ColumnData {
    pub fn with_capacity(column_type: ColumnType, capacity: usize) -> Self {
        match column_type {
            ColumnType::Int => ColumnData::Int(Vec::with_capacity(capacity)),
            ColumnType::Float => ColumnData::Float(Vec::with_capacity(capacity)),
            ColumnType::Str => ColumnData::Str(Vec::with_capacity(capacity)),
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::Int(_) => ColumnType::Int,
            ColumnData::Float(_) => ColumnType::Float,
            ColumnData::Str(_) => ColumnType::Str,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            ColumnData::Int(v) => v.get(index).map(|x| Value::Int(*x)),
            ColumnData::Float(v) => v.get(index).map(|x| Value::Float(*x)),
            ColumnData::Str(v) => v.get(index).map(|x| Value::Str(x.clone())),
        }
    }

    /// Parse `raw` as this column's type and append it.
    ///
    /// Returns the parse failure reason on error.
    pub fn push_parsed(&mut self, raw: &str) -> std::result::Result<(), String> {
        match self {
            ColumnData::Int(v) => v.push(raw.trim().parse().map_err(|e| format!("{}", e))?),
            ColumnData::Float(v) => v.push(raw.trim().parse().map_err(|e| format!("{}", e))?),
            ColumnData::Str(v) => v.push(raw.to_string()),
        }
        Ok(())
    }

    /// Copy of rows `start..start + len`
    pub fn slice(&self, start: usize, len: usize) -> ColumnData {
        let end = start + len;
        match self {
            ColumnData::Int(v) => ColumnData::Int(v[start..end].to_vec()),
            ColumnData::Float(v) => ColumnData::Float(v[start..end].to_vec()),
            ColumnData::Str(v) => ColumnData::Str(v[start..end].to_vec()),
        }
    }

    // Callers guarantee matching types.
    fn extend_from(&mut self, other: &ColumnData) {
        match (self, other) {
            (ColumnData::Int(a), ColumnData::Int(b)) => a.extend_from_slice(b),
            (ColumnData::Float(a), ColumnData::Float(b)) => a.extend_from_slice(b),
            (ColumnData::Str(a), ColumnData::Str(b)) => a.extend_from_slice(b),
            _ => {}
        }
    }
}

/// A generated or loaded table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    fields: Vec<Field>,
    columns: Vec<ColumnData>,
    num_rows: usize,
}

impl Table {
    /// Build a table, checking that every column matches its field and
    /// that all columns have the same length.
    pub fn new(fields: Vec<Field>, columns: Vec<ColumnData>) -> Result<Self> {
        if fields.len() != columns.len() {
            return Err(MockDataError::SchemaMismatch {
                expected: fields.iter().map(|f| f.name.clone()).collect(),
                found: columns.iter().map(|c| c.column_type().to_string()).collect(),
            });
        }
        for (field, column) in fields.iter().zip(&columns) {
            if field.column_type != column.column_type() {
                return Err(MockDataError::SchemaMismatch {
                    expected: vec![format!("{}: {}", field.name, field.column_type)],
                    found: vec![format!("{}: {}", field.name, column.column_type())],
                });
            }
        }
        let num_rows = columns.first().map(|c| c.len()).unwrap_or(0);
        if let Some((field, column)) = fields
            .iter()
            .zip(&columns)
            .find(|(_, c)| c.len() != num_rows)
        {
            return Err(MockDataError::ParseError {
                column: field.name.clone(),
                line: column.len(),
                reason: format!("column has {} rows, expected {}", column.len(), num_rows),
            });
        }
        Ok(Self {
            fields,
            columns,
            num_rows,
        })
    }

    /// Table with the given fields and no rows
    pub fn empty(fields: Vec<Field>) -> Self {
        let columns = fields
            .iter()
            .map(|f| ColumnData::with_capacity(f.column_type, 0))
            .collect();
        Self {
            fields,
            columns,
            num_rows: 0,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn columns(&self) -> &[ColumnData] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .map(|idx| &self.columns[idx])
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Values of row `index`, in column order
    pub fn row(&self, index: usize) -> Option<Vec<Value>> {
        if index >= self.num_rows {
            return None;
        }
        self.columns.iter().map(|c| c.get(index)).collect()
    }

    /// Copy of rows `start..start + len`, clamped to the table
    pub fn slice(&self, start: usize, len: usize) -> Table {
        let start = start.min(self.num_rows);
        let len = len.min(self.num_rows - start);
        Table {
            fields: self.fields.clone(),
            columns: self.columns.iter().map(|c| c.slice(start, len)).collect(),
            num_rows: len,
        }
    }

    /// Append all rows of `tables` (which must share `fields`) into one table
    pub fn concat(fields: Vec<Field>, tables: &[Table]) -> Result<Table> {
        let mut out = Table::empty(fields);
        for table in tables {
            if table.fields != out.fields {
                return Err(MockDataError::SchemaMismatch {
                    expected: out.fields.iter().map(|f| f.name.clone()).collect(),
                    found: table.fields.iter().map(|f| f.name.clone()).collect(),
                });
            }
            for (dst, src) in out.columns.iter_mut().zip(&table.columns) {
                dst.extend_from(src);
            }
            out.num_rows += table.num_rows;
        }
        Ok(out)
    }
}
