//! Table wire format and its typed in-memory form.
//!
//! Responses arrive as an untyped JSON table where every cell is text:
//!
//! ```json
//! {"name": "people",
//!  "columns": [{"name": "id", "type": "int", "default": "0"}],
//!  "rows": [["1"], ["2"]]}
//! ```
//!
//! [`bytes_to_untyped`] parses that shape and [`untyped_to_typed`] converts
//! each cell according to its column type. The [`TableDecoder`] trait lets the
//! dispatcher stay independent of the concrete format.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{ConversionError, DecodeError};

/// Name, type and default of a column, as text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Type name, for example `int` or `string`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Default value used for empty cells.
    #[serde(default)]
    pub default: String,
}

impl ColumnDescriptor {
    /// Describes a column by name, type and default.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            default: default.into(),
        }
    }
}

/// Table exactly as sent by the server: every cell is text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UntypedTable {
    /// Table name; empty for listings such as `show` at the root.
    #[serde(default)]
    pub name: String,
    /// Column descriptors in display order.
    pub columns: Vec<ColumnDescriptor>,
    /// Rows of cell text, one entry per column.
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Cell types understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CellType {
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float.
    Float,
    /// `true` or `false`.
    Bool,
    /// Free text.
    String,
}

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Integer cell.
    Int(i64),
    /// Float cell.
    Float(f64),
    /// Boolean cell.
    Bool(bool),
    /// Text cell.
    Text(String),
}

impl CellType {
    fn parse_cell(self, text: &str) -> Option<Cell> {
        match self {
            Self::Int => text.trim().parse().ok().map(Cell::Int),
            Self::Float => text.trim().parse().ok().map(Cell::Float),
            Self::Bool => text.trim().parse().ok().map(Cell::Bool),
            Self::String => Some(Cell::Text(text.to_owned())),
        }
    }
}

/// A column whose type has been resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedColumn {
    /// Column name.
    pub name: String,
    /// Resolved cell type.
    #[serde(rename = "type")]
    pub kind: CellType,
    /// Parsed default value.
    pub default: Cell,
}

/// Fully materialised, typed table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Typed columns.
    pub columns: Vec<TypedColumn>,
    /// Typed rows, one cell per column.
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Looks up a column position by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// Returns the cell at `row` in the named column.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }
}

/// Parses a response body into an untyped table.
///
/// # Errors
///
/// Returns [`DecodeError`] when the bytes are not JSON of the table shape;
/// an empty body is an error rather than an empty table.
pub fn bytes_to_untyped(bytes: &[u8]) -> Result<UntypedTable, DecodeError> {
    serde_json::from_slice(bytes).map_err(DecodeError)
}

/// Converts every column and cell of `untyped` to its declared type.
///
/// Empty cells take the column default.
///
/// # Errors
///
/// Returns [`ConversionError`] for unknown type names, values that do not
/// parse as their column type, and rows with the wrong number of cells.
pub fn untyped_to_typed(untyped: UntypedTable) -> Result<Table, ConversionError> {
    let columns = untyped
        .columns
        .into_iter()
        .map(type_column)
        .collect::<Result<Vec<_>, _>>()?;

    let rows = untyped
        .rows
        .into_iter()
        .enumerate()
        .map(|(position, row)| type_row(&columns, position, row))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Table {
        name: untyped.name,
        columns,
        rows,
    })
}

fn type_column(column: ColumnDescriptor) -> Result<TypedColumn, ConversionError> {
    let kind: CellType = column
        .kind
        .parse()
        .map_err(|_: strum::ParseError| ConversionError::UnknownType {
            column: column.name.clone(),
            kind: column.kind.clone(),
        })?;
    let default = if column.default.is_empty() {
        empty_cell(kind)
    } else {
        parse_or_reject(kind, &column.name, &column.default)?
    };
    Ok(TypedColumn {
        name: column.name,
        kind,
        default,
    })
}

fn type_row(
    columns: &[TypedColumn],
    position: usize,
    row: Vec<String>,
) -> Result<Vec<Cell>, ConversionError> {
    if row.len() != columns.len() {
        return Err(ConversionError::RowWidth {
            row: position,
            expected: columns.len(),
            found: row.len(),
        });
    }
    columns
        .iter()
        .zip(row)
        .map(|(column, text)| {
            if text.is_empty() {
                Ok(column.default.clone())
            } else {
                parse_or_reject(column.kind, &column.name, &text)
            }
        })
        .collect()
}

fn parse_or_reject(kind: CellType, column: &str, text: &str) -> Result<Cell, ConversionError> {
    kind.parse_cell(text)
        .ok_or_else(|| ConversionError::InvalidValue {
            column: column.to_owned(),
            kind: kind.to_string(),
            value: text.to_owned(),
        })
}

const fn empty_cell(kind: CellType) -> Cell {
    match kind {
        CellType::Int => Cell::Int(0),
        CellType::Float => Cell::Float(0.0),
        CellType::Bool => Cell::Bool(false),
        CellType::String => Cell::Text(String::new()),
    }
}

/// Decode boundary between response bytes and typed tables.
pub trait TableDecoder {
    /// Parses the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the body is not an untyped table.
    fn decode(&self, body: &[u8]) -> Result<UntypedTable, DecodeError>;

    /// Converts an untyped table into typed cells.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] when a column or cell cannot be typed.
    fn convert(&self, table: UntypedTable) -> Result<Table, ConversionError>;
}

/// Decoder for the JSON table format described in the module docs.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonTableDecoder;

impl TableDecoder for JsonTableDecoder {
    fn decode(&self, body: &[u8]) -> Result<UntypedTable, DecodeError> {
        bytes_to_untyped(body)
    }

    fn convert(&self, table: UntypedTable) -> Result<Table, ConversionError> {
        untyped_to_typed(table)
    }
}
