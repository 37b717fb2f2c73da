//! Command model for the server's line-oriented query language.
//!
//! A [`Command`] is a tagged value: the arm picks the target kind (the
//! addressed database or table, one of its columns, or one of its rows) and
//! the inner verb carries the operands. Encoding is a pure `Display`
//! implementation, so the exact text sent on the wire can be checked without
//! a server.
//!
//! Flat name lists are joined with `:`; `name:value` pairs and condition
//! clauses are joined with a single space. Operands are passed through
//! verbatim; the server is the only authority on whether they are valid.

use std::fmt;

use crate::table::ColumnDescriptor;

/// Zero-based row number as understood by the server.
pub type RowIndex = usize;

/// One query line addressed to a database, table, column or row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Verbs applied to the addressed database or table itself.
    Store(StoreVerb),
    /// Verbs prefixed with `column`.
    Column(ColumnVerb),
    /// Verbs prefixed with `row`.
    Row(RowVerb),
}

/// Verbs on the addressed root, database or table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreVerb {
    /// `show`, optionally restricted to columns and filtered by conditions.
    Show {
        /// Columns to project; empty shows everything.
        columns: Vec<String>,
        /// Condition clauses; empty applies no filter.
        conditions: Vec<String>,
    },
    /// `create`.
    Create,
    /// `set name <name>`.
    SetName(String),
    /// `copy <name>`.
    Copy(String),
    /// `delete`.
    Delete,
}

/// Verbs on columns of the addressed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnVerb {
    /// `column show <a:b:...>`.
    Show(Vec<String>),
    /// `column create <name>:<type>:<default>`.
    Create(ColumnDescriptor),
    /// `column set name <column> <name>`.
    SetName {
        /// Current column name.
        column: String,
        /// New column name.
        name: String,
    },
    /// `column set default <column> <value>`.
    SetDefault {
        /// Column to update.
        column: String,
        /// New default value.
        value: String,
    },
    /// `column copy <column> <name>`.
    Copy {
        /// Column to copy.
        column: String,
        /// Name of the copy.
        name: String,
    },
    /// `column delete <column>`.
    Delete(String),
}

/// Verbs on rows of the addressed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowVerb {
    /// `row show <index>`.
    Show(RowIndex),
    /// `row create <column:value ...>`.
    Create(Vec<CellAssignment>),
    /// `row set <index>:<column> <value>`.
    Set {
        /// Row to update.
        row: RowIndex,
        /// Column to update.
        column: String,
        /// New cell value.
        value: String,
    },
    /// `row copy <index>`.
    Copy(RowIndex),
    /// `row delete <index>`.
    Delete(RowIndex),
}

/// A `column:value` pair used when creating a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAssignment {
    /// Column receiving the value.
    pub column: String,
    /// Cell text.
    pub value: String,
}

impl CellAssignment {
    /// Pairs a column with the value it should receive.
    #[must_use]
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl<C: Into<String>, V: Into<String>> From<(C, V)> for CellAssignment {
    fn from((column, value): (C, V)) -> Self {
        Self::new(column, value)
    }
}

impl Command {
    /// `show`: lists databases at the root, tables of a database, or a table.
    #[must_use]
    pub const fn show() -> Self {
        Self::Store(StoreVerb::Show {
            columns: Vec::new(),
            conditions: Vec::new(),
        })
    }

    /// `show a:b:c`: a table restricted to the named columns.
    #[must_use]
    pub const fn show_columns(columns: Vec<String>) -> Self {
        Self::Store(StoreVerb::Show {
            columns,
            conditions: Vec::new(),
        })
    }

    /// `show a:b:c where x=1 y=2`: a filtered projection of a table.
    ///
    /// With no columns the projection is omitted and every column is
    /// filtered: `show where x=1`.
    #[must_use]
    pub const fn show_where(columns: Vec<String>, conditions: Vec<String>) -> Self {
        Self::Store(StoreVerb::Show {
            columns,
            conditions,
        })
    }

    /// `create`.
    #[must_use]
    pub const fn create() -> Self {
        Self::Store(StoreVerb::Create)
    }

    /// `set name <name>`.
    #[must_use]
    pub fn set_name(name: impl Into<String>) -> Self {
        Self::Store(StoreVerb::SetName(name.into()))
    }

    /// `copy <name>`.
    #[must_use]
    pub fn copy(name: impl Into<String>) -> Self {
        Self::Store(StoreVerb::Copy(name.into()))
    }

    /// `delete`.
    #[must_use]
    pub const fn delete() -> Self {
        Self::Store(StoreVerb::Delete)
    }

    /// `column show <names>`.
    #[must_use]
    pub const fn column_show(columns: Vec<String>) -> Self {
        Self::Column(ColumnVerb::Show(columns))
    }

    /// `column create <name>:<type>:<default>`.
    #[must_use]
    pub const fn column_create(column: ColumnDescriptor) -> Self {
        Self::Column(ColumnVerb::Create(column))
    }

    /// `column set name <column> <name>`.
    #[must_use]
    pub fn column_set_name(column: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column(ColumnVerb::SetName {
            column: column.into(),
            name: name.into(),
        })
    }

    /// `column set default <column> <value>`.
    #[must_use]
    pub fn column_set_default(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Column(ColumnVerb::SetDefault {
            column: column.into(),
            value: value.into(),
        })
    }

    /// `column copy <column> <name>`.
    #[must_use]
    pub fn column_copy(column: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column(ColumnVerb::Copy {
            column: column.into(),
            name: name.into(),
        })
    }

    /// `column delete <column>`.
    #[must_use]
    pub fn column_delete(column: impl Into<String>) -> Self {
        Self::Column(ColumnVerb::Delete(column.into()))
    }

    /// `row show <index>`.
    #[must_use]
    pub const fn row_show(row: RowIndex) -> Self {
        Self::Row(RowVerb::Show(row))
    }

    /// `row create <column:value ...>`.
    #[must_use]
    pub const fn row_create(cells: Vec<CellAssignment>) -> Self {
        Self::Row(RowVerb::Create(cells))
    }

    /// `row set <index>:<column> <value>`.
    #[must_use]
    pub fn row_set(row: RowIndex, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Row(RowVerb::Set {
            row,
            column: column.into(),
            value: value.into(),
        })
    }

    /// `row copy <index>`.
    #[must_use]
    pub const fn row_copy(row: RowIndex) -> Self {
        Self::Row(RowVerb::Copy(row))
    }

    /// `row delete <index>`.
    #[must_use]
    pub const fn row_delete(row: RowIndex) -> Self {
        Self::Row(RowVerb::Delete(row))
    }

    /// Encodes the command as the query line sent to the server.
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(verb) => fmt::Display::fmt(verb, formatter),
            Self::Column(verb) => write!(formatter, "column {verb}"),
            Self::Row(verb) => write!(formatter, "row {verb}"),
        }
    }
}

impl fmt::Display for StoreVerb {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show {
                columns,
                conditions,
            } => {
                formatter.write_str("show")?;
                if !columns.is_empty() {
                    write!(formatter, " {}", columns.join(":"))?;
                }
                if !conditions.is_empty() {
                    write!(formatter, " where {}", conditions.join(" "))?;
                }
                Ok(())
            }
            Self::Create => formatter.write_str("create"),
            Self::SetName(name) => write!(formatter, "set name {name}"),
            Self::Copy(name) => write!(formatter, "copy {name}"),
            Self::Delete => formatter.write_str("delete"),
        }
    }
}

impl fmt::Display for ColumnVerb {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show(columns) if columns.is_empty() => formatter.write_str("show"),
            Self::Show(columns) => write!(formatter, "show {}", columns.join(":")),
            Self::Create(column) => write!(
                formatter,
                "create {}:{}:{}",
                column.name, column.kind, column.default
            ),
            Self::SetName { column, name } => write!(formatter, "set name {column} {name}"),
            Self::SetDefault { column, value } => {
                write!(formatter, "set default {column} {value}")
            }
            Self::Copy { column, name } => write!(formatter, "copy {column} {name}"),
            Self::Delete(column) => write!(formatter, "delete {column}"),
        }
    }
}

impl fmt::Display for RowVerb {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show(row) => write!(formatter, "show {row}"),
            Self::Create(cells) => {
                formatter.write_str("create")?;
                for cell in cells {
                    write!(formatter, " {}:{}", cell.column, cell.value)?;
                }
                Ok(())
            }
            Self::Set { row, column, value } => write!(formatter, "set {row}:{column} {value}"),
            Self::Copy(row) => write!(formatter, "copy {row}"),
            Self::Delete(row) => write!(formatter, "delete {row}"),
        }
    }
}
