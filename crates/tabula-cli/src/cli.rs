//! CLI argument definitions for the `tabula` binary.
//!
//! Configuration flags (`--server`, `--session-id` and friends) are peeled
//! off before these definitions see the arguments; see `config.rs`.

use clap::{Args, Parser, Subcommand};
use tabula_client::CellAssignment;

/// Command-line client for a hierarchical table server.
#[derive(Parser, Debug)]
#[command(name = "tabula", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// What to operate on.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Entity kinds the CLI can address.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Checks that the server answers on its root address.
    Ping,
    /// Lists, creates, renames, copies or deletes databases.
    Db {
        #[command(subcommand)]
        action: DatabaseAction,
    },
    /// Shows, creates, renames, copies or deletes tables.
    Table {
        #[command(subcommand)]
        action: TableAction,
    },
    /// Manages the columns of a table.
    Column {
        #[command(subcommand)]
        action: ColumnAction,
    },
    /// Manages the rows of a table.
    Row {
        #[command(subcommand)]
        action: RowAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum DatabaseAction {
    /// Lists every database, or the tables of one database.
    Show { database: Option<String> },
    /// Creates a database.
    Create { database: String },
    /// Renames a database.
    Rename { database: String, name: String },
    /// Copies a database under a new name.
    Copy { database: String, name: String },
    /// Deletes a database.
    Delete { database: String },
}

/// A table inside a database.
#[derive(Args, Debug, Clone)]
pub(crate) struct TableRef {
    /// Database owning the table.
    pub(crate) database: String,
    /// Table name.
    pub(crate) table: String,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum TableAction {
    /// Shows a table, optionally projected and filtered.
    Show {
        #[command(flatten)]
        target: TableRef,
        /// Columns to include, comma separated.
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
        /// Row condition such as `price>10`; repeat for several.
        #[arg(long = "where", value_name = "CONDITION")]
        conditions: Vec<String>,
    },
    /// Creates a table.
    Create {
        #[command(flatten)]
        target: TableRef,
    },
    /// Renames a table.
    Rename {
        #[command(flatten)]
        target: TableRef,
        name: String,
    },
    /// Copies a table under a new name.
    Copy {
        #[command(flatten)]
        target: TableRef,
        name: String,
    },
    /// Deletes a table.
    Delete {
        #[command(flatten)]
        target: TableRef,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ColumnAction {
    /// Shows one or more columns.
    Show {
        #[command(flatten)]
        target: TableRef,
        #[arg(required = true)]
        columns: Vec<String>,
    },
    /// Adds a column.
    Create {
        #[command(flatten)]
        target: TableRef,
        name: String,
        /// Cell type: int, float, bool or string.
        #[arg(value_name = "TYPE")]
        kind: String,
        #[arg(default_value = "")]
        default: String,
    },
    /// Renames a column.
    Rename {
        #[command(flatten)]
        target: TableRef,
        column: String,
        name: String,
    },
    /// Changes the default value of a column.
    SetDefault {
        #[command(flatten)]
        target: TableRef,
        column: String,
        value: String,
    },
    /// Copies a column under a new name.
    Copy {
        #[command(flatten)]
        target: TableRef,
        column: String,
        name: String,
    },
    /// Deletes a column.
    Delete {
        #[command(flatten)]
        target: TableRef,
        column: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum RowAction {
    /// Shows one row.
    Show {
        #[command(flatten)]
        target: TableRef,
        row: usize,
    },
    /// Appends a row from `column=value` pairs.
    Create {
        #[command(flatten)]
        target: TableRef,
        #[arg(value_name = "COLUMN=VALUE", value_parser = parse_assignment)]
        cells: Vec<CellAssignment>,
    },
    /// Sets one cell.
    Set {
        #[command(flatten)]
        target: TableRef,
        row: usize,
        column: String,
        value: String,
    },
    /// Duplicates a row.
    Copy {
        #[command(flatten)]
        target: TableRef,
        row: usize,
    },
    /// Deletes a row.
    Delete {
        #[command(flatten)]
        target: TableRef,
        row: usize,
    },
}

fn parse_assignment(raw: &str) -> Result<CellAssignment, String> {
    raw.split_once('=')
        .filter(|(column, _)| !column.is_empty())
        .map(|(column, value)| CellAssignment::new(column, value))
        .ok_or_else(|| format!("expected COLUMN=VALUE, got '{raw}'"))
}
