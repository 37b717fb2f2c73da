//! Operation façade: one method per entity kind and verb.
//!
//! Every method builds an address, encodes a command, wraps it in an
//! envelope with the caller's session token and dispatches exactly one
//! request. The client holds no session state; the token is threaded
//! through each call by the caller.

use tabula_config::ConnectionConfig;
use tracing::debug;

use crate::address::build_address;
use crate::command::{CellAssignment, Command, RowIndex};
use crate::dispatch::Dispatcher;
use crate::envelope::{Envelope, build_request};
use crate::error::ClientError;
use crate::health;
use crate::table::{ColumnDescriptor, JsonTableDecoder, Table, TableDecoder};
use crate::transport::{Transport, UreqTransport};

/// Client for a table server.
///
/// # Example
///
/// ```no_run
/// use tabula_client::{Client, ColumnDescriptor};
/// use tabula_config::{ConnectionConfig, Protocol};
///
/// # fn main() -> Result<(), tabula_client::ClientError> {
/// let client = Client::new(ConnectionConfig::new(Protocol::Http, "127.0.0.1", "5678"));
/// client.create_database("shop", "")?;
/// client.create_table("shop", "items", "")?;
/// client.create_column("shop", "items", ColumnDescriptor::new("price", "float", "0"), "")?;
/// let items = client.show_table("shop", "items", "")?;
/// println!("{} rows", items.rows.len());
/// # Ok(())
/// # }
/// ```
pub struct Client<T = UreqTransport, D = JsonTableDecoder> {
    config: ConnectionConfig,
    dispatcher: Dispatcher<T, D>,
}

impl Client {
    /// Creates a client using the blocking `ureq` transport and the JSON
    /// table decoder.
    #[must_use]
    pub fn new(config: ConnectionConfig) -> Self {
        let transport = UreqTransport::from_connection(&config);
        Self::with_parts(config, transport, JsonTableDecoder)
    }
}

impl<T, D> Client<T, D>
where
    T: Transport,
    D: TableDecoder,
{
    /// Creates a client from explicit transport and decoder implementations.
    #[must_use]
    pub const fn with_parts(config: ConnectionConfig, transport: T, decoder: D) -> Self {
        Self {
            config,
            dispatcher: Dispatcher::new(transport, decoder),
        }
    }

    /// Connection parameters used for every request.
    #[must_use]
    pub const fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Sends `command` to `table` in `database`; empty names address a
    /// higher level of the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] for address, encoding, transport, read,
    /// decode and conversion failures.
    pub fn request(
        &self,
        database: &str,
        table: &str,
        command: &Command,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        let address = build_address(table, database, &self.config)?;
        let envelope = Envelope::for_command(command, session_id);
        debug!(target: "tabula::client", %address, query = %envelope.query, "sending command");
        let request = build_request(&envelope, &address)?;
        self.dispatcher.dispatch(request)
    }

    /// Checks that the server answers a GET on its root address.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Address`] or [`ClientError::Transport`].
    pub fn ping(&self) -> Result<(), ClientError> {
        health::check_with(self.dispatcher.transport(), &self.config)
    }

    // Root

    /// Lists databases.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn show_databases(&self, session_id: &str) -> Result<Table, ClientError> {
        self.request("", "", &Command::show(), session_id)
    }

    // Database

    /// Lists the tables of `database`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn show_tables(&self, database: &str, session_id: &str) -> Result<Table, ClientError> {
        self.request(database, "", &Command::show(), session_id)
    }

    /// Creates `database`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn create_database(&self, database: &str, session_id: &str) -> Result<Table, ClientError> {
        self.request(database, "", &Command::create(), session_id)
    }

    /// Renames `database` to `name`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn set_database_name(
        &self,
        database: &str,
        name: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, "", &Command::set_name(name), session_id)
    }

    /// Copies `database` to a new database called `name`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn copy_database(
        &self,
        database: &str,
        name: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, "", &Command::copy(name), session_id)
    }

    /// Deletes `database`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn delete_database(&self, database: &str, session_id: &str) -> Result<Table, ClientError> {
        self.request(database, "", &Command::delete(), session_id)
    }

    // Table

    /// Shows every column and row of `table`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn show_table(
        &self,
        database: &str,
        table: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::show(), session_id)
    }

    /// Shows `table` restricted to `columns`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn show_table_columns(
        &self,
        database: &str,
        table: &str,
        columns: &[&str],
        session_id: &str,
    ) -> Result<Table, ClientError> {
        let command = Command::show_columns(owned(columns));
        self.request(database, table, &command, session_id)
    }

    /// Shows `columns` of the rows of `table` matching `conditions`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn show_table_conditions(
        &self,
        database: &str,
        table: &str,
        columns: &[&str],
        conditions: &[&str],
        session_id: &str,
    ) -> Result<Table, ClientError> {
        let command = Command::show_where(owned(columns), owned(conditions));
        self.request(database, table, &command, session_id)
    }

    /// Creates `table` in `database`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn create_table(
        &self,
        database: &str,
        table: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::create(), session_id)
    }

    /// Renames `table` to `name`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn set_table_name(
        &self,
        database: &str,
        table: &str,
        name: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::set_name(name), session_id)
    }

    /// Copies `table` to a new table called `name`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn copy_table(
        &self,
        database: &str,
        table: &str,
        name: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::copy(name), session_id)
    }

    /// Deletes `table`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn delete_table(
        &self,
        database: &str,
        table: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::delete(), session_id)
    }

    // Column

    /// Shows the single column `column`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn show_column(
        &self,
        database: &str,
        table: &str,
        column: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.show_columns(database, table, &[column], session_id)
    }

    /// Shows the named columns.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn show_columns(
        &self,
        database: &str,
        table: &str,
        columns: &[&str],
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::column_show(owned(columns)), session_id)
    }

    /// Adds a column described by `column`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn create_column(
        &self,
        database: &str,
        table: &str,
        column: ColumnDescriptor,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::column_create(column), session_id)
    }

    /// Renames `column` to `name`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn set_column_name(
        &self,
        database: &str,
        table: &str,
        column: &str,
        name: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        let command = Command::column_set_name(column, name);
        self.request(database, table, &command, session_id)
    }

    /// Changes the default value of `column`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn set_column_default(
        &self,
        database: &str,
        table: &str,
        column: &str,
        default: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        let command = Command::column_set_default(column, default);
        self.request(database, table, &command, session_id)
    }

    /// Copies `column` to a new column called `name`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn copy_column(
        &self,
        database: &str,
        table: &str,
        column: &str,
        name: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::column_copy(column, name), session_id)
    }

    /// Deletes `column`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn delete_column(
        &self,
        database: &str,
        table: &str,
        column: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::column_delete(column), session_id)
    }

    // Row

    /// Shows row `row`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn show_row(
        &self,
        database: &str,
        table: &str,
        row: RowIndex,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::row_show(row), session_id)
    }

    /// Appends a row with the given cell values; unnamed columns take their
    /// defaults on the server.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn create_row(
        &self,
        database: &str,
        table: &str,
        cells: Vec<CellAssignment>,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::row_create(cells), session_id)
    }

    /// Sets the cell of `row` in `column` to `value`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn set_row(
        &self,
        database: &str,
        table: &str,
        row: RowIndex,
        column: &str,
        value: &str,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::row_set(row, column, value), session_id)
    }

    /// Duplicates row `row`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn copy_row(
        &self,
        database: &str,
        table: &str,
        row: RowIndex,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::row_copy(row), session_id)
    }

    /// Deletes row `row`.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn delete_row(
        &self,
        database: &str,
        table: &str,
        row: RowIndex,
        session_id: &str,
    ) -> Result<Table, ClientError> {
        self.request(database, table, &Command::row_delete(row), session_id)
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}
