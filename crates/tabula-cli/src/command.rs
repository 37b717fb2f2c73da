//! Maps parsed subcommands onto client operations.

use tabula_client::{Client, ClientError, ColumnDescriptor, Table, TableDecoder, Transport};

use crate::cli::{CliCommand, ColumnAction, DatabaseAction, RowAction, TableAction, TableRef};

/// Result of running one subcommand.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// The server answered the liveness probe.
    Alive,
    /// The server answered with a table.
    Table(Table),
}

/// Runs `command` through `client`, forwarding `session_id` with every
/// request.
pub(crate) fn execute<T, D>(
    command: CliCommand,
    client: &Client<T, D>,
    session_id: &str,
) -> Result<Outcome, ClientError>
where
    T: Transport,
    D: TableDecoder,
{
    let table = match command {
        CliCommand::Ping => {
            client.ping()?;
            return Ok(Outcome::Alive);
        }
        CliCommand::Db { action } => database(action, client, session_id),
        CliCommand::Table { action } => table(action, client, session_id),
        CliCommand::Column { action } => column(action, client, session_id),
        CliCommand::Row { action } => row(action, client, session_id),
    }?;
    Ok(Outcome::Table(table))
}

fn database<T: Transport, D: TableDecoder>(
    action: DatabaseAction,
    client: &Client<T, D>,
    session: &str,
) -> Result<Table, ClientError> {
    match action {
        DatabaseAction::Show { database: None } => client.show_databases(session),
        DatabaseAction::Show {
            database: Some(database),
        } => client.show_tables(&database, session),
        DatabaseAction::Create { database } => client.create_database(&database, session),
        DatabaseAction::Rename { database, name } => {
            client.set_database_name(&database, &name, session)
        }
        DatabaseAction::Copy { database, name } => client.copy_database(&database, &name, session),
        DatabaseAction::Delete { database } => client.delete_database(&database, session),
    }
}

fn table<T: Transport, D: TableDecoder>(
    action: TableAction,
    client: &Client<T, D>,
    session: &str,
) -> Result<Table, ClientError> {
    match action {
        TableAction::Show {
            target: TableRef { database, table },
            columns,
            conditions,
        } => {
            let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
            let conditions: Vec<&str> = conditions.iter().map(String::as_str).collect();
            if !conditions.is_empty() {
                client.show_table_conditions(&database, &table, &columns, &conditions, session)
            } else if !columns.is_empty() {
                client.show_table_columns(&database, &table, &columns, session)
            } else {
                client.show_table(&database, &table, session)
            }
        }
        TableAction::Create {
            target: TableRef { database, table },
        } => client.create_table(&database, &table, session),
        TableAction::Rename {
            target: TableRef { database, table },
            name,
        } => client.set_table_name(&database, &table, &name, session),
        TableAction::Copy {
            target: TableRef { database, table },
            name,
        } => client.copy_table(&database, &table, &name, session),
        TableAction::Delete {
            target: TableRef { database, table },
        } => client.delete_table(&database, &table, session),
    }
}

fn column<T: Transport, D: TableDecoder>(
    action: ColumnAction,
    client: &Client<T, D>,
    session: &str,
) -> Result<Table, ClientError> {
    match action {
        ColumnAction::Show {
            target: TableRef { database, table },
            columns,
        } => {
            let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
            client.show_columns(&database, &table, &columns, session)
        }
        ColumnAction::Create {
            target: TableRef { database, table },
            name,
            kind,
            default,
        } => client.create_column(
            &database,
            &table,
            ColumnDescriptor::new(name, kind, default),
            session,
        ),
        ColumnAction::Rename {
            target: TableRef { database, table },
            column,
            name,
        } => client.set_column_name(&database, &table, &column, &name, session),
        ColumnAction::SetDefault {
            target: TableRef { database, table },
            column,
            value,
        } => client.set_column_default(&database, &table, &column, &value, session),
        ColumnAction::Copy {
            target: TableRef { database, table },
            column,
            name,
        } => client.copy_column(&database, &table, &column, &name, session),
        ColumnAction::Delete {
            target: TableRef { database, table },
            column,
        } => client.delete_column(&database, &table, &column, session),
    }
}

fn row<T: Transport, D: TableDecoder>(
    action: RowAction,
    client: &Client<T, D>,
    session: &str,
) -> Result<Table, ClientError> {
    match action {
        RowAction::Show {
            target: TableRef { database, table },
            row,
        } => client.show_row(&database, &table, row, session),
        RowAction::Create {
            target: TableRef { database, table },
            cells,
        } => client.create_row(&database, &table, cells, session),
        RowAction::Set {
            target: TableRef { database, table },
            row,
            column,
            value,
        } => client.set_row(&database, &table, row, &column, &value, session),
        RowAction::Copy {
            target: TableRef { database, table },
            row,
        } => client.copy_row(&database, &table, row, session),
        RowAction::Delete {
            target: TableRef { database, table },
            row,
        } => client.delete_row(&database, &table, row, session),
    }
}
