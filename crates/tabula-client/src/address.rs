//! Resource addresses on the table server.
//!
//! An address names the root, a database, or a table inside a database:
//! `{scheme}://{host}[:{port}][/{database}[/{table}]]`. A table always needs
//! the database that owns it.

use std::fmt;

use tabula_config::{ConnectionConfig, Protocol};
use url::Url;

use crate::error::AddressError;

/// Fully validated location of a server resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    protocol: Protocol,
    host: String,
    port: Option<String>,
    database: Option<String>,
    table: Option<String>,
}

impl Address {
    /// Address of the server root.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::MissingHost`] when `config` carries no host.
    pub fn root(config: &ConnectionConfig) -> Result<Self, AddressError> {
        build_address("", "", config)
    }

    /// Database named by this address, if any.
    #[must_use]
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Table named by this address, if any.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Renders the address as a URL string, names unescaped.
    #[must_use]
    pub fn as_url(&self) -> String {
        self.to_string()
    }

    /// Renders the address as a request URL with the database and table
    /// names percent-encoded as path segments.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] when the scheme, host and port do not form
    /// a valid URL.
    pub fn to_request_url(&self) -> Result<Url, url::ParseError> {
        let mut root = String::from(self.protocol.prefix());
        root.push_str(&self.host);
        if let Some(port) = &self.port {
            root.push(':');
            root.push_str(port);
        }
        let mut url = Url::parse(&root)?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(self.database.iter().chain(self.table.iter()));
        }
        Ok(url)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.protocol.prefix())?;
        formatter.write_str(&self.host)?;
        if let Some(port) = &self.port {
            write!(formatter, ":{port}")?;
        }
        if let Some(database) = &self.database {
            write!(formatter, "/{database}")?;
        }
        if let Some(table) = &self.table {
            write!(formatter, "/{table}")?;
        }
        Ok(())
    }
}

/// Builds the address of `table` inside `database` on the configured server.
///
/// Empty names mean "unset": an empty `table` addresses the database, and
/// empty `table` and `database` address the root.
///
/// # Errors
///
/// Returns [`AddressError::MissingHost`] when the host is empty, and
/// [`AddressError::TableWithoutDatabase`] when a table is named without a
/// database.
pub fn build_address(
    table: &str,
    database: &str,
    config: &ConnectionConfig,
) -> Result<Address, AddressError> {
    if config.host.is_empty() {
        return Err(AddressError::MissingHost);
    }
    if !table.is_empty() && database.is_empty() {
        return Err(AddressError::TableWithoutDatabase {
            table: table.to_owned(),
        });
    }

    Ok(Address {
        protocol: config.protocol,
        host: config.host.clone(),
        port: non_empty(&config.port),
        database: non_empty(database),
        table: non_empty(table),
    })
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}
