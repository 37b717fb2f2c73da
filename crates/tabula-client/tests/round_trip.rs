//! End-to-end round trips against a fake table server.

mod support;

use anyhow::Result;
use rstest::rstest;
use tabula_client::{Cell, CellType, Client, ClientError, ColumnDescriptor};
use tabula_config::ConnectionConfig;

use support::{CannedResponse, FakeServer};

const ITEMS: &str = r#"{"name":"items","columns":[
    {"name":"id","type":"int","default":"0"},
    {"name":"price","type":"float","default":"0"},
    {"name":"stocked","type":"bool","default":"false"},
    {"name":"label","type":"string","default":"none"}],
  "rows":[["1","9.5","true","pen"],["2","","false",""]]}"#;

fn client_for(server: &FakeServer) -> Result<Client> {
    let config: ConnectionConfig = server.url().parse()?;
    Ok(Client::new(config))
}

#[test]
fn show_table_posts_envelope_and_types_cells() -> Result<()> {
    let mut server = FakeServer::spawn(vec![CannedResponse::ok(ITEMS)])?;
    let client = client_for(&server)?;

    let table = client.show_table("shop", "items", "token-1")?;

    assert_eq!(table.name, "items");
    assert_eq!(table.columns[1].kind, CellType::Float);
    assert_eq!(table.cell(0, "price"), Some(&Cell::Float(9.5)));
    assert_eq!(table.cell(0, "stocked"), Some(&Cell::Bool(true)));
    // Empty cells take the column default.
    assert_eq!(table.cell(1, "price"), Some(&Cell::Float(0.0)));
    assert_eq!(table.cell(1, "label"), Some(&Cell::Text("none".to_owned())));

    let requests = server.take_requests()?;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/shop/items");
    assert_eq!(
        requests[0].body,
        r#"{"query":"show","sessionId":"token-1"}"#
    );
    Ok(())
}

#[test]
fn names_with_reserved_characters_arrive_as_single_segments() -> Result<()> {
    let mut server = FakeServer::spawn(vec![CannedResponse::ok(ITEMS)])?;
    let client = client_for(&server)?;

    client.show_table("my shop", "items?x=1", "")?;

    let requests = server.take_requests()?;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/my%20shop/items%3Fx=1");
    Ok(())
}

#[rstest]
#[case::not_found(404)]
#[case::server_error(500)]
fn error_statuses_still_return_the_table(#[case] status: u16) -> Result<()> {
    let body = r#"{"name":"error","columns":[{"name":"message","type":"string","default":""}],"rows":[["no such table"]]}"#;
    let mut server = FakeServer::spawn(vec![CannedResponse::with_status(status, body)])?;
    let client = client_for(&server)?;

    let table = client.delete_table("shop", "missing", "")?;
    assert_eq!(table.name, "error");
    assert_eq!(
        table.cell(0, "message"),
        Some(&Cell::Text("no such table".to_owned()))
    );
    server.take_requests()?;
    Ok(())
}

#[test]
fn column_creation_sends_the_encoded_descriptor() -> Result<()> {
    let empty = r#"{"name":"items","columns":[],"rows":[]}"#;
    let mut server = FakeServer::spawn(vec![CannedResponse::ok(empty)])?;
    let client = client_for(&server)?;

    client.create_column(
        "shop",
        "items",
        ColumnDescriptor::new("price", "float", "0"),
        "s",
    )?;

    let requests = server.take_requests()?;
    assert_eq!(
        requests[0].body,
        r#"{"query":"column create price:float:0","sessionId":"s"}"#
    );
    Ok(())
}

#[test]
fn non_table_body_is_a_decode_error() -> Result<()> {
    let mut server = FakeServer::spawn(vec![CannedResponse::ok("not json")])?;
    let client = client_for(&server)?;

    let error = client.show_databases("").unwrap_err();
    assert!(matches!(error, ClientError::Decode(_)));
    server.take_requests()?;
    Ok(())
}

#[test]
fn ping_reaches_the_server_root() -> Result<()> {
    let mut server = FakeServer::spawn(vec![CannedResponse::ok("")])?;
    let client = client_for(&server)?;

    client.ping()?;

    let requests = server.take_requests()?;
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/");
    Ok(())
}

#[test]
fn unreachable_server_is_a_transport_error() -> Result<()> {
    let server = FakeServer::spawn(Vec::new())?;
    let port = server.port();
    drop(server);
    let config: ConnectionConfig = format!("http://127.0.0.1:{port}").parse()?;

    let error = Client::new(config).show_databases("").unwrap_err();
    assert!(matches!(error, ClientError::Transport(_)));
    Ok(())
}

#[test]
fn health_check_uses_a_fresh_transport() -> Result<()> {
    let mut server = FakeServer::spawn(vec![CannedResponse::with_status(503, "")])?;
    let config: ConnectionConfig = server.url().parse()?;

    // Any HTTP answer, even an error status, means the server is alive.
    tabula_client::health::check(&config)?;

    assert_eq!(server.take_requests()?.len(), 1);
    Ok(())
}
