use super::*;

use std::ffi::OsString;

use anyhow::Result;
use rstest::{fixture, rstest};
use serde_json::Value;

#[path = "../../tabula-client/tests/support/mod.rs"]
mod support;

use support::{CannedResponse, FakeServer, RecordedRequest};

const ITEMS: &str = r#"{"name":"items","columns":[{"name":"id","type":"int","default":"0"},{"name":"label","type":"string","default":""}],"rows":[["1","pen"]]}"#;

struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

struct RunOutput {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn run_cli(config: Config, command: &[&str]) -> RunOutput {
    let mut args = vec![OsString::from("tabula")];
    args.extend(command.iter().map(OsString::from));
    let loader = StaticConfigLoader { config };
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit = {
        let mut io = IoStreams::new(&mut stdout, &mut stderr);
        run_with_loader(args, &mut io, &loader)
    };
    RunOutput {
        exit,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    }
}

fn config_for(server: &FakeServer) -> Config {
    Config {
        server: server.url(),
        session_id: String::from("token"),
        ..Config::default()
    }
}

#[fixture]
fn items_server() -> FakeServer {
    FakeServer::spawn(vec![CannedResponse::ok(ITEMS)]).expect("fake server starts")
}

fn run_against(
    mut server: FakeServer,
    command: &[&str],
) -> Result<(RunOutput, RecordedRequest)> {
    let outcome = run_cli(config_for(&server), command);
    let received = server
        .take_requests()?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no request reached the server"))?;
    Ok((outcome, received))
}

#[rstest]
#[case::list_databases(&["db", "show"], "/", "show")]
#[case::list_tables(&["db", "show", "shop"], "/shop", "show")]
#[case::rename_database(&["db", "rename", "shop", "store"], "/shop", "set name store")]
#[case::projected_table(
    &["table", "show", "shop", "items", "--columns", "id,label"],
    "/shop/items",
    "show id:label"
)]
#[case::filtered_table(
    &["table", "show", "shop", "items", "--columns", "id", "--where", "id>0", "--where", "label=pen"],
    "/shop/items",
    "show id where id>0 label=pen"
)]
#[case::filtered_without_projection(
    &["table", "show", "shop", "items", "--where", "x=1"],
    "/shop/items",
    "show where x=1"
)]
#[case::escaped_names(&["table", "show", "my shop", "a?b"], "/my%20shop/a%3Fb", "show")]
#[case::copy_table(&["table", "copy", "shop", "items", "spare"], "/shop/items", "copy spare")]
#[case::create_column(
    &["column", "create", "shop", "items", "price", "float", "0"],
    "/shop/items",
    "column create price:float:0"
)]
#[case::set_default(
    &["column", "set-default", "shop", "items", "label", "none"],
    "/shop/items",
    "column set default label none"
)]
#[case::create_row(
    &["row", "create", "shop", "items", "id=2", "label=x y"],
    "/shop/items",
    "row create id:2 label:x y"
)]
#[case::set_row(&["row", "set", "shop", "items", "0", "label", "ink"], "/shop/items", "row set 0:label ink")]
#[case::delete_row(&["row", "delete", "shop", "items", "3"], "/shop/items", "row delete 3")]
fn subcommands_post_encoded_queries(
    items_server: FakeServer,
    #[case] command: &[&str],
    #[case] path: &str,
    #[case] query: &str,
) -> Result<()> {
    let (outcome, received) = run_against(items_server, command)?;

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(received.method, "POST");
    assert_eq!(received.path, path);
    let envelope: Value = serde_json::from_str(&received.body)?;
    assert_eq!(envelope["query"], query);
    assert_eq!(envelope["sessionId"], "token");
    Ok(())
}

#[rstest]
fn table_is_printed_as_json(items_server: FakeServer) -> Result<()> {
    let (outcome, _) = run_against(items_server, &["table", "show", "shop", "items"])?;

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    let printed: Value = serde_json::from_str(&outcome.stdout)?;
    assert_eq!(printed["name"], "items");
    assert_eq!(printed["columns"][0]["type"], "int");
    assert_eq!(printed["rows"][0][0], 1);
    assert_eq!(printed["rows"][0][1], "pen");
    Ok(())
}

#[test]
fn error_status_still_prints_the_table() -> Result<()> {
    let body = r#"{"name":"error","columns":[{"name":"message","type":"string","default":""}],"rows":[["no such table"]]}"#;
    let server = FakeServer::spawn(vec![CannedResponse::with_status(404, body)])?;
    let (outcome, _) = run_against(server, &["table", "delete", "shop", "gone"])?;

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("no such table"));
    Ok(())
}

#[test]
fn ping_reports_a_reachable_server() -> Result<()> {
    let server = FakeServer::spawn(vec![CannedResponse::ok("")])?;
    let url = server.url();
    let (outcome, received) = run_against(server, &["ping"])?;

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(received.method, "GET");
    assert_eq!(outcome.stdout.trim(), format!("{url} is reachable"));
    Ok(())
}

#[test]
fn undecodable_response_fails() -> Result<()> {
    let server = FakeServer::spawn(vec![CannedResponse::ok("<html></html>")])?;
    let (outcome, _) = run_against(server, &["db", "show"])?;

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.starts_with("request failed"));
    assert!(outcome.stdout.is_empty());
    Ok(())
}

#[test]
fn unsupported_scheme_fails_before_any_request() {
    let config = Config {
        server: String::from("ftp://127.0.0.1:21"),
        ..Config::default()
    };
    let outcome = run_cli(config, &["db", "show"]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("unsupported server scheme"));
}

#[test]
fn server_with_a_path_fails_before_any_request() {
    let config = Config {
        server: String::from("http://127.0.0.1:5678/shop"),
        ..Config::default()
    };
    let outcome = run_cli(config, &["db", "show"]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("must not carry a path"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let outcome = run_cli(Config::default(), &[]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("Usage"));
}

#[test]
fn help_goes_to_stdout_and_succeeds() {
    let outcome = run_cli(Config::default(), &["--help"]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("Usage"));
    assert!(outcome.stderr.is_empty());
}

#[test]
fn malformed_row_cell_is_rejected_by_the_parser() {
    let outcome = run_cli(Config::default(), &["row", "create", "d", "t", "oops"]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("COLUMN=VALUE"));
}
