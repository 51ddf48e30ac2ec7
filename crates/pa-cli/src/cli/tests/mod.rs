//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_add() {
    match parse(&["page-analyzer", "add", "https://example.com/page"]) {
        CliCommand::Add { url } => assert_eq!(url, "https://example.com/page"),
        _ => panic!("expected Add"),
    }
}

#[test]
fn cli_parse_list() {
    match parse(&["page-analyzer", "list"]) {
        CliCommand::List => {}
        _ => panic!("expected List"),
    }
}

#[test]
fn cli_parse_show() {
    match parse(&["page-analyzer", "show", "7"]) {
        CliCommand::Show { id } => assert_eq!(id, 7),
        _ => panic!("expected Show"),
    }
}

#[test]
fn cli_parse_check() {
    match parse(&["page-analyzer", "check", "42"]) {
        CliCommand::Check { id } => assert_eq!(id, 42),
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_global_db_flag() {
    let cli = Cli::try_parse_from(["page-analyzer", "list", "--db", "/tmp/urls.db"]).unwrap();
    assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/urls.db")));
    assert!(matches!(cli.command, CliCommand::List));

    let cli = Cli::try_parse_from(["page-analyzer", "--db", "x.db", "check", "1"]).unwrap();
    assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("x.db")));
}

#[test]
fn cli_rejects_non_numeric_id() {
    assert!(Cli::try_parse_from(["page-analyzer", "show", "abc"]).is_err());
    assert!(Cli::try_parse_from(["page-analyzer", "check"]).is_err());
}
