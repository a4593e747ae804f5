//! Tests for CLI parsing and command dispatch

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use reacs_onto::cli::args::{Commands, Format};
use reacs_onto::cli::commands::execute_command;
use reacs_onto::cli::{Cli, CliError};
use reacs_onto::exitcode;

fn project(table: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("data")).unwrap();
    std::fs::write(temp.path().join("data/manual_reacs_mapping.csv"), table).unwrap();
    temp
}

fn run(args: &[&str]) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(args).expect("parse args");
    execute_command(&cli)
}

#[test]
fn given_no_subcommand_when_parsing_then_command_is_none() {
    let cli = Cli::try_parse_from(["reacs-onto"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.debug, 0);
}

#[rstest]
#[case(&["reacs-onto", "render"], Format::Turtle)]
#[case(&["reacs-onto", "render", "--format", "json"], Format::Json)]
fn given_render_args_when_parsing_then_format_is_selected(#[case] args: &[&str], #[case] expected: Format) {
    let cli = Cli::try_parse_from(args).unwrap();
    match cli.command {
        Some(Commands::Render { format }) => assert_eq!(format, expected),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn given_project_dir_when_running_default_then_builds_artifacts() {
    // Arrange
    let temp = project("letter;id;name\nA;01;Сельское хозяйство\nA;01;Растениеводство\n");
    let dir = temp.path().to_str().unwrap();

    // Act
    run(&["reacs-onto", "-C", dir]).unwrap();

    // Assert
    assert!(temp.path().join("build/reacs_mappped.json").exists());
    assert!(temp.path().join("build/reacs-ontology.ttl").exists());
}

#[test]
fn given_build_dir_flag_when_building_then_writes_there() {
    // Arrange
    let temp = project("letter;id;name\nA;01;Сельское хозяйство\n");
    let dir = temp.path().to_str().unwrap();
    let out = temp.path().join("artifacts");

    // Act
    run(&["reacs-onto", "-C", dir, "build", "--build-dir", out.to_str().unwrap()]).unwrap();

    // Assert
    assert!(out.join("reacs-ontology.ttl").exists());
}

#[test]
fn given_relative_paths_when_building_then_resolved_against_project_dir() {
    // Arrange
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("tables")).unwrap();
    std::fs::write(
        temp.path().join("tables/reacs.csv"),
        "letter;id;name\nA;01;Сельское хозяйство\n",
    )
    .unwrap();
    let dir = temp.path().to_str().unwrap();

    // Act
    run(&[
        "reacs-onto", "-C", dir, "-i", "tables/reacs.csv", "build", "--build-dir", "artifacts",
    ])
    .unwrap();

    // Assert
    assert!(temp.path().join("artifacts/reacs-ontology.ttl").exists());
    assert!(temp.path().join("artifacts/reacs_mappped.json").exists());
}

#[rstest]
#[case("letter;id;name\nA;01;x\nA;01.1.1.1;y\n", exitcode::DATAERR)]
#[case("letter;id;name\nA;01;x\nA;01.11;y\n", exitcode::DATAERR)]
#[case("letter;name\nA;x\n", exitcode::DATAERR)]
fn given_bad_table_when_building_then_exit_code_is_dataerr(#[case] table: &str, #[case] code: i32) {
    // Arrange
    let temp = project(table);
    let dir = temp.path().to_str().unwrap();

    // Act
    let err = run(&["reacs-onto", "-C", dir, "build"]).unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), code);
    assert!(!temp.path().join("build").exists());
}

#[test]
fn given_missing_input_when_building_then_exit_code_is_noinput() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_str().unwrap();

    let err = run(&["reacs-onto", "-C", dir]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_unknown_letter_when_showing_tree_then_usage_error() {
    let temp = project("letter;id;name\nA;01;Сельское хозяйство\n");
    let dir = temp.path().to_str().unwrap();

    let err = run(&["reacs-onto", "-C", dir, "tree", "--letter", "Z"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_missing_project_dir_when_running_then_usage_error() {
    let err = run(&["reacs-onto", "-C", "/nonexistent/reacs/project", "stats"]).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_config_init_twice_when_running_then_second_fails() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_str().unwrap();

    // Act
    run(&["reacs-onto", "-C", dir, "config", "init"]).unwrap();
    let second = run(&["reacs-onto", "-C", dir, "config", "init"]);

    // Assert
    assert!(temp.path().join("reacs-onto.toml").exists());
    assert!(matches!(second, Err(CliError::Usage(_))));
}
