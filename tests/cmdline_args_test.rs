//! Tests for command-line argument parsing
//!
//! Note: These tests verify the argument parser configuration by creating
//! a test parser with the same structure as the main application.

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Create a command with the same argument structure as the main binary
fn create_test_command() -> ClapCommand {
    ClapCommand::new("blink-morse")
        .version("0.1.0")
        .about("Blink-to-symbol decoder")
        .arg(
            Arg::new("replay")
                .short('r')
                .long("replay")
                .value_name("PATH")
                .required_unless_present("print-config")
                .help("Recorded landmark frames"),
        )
        .arg(
            Arg::new("config")
                .short('C')
                .long("config")
                .value_name("PATH")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("address")
                .short('a')
                .long("address")
                .value_name("HOST")
                .help("Actuator address"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .value_parser(clap::value_parser!(u16))
                .help("Actuator UDP port"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Log commands instead of sending them"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debug output"),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .action(ArgAction::SetTrue)
                .help("Print an example configuration file and exit"),
        )
}

#[test]
fn test_help_argument() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["blink-morse", "--help"]);

    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn test_replay_required() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["blink-morse"]);

    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().kind(),
        clap::error::ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn test_print_config_without_replay() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["blink-morse", "--print-config"]);

    assert!(result.is_ok());
    assert!(result.unwrap().get_flag("print-config"));
}

#[test]
fn test_replay_argument() {
    let cmd = create_test_command();
    let matches = cmd
        .try_get_matches_from(vec!["blink-morse", "-r", "session.jsonl"])
        .unwrap();

    assert_eq!(
        matches.get_one::<String>("replay").map(|s| s.as_str()),
        Some("session.jsonl")
    );
    assert!(!matches.get_flag("dry-run"));
    assert!(!matches.get_flag("debug"));
}

#[test]
fn test_port_must_be_numeric() {
    for port in ["abc", "70000", "-1"] {
        let cmd = create_test_command();
        let result = cmd.try_get_matches_from(vec!["blink-morse", "-r", "a.jsonl", "--port", port]);
        assert!(result.is_err(), "Should reject port: {}", port);
    }
}

#[test]
fn test_boolean_flags() {
    for flag in ["dry-run", "debug"] {
        let cmd = create_test_command();
        let long = format!("--{flag}");
        let matches = cmd
            .try_get_matches_from(vec!["blink-morse", "-r", "a.jsonl", long.as_str()])
            .unwrap();
        assert!(matches.get_flag(flag), "Flag {} should be set", flag);
    }
}

#[test]
fn test_multiple_arguments() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec![
        "blink-morse",
        "--replay",
        "session.jsonl",
        "-C",
        "blink.yaml",
        "--address",
        "192.168.4.1",
        "-p",
        "5000",
        "-d",
    ]);

    assert!(result.is_ok());
    let matches = result.unwrap();
    assert_eq!(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        Some("blink.yaml")
    );
    assert_eq!(
        matches.get_one::<String>("address").map(|s| s.as_str()),
        Some("192.168.4.1")
    );
    assert_eq!(matches.get_one::<u16>("port"), Some(&5000));
    assert!(matches.get_flag("debug"));
}
