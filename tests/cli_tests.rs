use clap::Parser;
use std::process::Command;
use token_registry::{Cli, Commands, CssColorFormat, ScssColorFormat, TokenType};

#[test]
fn test_cli_parse_basic() {
    let args = vec!["token-registry-cli", "convert", "-i", "tokens/*.json"];

    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Convert(args) => {
            assert_eq!(args.input, vec!["tokens/*.json"]);
            assert!(args.output.is_none());
            assert!(args.config.is_none());
            assert!(args.render.color_format.is_none());
            assert!(args.render.fallback.is_none());
            assert!(!args.render.no_fallback);
            assert!(!args.minify);
            assert!(!args.verbose);
        }
        Commands::Detect(_) => panic!("Unexpected Detect command"),
    }
}

#[test]
fn test_cli_parse_with_flags() {
    let args = vec![
        "token-registry-cli",
        "convert",
        "-i", "tokens/*.json",
        "-i", "variables/*.json",
        "-e", "**/draft-*.json",
        "-o", "dist/report.json",
        "-c", "tokens.yaml",
        "--color-format", "oklch",
        "--scss-color-format", "hsl",
        "--fallback", "number",
        "--minify",
        "--verbose",
        "-j", "4",
    ];

    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Convert(args) => {
            assert_eq!(args.input, vec!["tokens/*.json", "variables/*.json"]);
            assert_eq!(args.exclude, vec!["**/draft-*.json"]);
            assert_eq!(args.output.unwrap().to_str().unwrap(), "dist/report.json");
            assert_eq!(args.config.unwrap().to_str().unwrap(), "tokens.yaml");
            assert_eq!(args.render.color_format, Some(CssColorFormat::Oklch));
            assert_eq!(args.render.scss_color_format, Some(ScssColorFormat::Hsl));
            assert_eq!(args.render.fallback, Some(TokenType::Number));
            assert!(args.minify);
            assert!(args.verbose);
            assert_eq!(args.jobs, Some(4));
        }
        Commands::Detect(_) => panic!("Unexpected Detect command"),
    }
}

#[test]
fn test_cli_rejects_unknown_color_format() {
    let result = Cli::try_parse_from(vec![
        "token-registry-cli",
        "convert",
        "-i", "*.json",
        "--color-format", "cmyk",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_fallback_conflicts_with_no_fallback() {
    let result = Cli::try_parse_from(vec![
        "token-registry-cli",
        "convert",
        "-i", "*.json",
        "--fallback", "string",
        "--no-fallback",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parse_detect() {
    let cli = Cli::parse_from(vec![
        "token-registry-cli",
        "detect",
        "--path", "colors/primary",
        "--value", "#1a73e8",
    ]);

    match cli.command {
        Commands::Detect(args) => {
            assert_eq!(args.path, "colors/primary");
            assert_eq!(args.value, "#1a73e8");
            assert!(args.validate().is_ok());
        }
        Commands::Convert(_) => panic!("Unexpected Convert command"),
    }
}

#[test]
fn test_args_validation() {
    let cli = Cli::parse_from(vec!["token-registry-cli", "convert", "-i", "*.json", "-j", "0"]);
    let Commands::Convert(args) = cli.command else {
        panic!("Unexpected command");
    };
    assert!(args.validate().is_err());

    let cli = Cli::parse_from(vec![
        "token-registry-cli",
        "convert",
        "-i", "*.json",
        "-o", "same.json",
        "-c", "same.json",
    ]);
    let Commands::Convert(args) = cli.command else {
        panic!("Unexpected command");
    };
    assert!(args.validate().is_err());
}

#[test]
fn test_binary_detect_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_token-registry-cli"))
        .args(["detect", "--path", "border/default", "--value", "1px solid #000000"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("type: border"));
    assert!(stdout.contains("css: 1px solid rgb(0, 0, 0)"));
    assert!(stdout.contains("namespace: border"));
}

#[test]
fn test_binary_detect_unparsable_value_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_token-registry-cli"))
        .args(["detect", "--path", "border/default", "--value", "thick wavy"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}
