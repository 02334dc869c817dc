use std::fs;
use tempfile::tempdir;
use token_registry::{convert, Cli, Commands, ConvertArgs, Manifest, RegistryError, TokenType};

fn convert_args(argv: &[&str]) -> ConvertArgs {
    let mut full = vec!["token-registry-cli", "convert"];
    full.extend_from_slice(argv);
    match <Cli as clap::Parser>::parse_from(full).command {
        Commands::Convert(args) => args,
        Commands::Detect(_) => panic!("Unexpected Detect command"),
    }
}

#[test]
fn test_end_to_end_conversion() {
    let temp_dir = tempdir().unwrap();

    fs::write(
        temp_dir.path().join("defs.json"),
        r##"{
  "color": { "primary": "#1a73e8", "overlay": "#00000080" },
  "spacing": { "4": "16px" },
  "radius": { "md": "0.5rem" },
  "border": { "default": "1px solid #e0e0e0" },
  "motion": { "ease": "cubic-bezier(0.4, 0, 0.2, 1)", "fast": "150ms" },
  "gradient": { "hero": "linear-gradient(90deg, #ff0000 0%, #0000ff 100%)" }
}"##,
    )
    .unwrap();

    fs::write(
        temp_dir.path().join("variables.json"),
        r##"[
  { "name": "Brand/Accent", "resolvedType": "COLOR", "scopes": ["ALL_FILLS"],
    "value": { "r": 1, "g": 0.5, "b": 0, "a": 1 } },
  { "name": "Font/Body", "resolvedType": "STRING", "scopes": ["FONT_FAMILY"],
    "value": "Inter, sans-serif" },
  { "name": "Layer/Modal", "resolvedType": "FLOAT", "scopes": [], "value": 50 }
]"##,
    )
    .unwrap();

    let output = temp_dir.path().join("out/report.json");
    let args = convert_args(&[
        "-i",
        &format!("{}/*.json", temp_dir.path().display()),
        "-o",
        output.to_str().unwrap(),
        "--color-format",
        "rgb",
    ]);

    let result = convert(&args).unwrap();
    assert_eq!(result.files.len(), 2);

    let manifest = &result.manifest;
    assert_eq!(manifest.metadata.files_processed, 2);
    assert!(manifest.skipped.is_empty());

    let tokens = &manifest.tokens;
    assert_eq!(tokens["color/primary"].css, "rgb(26, 115, 232)");
    assert_eq!(tokens["color/overlay"].css, "rgba(0, 0, 0, 0.5)");
    assert_eq!(tokens["spacing/4"].css, "16px");
    assert_eq!(tokens["radius/md"].namespace.unwrap().as_str(), "radius");
    assert_eq!(tokens["border/default"].token_type, TokenType::Border);
    assert_eq!(tokens["motion/ease"].token_type, TokenType::CubicBezier);
    assert_eq!(tokens["motion/fast"].css, "150ms");
    assert_eq!(tokens["gradient/hero"].token_type, TokenType::Gradient);
    assert_eq!(tokens["Brand/Accent"].token_type, TokenType::Color);
    assert_eq!(tokens["Font/Body"].token_type, TokenType::FontFamily);
    assert_eq!(tokens["Layer/Modal"].token_type, TokenType::Number);
    assert_eq!(tokens["Layer/Modal"].namespace.unwrap().as_str(), "z-index");

    // The report on disk is the same report
    let written = fs::read_to_string(&output).unwrap();
    let reloaded: Manifest = serde_json::from_str(&written).unwrap();
    assert_eq!(reloaded.tokens.len(), manifest.tokens.len());
    assert_eq!(reloaded.tokens["color/primary"].css, manifest.tokens["color/primary"].css);
    assert_eq!(reloaded.metadata.tokens_converted, manifest.metadata.tokens_converted);
}

#[test]
fn test_skipped_tokens_are_reported() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("tokens.json"),
        r##"{ "border": { "broken": "thick wavy red", "ok": "2px dashed #000000" } }"##,
    )
    .unwrap();

    let args = convert_args(&["-i", &format!("{}/*.json", temp_dir.path().display()), "--minify"]);
    let result = convert(&args).unwrap();

    assert_eq!(result.manifest.metadata.tokens_converted, 1);
    assert_eq!(result.manifest.skipped.len(), 1);
    assert_eq!(result.manifest.skipped[0].path, "border/broken");
    assert!(!result.report.contains('\n'));
}

#[test]
fn test_duplicate_paths_across_files() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("a.json"), r##"{ "color": { "ink": "#000000" } }"##).unwrap();
    fs::write(temp_dir.path().join("b.json"), r##"{ "color": { "ink": "#ffffff" } }"##).unwrap();

    let args = convert_args(&["-i", &format!("{}/*.json", temp_dir.path().display()), "-j", "2"]);
    let result = convert(&args).unwrap();

    assert_eq!(result.manifest.tokens["color/ink"].css, "#000000");
    assert_eq!(result.manifest.skipped.len(), 1);
    assert!(result.manifest.skipped[0].reason.contains("duplicate"));
}

#[test]
fn test_excluded_files_are_ignored() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("keep.json"), r##"{ "size": "4px" }"##).unwrap();
    fs::write(temp_dir.path().join("draft.json"), r##"{ "size": "8px" }"##).unwrap();

    let args = convert_args(&[
        "-i",
        &format!("{}/*.json", temp_dir.path().display()),
        "-e",
        "**/draft.json",
    ]);
    let result = convert(&args).unwrap();

    assert_eq!(result.files.len(), 1);
    assert_eq!(result.manifest.tokens["size"].css, "4px");
}

#[test]
fn test_no_files_found() {
    let temp_dir = tempdir().unwrap();
    let args = convert_args(&["-i", &format!("{}/*.json", temp_dir.path().display())]);
    assert!(matches!(convert(&args), Err(RegistryError::NoFilesFound)));
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("bad.json"), "{ not json").unwrap();

    let args = convert_args(&["-i", &format!("{}/*.json", temp_dir.path().display())]);
    assert!(matches!(convert(&args), Err(RegistryError::ParseError { .. })));
}

#[test]
fn test_config_file_disables_types() {
    let temp_dir = tempdir().unwrap();
    let tokens_dir = temp_dir.path().join("tokens");
    fs::create_dir(&tokens_dir).unwrap();
    fs::write(tokens_dir.join("t.json"), r##"{ "border": { "default": "1px solid #000000" } }"##).unwrap();

    let config = temp_dir.path().join("config.yaml");
    fs::write(&config, "disabled_types:\n  - border\ndetection:\n  fallback: string\n").unwrap();

    let args = convert_args(&[
        "-i",
        &format!("{}/*.json", tokens_dir.display()),
        "-c",
        config.to_str().unwrap(),
    ]);
    let result = convert(&args).unwrap();

    let token = &result.manifest.tokens["border/default"];
    assert_eq!(token.token_type, TokenType::String);
    assert_eq!(token.css, "1px solid #000000");
}
