//! Converting whole token files against one shared registry.
//!
//! Two document shapes are accepted: a JSON array of native variables
//! (`{name, resolvedType, scopes, value}`), or a JSON object whose leaves are
//! raw values and whose key chain is the token path. Values that do not
//! parse are skipped and reported; they never abort the batch.

use log::{debug, warn};
use rayon::prelude::*;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{RegistryError, Result};
use crate::manifest::{Manifest, ManifestBuilder, ManifestToken, SkippedToken};
use crate::options::{CssConversionOptions, ScssConversionOptions};
use crate::registry::Registry;
use crate::types::{FigmaContext, PathValueContext, TokenType, TokenValue};

/// Separator between path segments in token names.
pub const PATH_SEPARATOR: char = '/';

/// Render options and parallelism for a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub css: CssConversionOptions,
    pub scss: ScssConversionOptions,
    /// Worker threads; `None` uses rayon's default
    pub jobs: Option<usize>,
}

/// Result of converting a single document
#[derive(Debug, Clone, Default)]
pub struct FileConversion {
    pub tokens: Vec<(String, ManifestToken)>,
    pub skipped: Vec<SkippedToken>,
}

impl FileConversion {
    fn skip(&mut self, path: &str, file: &str, reason: impl Into<String>) {
        let reason = reason.into();
        warn!("Skipping token '{}' in {}: {}", path, file, reason);
        self.skipped.push(SkippedToken {
            path: path.to_string(),
            file: file.to_string(),
            reason,
        });
    }
}

/// Collect files matching the given patterns, minus the excluded ones
pub fn collect_files(patterns: &[String], exclude_patterns: &[String]) -> Result<Vec<PathBuf>> {
    let excluded = exclude_patterns
        .iter()
        .map(|pattern| glob::Pattern::new(pattern))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    let mut seen = HashSet::new();
    for pattern in patterns {
        for entry in glob::glob(pattern)? {
            let path = entry?;
            if path.is_dir() || excluded.iter().any(|p| p.matches_path(&path)) {
                continue;
            }
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }
    Ok(files)
}

fn render(
    registry: &Registry,
    token_type: TokenType,
    value: TokenValue,
    segments: &[String],
    file: &str,
    options: &BatchOptions,
) -> Result<ManifestToken> {
    Ok(ManifestToken {
        css: registry.to_css(&token_type, &value, &options.css)?,
        scss: registry.to_scss(&token_type, &value, &options.scss)?,
        namespace: registry.get_namespace(&token_type, segments)?,
        token_type,
        value,
        file: file.to_string(),
    })
}

fn split_path(path: &str) -> Vec<String> {
    path.split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn convert_native(
    registry: &Registry,
    variables: &[Value],
    file: &str,
    options: &BatchOptions,
) -> Result<FileConversion> {
    let mut conversion = FileConversion::default();
    for (index, variable) in variables.iter().enumerate() {
        let Some(name) = variable.get("name").and_then(Value::as_str) else {
            conversion.skip(&format!("#{}", index), file, "variable has no name");
            continue;
        };
        let context: FigmaContext = match serde_json::from_value(variable.clone()) {
            Ok(context) => context,
            Err(e) => {
                conversion.skip(name, file, format!("invalid variable: {}", e));
                continue;
            }
        };
        let raw = variable.get("value").cloned().unwrap_or_default();

        let token_type = match registry.detect_from_figma_shape(&context) {
            Ok(token_type) => token_type,
            Err(RegistryError::NoMatch { .. }) => {
                conversion.skip(name, file, format!("no handler for '{}'", context.resolved_type));
                continue;
            }
            Err(e) => return Err(e),
        };
        let Some(value) = registry.parse_figma_value(&token_type, &raw)? else {
            conversion.skip(name, file, format!("value is not a valid {}", token_type));
            continue;
        };
        let segments = split_path(name);
        let token = render(registry, token_type, value, &segments, file, options)?;
        conversion.tokens.push((name.to_string(), token));
    }
    Ok(conversion)
}

/// Raw text for a leaf, or `None` for containers and nulls.
fn leaf_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn flatten_defs(value: &Value, segments: &mut Vec<String>, out: &mut Vec<(Vec<String>, Value)>) {
    match value {
        // `{"$value": ...}` marks a leaf in the design tokens format
        Value::Object(map) if map.contains_key("$value") => {
            out.push((segments.clone(), map["$value"].clone()));
        }
        Value::Object(map) => {
            // `$type`, `$description` and friends are group metadata
            for (key, child) in map.iter().filter(|(key, _)| !key.starts_with('$')) {
                segments.push(key.clone());
                flatten_defs(child, segments, out);
                segments.pop();
            }
        }
        leaf => out.push((segments.clone(), leaf.clone())),
    }
}

fn convert_variable_defs(
    registry: &Registry,
    document: &Value,
    file: &str,
    options: &BatchOptions,
) -> Result<FileConversion> {
    let mut leaves = Vec::new();
    flatten_defs(document, &mut Vec::new(), &mut leaves);

    let mut conversion = FileConversion::default();
    for (segments, raw) in leaves {
        let path = segments.join(&PATH_SEPARATOR.to_string());
        let Some(text) = leaf_text(&raw) else {
            conversion.skip(&path, file, "value is not a scalar");
            continue;
        };
        let context = PathValueContext::new(path.clone(), text);

        let parsed = match registry.detect_and_parse_variable_defs(&context) {
            Ok(parsed) => parsed,
            Err(RegistryError::NoMatch { .. }) => {
                conversion.skip(&path, file, "no handler claimed the value");
                continue;
            }
            Err(e) => return Err(e),
        };
        let Some((token_type, value)) = parsed else {
            conversion.skip(&path, file, format!("'{}' could not be parsed", context.value));
            continue;
        };
        let token = render(registry, token_type, value, &segments, file, options)?;
        conversion.tokens.push((path, token));
    }
    Ok(conversion)
}

/// Convert an already-parsed document
pub fn convert_document(
    registry: &Registry,
    document: &Value,
    file: &str,
    options: &BatchOptions,
) -> Result<FileConversion> {
    match document {
        Value::Array(variables) => convert_native(registry, variables, file, options),
        Value::Object(_) => convert_variable_defs(registry, document, file, options),
        _ => Err(RegistryError::ParseError {
            path: file.to_string(),
            message: "expected a JSON array of variables or an object of token values".to_string(),
        }),
    }
}

/// Read and convert one token file
pub fn convert_file(registry: &Registry, path: &Path, options: &BatchOptions) -> Result<FileConversion> {
    let file = path.display().to_string();
    debug!("Converting {}", file);
    let content = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content).map_err(|e| RegistryError::ParseError {
        path: file.clone(),
        message: e.to_string(),
    })?;
    convert_document(registry, &document, &file, options)
}

/// Convert every file in parallel against the shared registry and assemble
/// the report, preserving file order
pub fn convert_files(registry: &Registry, files: &[PathBuf], options: &BatchOptions) -> Result<Manifest> {
    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = options.jobs {
        pool = pool.num_threads(jobs);
    }
    let pool = pool.build().map_err(|e| RegistryError::ConfigError {
        message: format!("Failed to start worker pool: {}", e),
    })?;

    let builder = ManifestBuilder::new().with_files_processed(files.len());

    let conversions = pool.install(|| {
        files
            .par_iter()
            .map(|path| convert_file(registry, path, options))
            .collect::<Result<Vec<_>>>()
    })?;

    let builder = conversions.into_iter().fold(builder, |builder, conversion| {
        builder
            .with_tokens(conversion.tokens)
            .with_skipped(conversion.skipped)
    });
    Ok(builder.build())
}
