pub mod args;
pub mod color;
pub mod config;
pub mod errors;
pub mod format;
pub mod handler;
pub mod handlers;
pub mod manifest;
pub mod namespace;
pub mod options;
pub mod registry;
pub mod types;

#[cfg(feature = "cli")]
pub mod batch;

pub use args::{Cli, Commands, ConvertArgs, DetectArgs, RenderArgs};
pub use config::{ConverterConfig, DetectionConfig};
pub use errors::{RegistryError, Result};
pub use handler::Handler;
pub use manifest::{Manifest, ManifestBuilder, ManifestToken, SkippedToken};
pub use namespace::TailwindNamespace;
pub use options::{CssColorFormat, CssConversionOptions, ScssColorFormat, ScssConversionOptions};
pub use registry::Registry;
pub use types::{FigmaContext, PathValueContext, TokenType, TokenValue};

use log::debug;
use std::path::Path;
#[cfg(feature = "cli")]
use std::path::PathBuf;
use std::sync::OnceLock;

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Install the process-wide registry. Only the first call succeeds.
pub fn install_global(registry: Registry) -> Result<&'static Registry> {
    let mut installed = false;
    let global = GLOBAL_REGISTRY.get_or_init(|| {
        installed = true;
        registry
    });
    if !installed {
        return Err(RegistryError::AlreadyInitialized);
    }
    debug!("Installed global registry with {} handlers", global.len());
    Ok(global)
}

/// The process-wide registry, if one has been installed.
pub fn global_registry() -> Option<&'static Registry> {
    GLOBAL_REGISTRY.get()
}

/// Load the config file when given, then apply command line overrides.
pub fn resolve_config(path: Option<&Path>, render: &RenderArgs) -> Result<ConverterConfig> {
    let mut config = match path {
        Some(path) => ConverterConfig::from_file(path)?,
        None => ConverterConfig::default(),
    };

    if render.color_format.is_some() {
        config.css.color_format = render.color_format;
    }
    if render.scss_color_format.is_some() {
        config.scss.color_format = render.scss_color_format;
    }
    if render.no_fallback {
        config.detection.fallback = None;
    } else if let Some(fallback) = &render.fallback {
        config.detection.fallback = Some(fallback.clone());
    }
    Ok(config)
}

/// One detected and rendered value
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub token_type: TokenType,
    pub value: TokenValue,
    pub css: String,
    pub scss: String,
    pub namespace: Option<TailwindNamespace>,
}

/// Detect, parse and render a single path/value pair. `Ok(None)` when the
/// detected handler cannot parse the value.
pub fn detect(registry: &Registry, config: &ConverterConfig, path: &str, value: &str) -> Result<Option<Detection>> {
    let context = PathValueContext::new(path, value);
    let Some((token_type, value)) = registry.detect_and_parse_variable_defs(&context)? else {
        return Ok(None);
    };
    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Some(Detection {
        css: registry.to_css(&token_type, &value, &config.css)?,
        scss: registry.to_scss(&token_type, &value, &config.scss)?,
        namespace: registry.get_namespace(&token_type, &segments)?,
        token_type,
        value,
    }))
}

/// Result of the convert command
#[cfg(feature = "cli")]
#[derive(Debug)]
pub struct ConversionResult {
    pub manifest: Manifest,
    /// Serialized report, pretty or compact per the arguments
    pub report: String,
    pub files: Vec<PathBuf>,
}

/// Main conversion entry point
#[cfg(feature = "cli")]
pub fn convert(args: &ConvertArgs) -> Result<ConversionResult> {
    args.validate().map_err(RegistryError::InvalidInput)?;

    let config = resolve_config(args.config.as_deref(), &args.render)?;
    let registry = config.build_registry()?;
    debug!(
        "Registry ready: {} handlers, fallback {:?}",
        registry.len(),
        registry.fallback()
    );

    let files = batch::collect_files(&args.input, &args.exclude)?;
    if files.is_empty() {
        return Err(RegistryError::NoFilesFound);
    }
    debug!("Found {} files to convert", files.len());

    let options = batch::BatchOptions {
        css: config.css.clone(),
        scss: config.scss.clone(),
        jobs: args.jobs,
    };
    let manifest = batch::convert_files(&registry, &files, &options)?;

    let report = if args.minify {
        manifest.to_compact_json()?
    } else {
        manifest.to_pretty_json()?
    };

    if let Some(output) = &args.output {
        write_output(output, &report)?;
    }

    Ok(ConversionResult {
        manifest,
        report,
        files,
    })
}

#[cfg(feature = "cli")]
fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_atomic(path, content).map_err(|e| RegistryError::OutputError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write file atomically by writing to temp file then renaming
#[cfg(feature = "cli")]
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    use std::io::Write;

    let temp_path = path.with_extension("tmp");
    let mut file = std::fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    std::fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_config_overrides() {
        let render = RenderArgs {
            color_format: Some(CssColorFormat::Oklch),
            no_fallback: true,
            ..Default::default()
        };
        let config = resolve_config(None, &render).unwrap();
        assert_eq!(config.css.color_format, Some(CssColorFormat::Oklch));
        assert_eq!(config.detection.fallback, None);
    }

    #[test]
    fn test_detect_renders_every_form() {
        let config = ConverterConfig::default();
        let registry = config.build_registry().unwrap();
        let detection = detect(&registry, &config, "color/brand", "#3366cc")
            .unwrap()
            .unwrap();
        assert_eq!(detection.token_type, TokenType::Color);
        assert_eq!(detection.css, "#3366cc");
        assert_eq!(detection.namespace, Some(TailwindNamespace::Color));
    }

    #[test]
    fn test_detect_unparsable_value() {
        let config = ConverterConfig::default();
        let registry = config.build_registry().unwrap();
        assert_eq!(detect(&registry, &config, "border/width", "thick").unwrap(), None);
    }
}
