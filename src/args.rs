use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::options::{CssColorFormat, ScssColorFormat};
use crate::types::TokenType;

/// Design token converter - detects token types and renders them as CSS and SCSS
#[derive(Parser, Debug)]
#[command(name = "token-registry-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert token files into a JSON report
    Convert(ConvertArgs),
    /// Detect and render a single path/value pair
    Detect(DetectArgs),
}

/// Arguments for the convert command
#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    /// Input file patterns (glob patterns supported)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATTERN",
        required = true,
        num_args = 1..,
        help = "Token files to convert (JSON)"
    )]
    pub input: Vec<String>,

    /// Exclude patterns (glob patterns to exclude)
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "PATTERN",
        num_args = 0..,
        help = "Patterns to exclude from conversion"
    )]
    pub exclude: Vec<String>,

    /// Report file path; stdout when absent
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Path where the JSON report will be written"
    )]
    pub output: Option<PathBuf>,

    /// Configuration file path (YAML or JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "Path to configuration file (YAML or JSON format)"
    )]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub render: RenderArgs,

    /// Number of parallel threads to use
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "NUM",
        help = "Number of parallel threads to use (defaults to number of CPU cores)"
    )]
    pub jobs: Option<usize>,

    /// Emit the report without whitespace
    #[arg(
        long = "minify",
        default_value_t = false,
        help = "Write the report as compact JSON"
    )]
    pub minify: bool,

    /// Verbose output
    #[arg(
        short = 'v',
        long = "verbose",
        default_value_t = false,
        help = "Enable debug logging"
    )]
    pub verbose: bool,
}

/// Render and detection overrides shared by both commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RenderArgs {
    #[arg(long = "color-format", value_enum, help = "Color format for CSS output")]
    pub color_format: Option<CssColorFormat>,

    #[arg(long = "scss-color-format", value_enum, help = "Color format for SCSS output")]
    pub scss_color_format: Option<ScssColorFormat>,

    #[arg(
        long = "fallback",
        value_name = "TYPE",
        conflicts_with = "no_fallback",
        help = "Type assigned to values no handler claims"
    )]
    pub fallback: Option<TokenType>,

    #[arg(
        long = "no-fallback",
        default_value_t = false,
        help = "Treat values no handler claims as skipped"
    )]
    pub no_fallback: bool,
}

/// Arguments for the detect command
#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    /// Token path, segments separated by `/`
    #[arg(long = "path", value_name = "PATH", default_value = "")]
    pub path: String,

    /// Raw token value
    #[arg(long = "value", value_name = "VALUE", required = true)]
    pub value: String,

    /// Configuration file path (YAML or JSON)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub render: RenderArgs,

    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.input.is_empty() {
            return Err("At least one input pattern must be provided".to_string());
        }

        if let (Some(output), Some(config)) = (&self.output, &self.config) {
            if output == config {
                return Err("Output and config paths must be different".to_string());
            }
        }

        if let Some(jobs) = self.jobs {
            if jobs == 0 {
                return Err("Number of jobs must be at least 1".to_string());
            }
        }

        Ok(())
    }
}

impl DetectArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.value.trim().is_empty() {
            return Err("A value must be provided".to_string());
        }
        Ok(())
    }
}
