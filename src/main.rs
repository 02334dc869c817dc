use anyhow::Context;
use clap::Parser;
use token_registry::{convert, detect, resolve_config, Cli, Commands};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => {
            init_logging(args.verbose);

            let result = convert(&args).context("Conversion failed")?;
            let metadata = &result.manifest.metadata;

            match &args.output {
                Some(output) => {
                    eprintln!("Conversion successful!");
                    eprintln!("  - Processed {} files", metadata.files_processed);
                    eprintln!("  - Converted {} tokens", metadata.tokens_converted);
                    if metadata.tokens_skipped > 0 {
                        eprintln!("  - Skipped {} tokens", metadata.tokens_skipped);
                    }
                    eprintln!("  - Report written to {}", output.display());
                }
                None => println!("{}", result.report),
            }
            Ok(())
        }
        Commands::Detect(args) => {
            init_logging(args.verbose);
            args.validate().map_err(anyhow::Error::msg)?;

            let config = resolve_config(args.config.as_deref(), &args.render)?;
            let registry = config.build_registry()?;

            match detect(&registry, &config, &args.path, &args.value)? {
                Some(detection) => {
                    println!("type: {}", detection.token_type);
                    println!("css: {}", detection.css);
                    println!("scss: {}", detection.scss);
                    match detection.namespace {
                        Some(namespace) => println!("namespace: {}", namespace),
                        None => println!("namespace: none"),
                    }
                    Ok(())
                }
                None => anyhow::bail!(
                    "'{}' could not be parsed as any registered token type",
                    args.value
                ),
            }
        }
    }
}
