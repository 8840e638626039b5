#![deny(unsafe_code)]
//! CLI binary for the filter-chain convolution pipeline.
//!
//! Subcommands:
//! - `apply <input>` — run an effect chain over an image, write PNG
//! - `list` — print the built-in kernel names
//!
//! The CLI drives the CPU reference path, so it needs no GL context;
//! the pass plan it executes is the same one the GPU pipeline consumes.

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use filter_chain_core::{plan_passes, ChainConfig, EffectChain, KernelSet};
use filter_chain_kernels::convolve::run_plan;
use filter_chain_kernels::snapshot::{load_rgba, write_png};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "filter-chain", about = "Multi-pass 3x3 convolution over an image")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply an effect chain to an image and write a PNG.
    Apply {
        /// Input image path (PNG or JPEG).
        input: PathBuf,

        /// Comma-separated kernel names to apply in order.
        #[arg(short, long, value_delimiter = ',')]
        effects: Vec<String>,

        /// JSON chain config file ({"kernels": {...}, "effects": [...]}),
        /// merged over the built-in kernels.
        #[arg(long, conflicts_with = "effects")]
        chain: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// List the built-in kernels.
    List,
}

/// Resolves the kernel set and effect chain from the CLI flags.
fn configure(
    effects: Vec<String>,
    chain_path: Option<&PathBuf>,
) -> Result<(KernelSet, EffectChain), CliError> {
    let base = filter_chain_kernels::builtin();
    match chain_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
            let config: ChainConfig = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid chain config: {e}")))?;
            Ok(config.into_validated(base)?)
        }
        None => {
            let chain = EffectChain::new(effects);
            chain.resolve(&base)?;
            Ok((base, chain))
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let names = filter_chain_kernels::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "kernels": filter_chain_kernels::builtin(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Kernels:");
                for name in names {
                    println!("  {name}");
                }
            }
        }
        Command::Apply {
            input,
            effects,
            chain,
            output,
        } => {
            let (set, chain) = configure(effects, chain.as_ref())?;
            let (pixels, width, height) = load_rgba(&input)?;

            let passes = plan_passes(&chain, &set)?;
            let result = run_plan(&pixels, width, height, &passes)?;
            write_png(result, width, height, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "input": input.display().to_string(),
                    "width": width,
                    "height": height,
                    "effects": chain.names().collect::<Vec<_>>(),
                    "passes": passes.len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "applied {} effect(s) in {} passes ({width}x{height}) -> {}",
                    chain.len(),
                    passes.len(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_with_effects_validates_against_builtins() {
        let result = configure(vec!["gaussianBlur".into(), "emboss".into()], None);
        let (_, chain) = result.expect("built-in names should validate");
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn configure_rejects_unknown_effect() {
        let err = configure(vec!["vortex".into()], None).unwrap_err();
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("vortex"));
    }

    #[test]
    fn configure_with_empty_effects_yields_empty_chain() {
        let (_, chain) = configure(Vec::new(), None).unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn configure_missing_chain_file_is_an_io_error() {
        let path = PathBuf::from("/no/such/chain.json");
        let err = configure(Vec::new(), Some(&path)).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn cli_parses_comma_separated_effects() {
        let cli = Cli::try_parse_from([
            "filter-chain",
            "apply",
            "in.png",
            "--effects",
            "gaussianBlur,emboss",
        ])
        .unwrap();
        match cli.command {
            Command::Apply { effects, .. } => {
                assert_eq!(effects, vec!["gaussianBlur", "emboss"]);
            }
            _ => panic!("expected apply subcommand"),
        }
    }

    #[test]
    fn cli_rejects_effects_together_with_chain_file() {
        let result = Cli::try_parse_from([
            "filter-chain",
            "apply",
            "in.png",
            "--effects",
            "emboss",
            "--chain",
            "chain.json",
        ]);
        assert!(result.is_err(), "--effects and --chain should conflict");
    }

    #[test]
    fn cli_defaults_output_path() {
        let cli = Cli::try_parse_from(["filter-chain", "apply", "in.png"]).unwrap();
        match cli.command {
            Command::Apply { output, .. } => {
                assert_eq!(output, PathBuf::from("output.png"));
            }
            _ => panic!("expected apply subcommand"),
        }
    }
}
