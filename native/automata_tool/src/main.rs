use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use automata_tool::diagram::save_dot;
use automata_tool::{AutomatonDefinition, Compiled, from_definition, from_regex};
use clap::{Parser, Subcommand};
use log::{LevelFilter, info};

/// Build finite automata (NFA and DFA) from regular expressions or 5-tuple
/// definitions.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build an NFA and a DFA from a regular expression.
    FromRegex {
        /// The regular expression.
        regex: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build an NFA and a DFA from a JSON automaton definition.
    FromDefinition {
        /// Path to the JSON file holding the 5-tuple definition.
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, clap::Args)]
struct OutputArgs {
    /// String to test against the DFA; may be repeated.
    #[arg(long = "string", value_name = "STRING")]
    strings: Vec<String>,

    /// Directory for the generated .dot diagrams.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_definition(path: &Path) -> Result<AutomatonDefinition> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    AutomatonDefinition::from_json(&text).with_context(|| format!("parsing {}", path.display()))
}

fn report(compiled: &Compiled, source: &str, title: &str, output: &OutputArgs) -> Result<()> {
    println!("=== NFA ({title}) ===");
    println!("{}", compiled.nfa_definition().to_json_pretty()?);
    println!("\n=== Equivalent DFA ===");
    println!("{}", compiled.dfa_definition().to_json_pretty()?);

    let nfa_base = output.output_dir.join(format!("nfa_from_{source}"));
    let dfa_base = output.output_dir.join(format!("dfa_from_{source}"));
    let nfa_dot = save_dot(&compiled.nfa, &nfa_base, "NFA")
        .with_context(|| format!("writing {}", nfa_base.display()))?;
    let dfa_dot = save_dot(&compiled.dfa, &dfa_base, "DFA")
        .with_context(|| format!("writing {}", dfa_base.display()))?;

    println!("\nDiagram files:");
    println!("  NFA: {}", nfa_dot.display());
    println!("  DFA: {}", dfa_dot.display());

    if !output.strings.is_empty() {
        println!("\nResults:");
        for input in &output.strings {
            let verdict = if compiled.accepts(input) {
                "ACCEPTED"
            } else {
                "REJECTED"
            };
            println!("  {input:?}: {verdict}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    match &args.command {
        Command::FromRegex { regex, output } => {
            info!("compiling regular expression {regex:?}");
            let compiled =
                from_regex(regex).with_context(|| format!("compiling {regex:?}"))?;
            report(&compiled, "regex", "from regular expression", output)
        }
        Command::FromDefinition { file, output } => {
            info!("loading definition from {}", file.display());
            let definition = load_definition(file)?;
            let compiled = from_definition(&definition)
                .with_context(|| format!("building automata from {}", file.display()))?;
            report(&compiled, "definition", "from definition", output)
        }
    }
}
