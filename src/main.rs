use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use relsizes::scale::{self, ScaleConfig, ValidationResult};
use relsizes::{convert, logging, ConversionSession};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relsizes")]
#[command(about = "Convert a quantity into its most readable unit", long_about = None)]
struct Cli {
    /// Scale configuration (.toml or .json); the built-in scales when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Start the interactive shell
    #[arg(short, long)]
    interactive: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available scales
    Scales,

    /// List the units of a scale
    Units {
        /// Scale name (e.g., "time")
        scale: String,
    },

    /// Convert a value into its most readable unit
    Convert {
        /// Scale name (e.g., "time")
        scale: String,

        /// Value to convert (e.g., "90")
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Unit of the value, singular or plural (e.g., "seconds")
        unit: String,
    },

    /// Validate the scale configuration
    Check,

    /// Export the scale configuration as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the interactive shell
    Shell,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (config, validation) = load_config(cli.config.as_ref())?;

    let command = match (cli.command, cli.interactive) {
        (Some(command), _) => command,
        (None, true) => Commands::Shell,
        (None, false) => bail!("No command given; run with --help for usage"),
    };

    if !matches!(command, Commands::Check) && validation.has_issues() {
        eprint!("{}", validation);
    }

    match command {
        Commands::Scales => print_scales(&config),
        Commands::Units { scale } => print_units(&config, &scale)?,
        Commands::Convert { scale, value, unit } => {
            println!("{}", perform_conversion(&config, &scale, &value, &unit)?)
        }
        Commands::Check => check_config(&validation)?,
        Commands::Export { output } => export_config(&config, output)?,
        Commands::Shell => run_shell(config)?,
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<(ScaleConfig, ValidationResult)> {
    match path {
        Some(path) => scale::load_config_from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => {
            let config = scale::builtin_config();
            let validation = scale::validate_config(&config);
            Ok((config, validation))
        }
    }
}

fn find_scale<'a>(config: &'a ScaleConfig, name: &str) -> Result<&'a scale::Scale> {
    config
        .scale(name)
        .ok_or_else(|| anyhow!("Scale '{}' not found", name))
}

fn print_scales(config: &ScaleConfig) {
    println!("Available scales:");
    for name in config.scale_names() {
        println!("  {}", name);
    }
}

fn print_units(config: &ScaleConfig, scale_name: &str) -> Result<()> {
    let scale = find_scale(config, scale_name)?;

    println!("Units for scale '{}':", scale_name);
    for unit in &scale.units {
        println!("  {} ({})", unit.name, unit.plural);
        println!("    Conversion factor: {}", unit.conversion_factor);
    }
    Ok(())
}

fn perform_conversion(
    config: &ScaleConfig,
    scale_name: &str,
    value: &str,
    unit: &str,
) -> Result<String> {
    let scale = find_scale(config, scale_name)?;
    Ok(convert(value, unit, scale))
}

fn check_config(validation: &ValidationResult) -> Result<()> {
    if validation.has_issues() {
        print!("{}", validation);
    }
    if !validation.is_valid() {
        bail!("Configuration has {} error(s)", validation.error_count());
    }
    println!("Configuration is valid");
    Ok(())
}

fn export_config(config: &ScaleConfig, output: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;

    if let Some(output_path) = output {
        std::fs::write(&output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        println!("Configuration exported to {}", output_path.display());
    } else {
        println!("{}", json);
    }
    Ok(())
}

const SHELL_HELP: &str = "\
Commands:
  scales                  List available scales
  units SCALE             List units for a scale
  convert SCALE VALUE UNIT
                          Convert a value
  scale SCALE             Switch the current scale (unit resets to its default)
  unit UNIT               Set the current unit
  value VALUE             Set the current value
  show                    Show the current conversion
  help                    Show this help
  exit | quit             Leave the shell";

fn run_shell(config: ScaleConfig) -> Result<()> {
    let mut session = ConversionSession::new(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Relative sizes interactive shell. Type help for a list of commands.");
    loop {
        print!("converter> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }

        let args: Vec<&str> = line.split_whitespace().collect();
        match args.as_slice() {
            [] => {}
            ["exit"] | ["quit"] => break,
            ["help"] => println!("{}", SHELL_HELP),
            ["scales"] => print_scales(session.config()),
            ["units", scale] => report(print_units(session.config(), scale)),
            ["convert", scale, value, unit] => report(
                perform_conversion(session.config(), scale, value, unit)
                    .map(|s| println!("{}", s)),
            ),
            ["scale", scale] => report(
                session
                    .set_scale(scale)
                    .map(|s| println!("{}", s))
                    .map_err(Into::into),
            ),
            ["unit", unit] => println!("{}", session.set_unit(unit)),
            ["value", value] => println!("{}", session.set_input_value(*value)),
            ["show"] => println!("{}", session.update()),
            _ => eprintln!("Error: unrecognised command '{}'; type help", line.trim()),
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
    }
}
