mod debug_report;

use reltime::{Context, DEFAULT_DATE_FORMAT, Lexicon, LexiconSource, Options, parse_verbose_with};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> reltime::Result<()> {
    let loaded;
    let lexicon = match &config.lexicon {
        Some((patterns, deltas)) => {
            loaded = Lexicon::load(&LexiconSource::from_paths(patterns, deltas)?)?;
            &loaded
        }
        None => Lexicon::bundled()?,
    };

    let options = Options { date_format: config.format.clone() };
    let ctx = match &config.reference {
        Some(value) => Context::from_reference_str(value, &options)?,
        None => Context::default(),
    };

    let input = config.input.trim();
    let res = parse_verbose_with(input, &ctx, lexicon);
    if config.trace {
        debug_report::print_run(input, &res, config.color);
    } else {
        println!("{}", res.formatted);
    }
    Ok(())
}

struct CliConfig {
    input: String,
    reference: Option<String>,
    format: String,
    lexicon: Option<(PathBuf, PathBuf)>,
    trace: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut reference: Option<String> = None;
    let mut format = DEFAULT_DATE_FORMAT.to_string();
    let mut patterns: Option<PathBuf> = None;
    let mut deltas: Option<PathBuf> = None;
    let mut trace = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("reltime {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--trace" => trace = true,
            "--reference" => {
                reference = Some(args.next().ok_or_else(|| "error: --reference expects a value".to_string())?);
            }
            "--format" => {
                format = args.next().ok_or_else(|| "error: --format expects a value".to_string())?;
            }
            "--patterns" => {
                let value = args.next().ok_or_else(|| "error: --patterns expects a path".to_string())?;
                patterns = Some(PathBuf::from(value));
            }
            "--deltas" => {
                let value = args.next().ok_or_else(|| "error: --deltas expects a path".to_string())?;
                deltas = Some(PathBuf::from(value));
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--reference=") => {
                reference = Some(arg.trim_start_matches("--reference=").to_string());
            }
            _ if arg.starts_with("--format=") => {
                format = arg.trim_start_matches("--format=").to_string();
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let lexicon = match (patterns, deltas) {
        (Some(p), Some(d)) => Some((p, d)),
        (None, None) => None,
        _ => return Err("error: --patterns and --deltas must be given together".to_string()),
    };

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, reference, format, lexicon, trace, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "reltime {version}

Resolve a Chinese relative-time phrase into an absolute timestamp.

Usage:
  reltime [OPTIONS] [--] <input...>
  reltime [OPTIONS] --input <text>

Options:
  -i, --input <text>         Input text to parse. If omitted, reads remaining args
                             or stdin when no args are provided.
  --reference <timestamp>    Anchor timestamp. Default: today at 00:00:00.
  --format <format>          chrono format of --reference.
                             Default: {default_format}
  --patterns <path>          Pattern table (TOML); requires --deltas.
  --deltas <path>            Delta table (TOML); requires --patterns.
  --trace                    Print every resolution step.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG=reltime=debug     Log applied steps and unmapped literals to stderr.

Exit codes:
  0  Success.
  1  Lexicon or anchor error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_format = DEFAULT_DATE_FORMAT
    )
}
