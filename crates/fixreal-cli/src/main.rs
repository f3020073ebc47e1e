use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fixreal_core::{ByteOrder, CodecError, ConversionReport, DescriptorError, FormatDescriptor};
use glob::glob;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FIXREAL_BUILD_COMMIT"),
    " ",
    env!("FIXREAL_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  fixreal decode fix_8_7 0x81\n  fixreal encode ufix_16_10 3.25 --hex\n  fixreal unpack fix_16_15 capture.bin --byte-order big -o report.json";

#[derive(Parser, Debug)]
#[command(name = "fixreal")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Convert between floating point and toolchain fixed-point (fix/ufix) representations.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Log conversion details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the derived constants of a format as JSON.
    Describe {
        /// Format name, e.g. fix_16_8 or ufix_8_0
        format: String,

        /// Divisor applied to decoded values
        #[arg(long, env = "FIXREAL_SCALING", default_value_t = 1.0, allow_negative_numbers = true)]
        scaling: f64,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Decode raw codes (decimal, 0x, 0o or 0b) into real values.
    Decode {
        /// Format name, e.g. fix_16_8 or ufix_8_0
        format: String,

        /// Raw codes to decode
        #[arg(required = true, value_parser = parse_raw)]
        raws: Vec<u32>,

        /// Divisor applied to decoded values
        #[arg(long, env = "FIXREAL_SCALING", default_value_t = 1.0, allow_negative_numbers = true)]
        scaling: f64,
    },
    /// Encode real values into raw codes.
    Encode {
        /// Format name, e.g. fix_16_8 or ufix_8_0
        format: String,

        /// Values to encode
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Print codes as zero-padded hexadecimal
        #[arg(long)]
        hex: bool,
    },
    /// Decode a binary file of consecutive raw values into a JSON report.
    Unpack(UnpackArgs),
    /// Encode real values into a binary file.
    Pack(PackArgs),
}

#[derive(Args, Debug)]
struct UnpackArgs {
    /// Format name, e.g. fix_16_8 or ufix_8_0
    format: String,

    /// Path to a binary file (a pattern matching a single file is accepted)
    input: PathBuf,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Byte order of the values in the file
    #[arg(long, env = "FIXREAL_BYTE_ORDER", default_value_t = ByteOrder::Native)]
    byte_order: ByteOrder,

    /// Divisor applied to decoded values
    #[arg(long, env = "FIXREAL_SCALING", default_value_t = 1.0, allow_negative_numbers = true)]
    scaling: f64,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct PackArgs {
    /// Format name, e.g. fix_16_8 or ufix_8_0
    format: String,

    /// Values to encode
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Output binary file
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Byte order of the values in the file
    #[arg(long, env = "FIXREAL_BYTE_ORDER", default_value_t = ByteOrder::Native)]
    byte_order: ByteOrder,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Describe {
            format,
            scaling,
            pretty,
        } => cmd_describe(&format, scaling, pretty),
        Commands::Decode {
            format,
            raws,
            scaling,
        } => cmd_decode(&format, &raws, scaling),
        Commands::Encode { format, values, hex } => cmd_encode(&format, &values, hex),
        Commands::Unpack(args) => cmd_unpack(args),
        Commands::Pack(args) => cmd_pack(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "fixreal=debug,fixreal_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<DescriptorError> for CliError {
    fn from(err: DescriptorError) -> Self {
        let hint = match err {
            DescriptorError::NameParse { .. } => "formats look like fix_16_8 or ufix_8_0",
            DescriptorError::UnsupportedWidth { .. } => "supported widths are 8, 16 and 32 bits",
            DescriptorError::InvalidBinaryPoint { .. } => {
                "the binary point must be smaller than the bit width"
            }
            DescriptorError::InvalidScaling { .. } => "use a finite, non-zero --scaling",
        };
        CliError::new(err.to_string(), Some(hint.to_string()))
    }
}

impl From<CodecError> for CliError {
    fn from(err: CodecError) -> Self {
        let hint = match err {
            CodecError::Sign { .. } => Some("use a signed (fix_) format for negative values"),
            CodecError::Format { .. } => Some("check the format width and that the file is complete"),
            CodecError::NonFinite { .. } | CodecError::ByteOrder { .. } => None,
        };
        CliError::new(err.to_string(), hint.map(str::to_string))
    }
}

fn parse_format(name: &str, scaling: f64) -> Result<FormatDescriptor, CliError> {
    let fmt = fixreal_core::parse_format_name(name)?.with_scaling(scaling)?;
    Ok(fmt)
}

/// Parse a raw code written in decimal or with a 0x/0o/0b prefix.
fn parse_raw(text: &str) -> Result<u32, String> {
    let cleaned = text.replace('_', "");
    let lower = cleaned.to_ascii_lowercase();
    let (digits, radix) = if let Some(hex) = lower.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        (oct, 8)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (bin, 2)
    } else {
        (lower.as_str(), 10)
    };
    u32::from_str_radix(digits, radix).map_err(|err| format!("invalid raw code '{text}': {err}"))
}

#[derive(Serialize)]
struct FormatDescription<'a> {
    name: String,
    #[serde(flatten)]
    descriptor: &'a FormatDescriptor,
    width_bytes: usize,
    min_value: f64,
    max_value: f64,
}

fn cmd_describe(format: &str, scaling: f64, pretty: bool) -> Result<(), CliError> {
    let fmt = parse_format(format, scaling)?;
    let description = FormatDescription {
        name: fmt.name(),
        descriptor: &fmt,
        width_bytes: fmt.width_bytes(),
        min_value: fmt.min_value(),
        max_value: fmt.max_value(),
    };
    let json = if pretty {
        serde_json::to_string_pretty(&description)
    } else {
        serde_json::to_string(&description)
    };
    let json = json.context("JSON serialization failed")?;
    println!("{json}");
    Ok(())
}

fn cmd_decode(format: &str, raws: &[u32], scaling: f64) -> Result<(), CliError> {
    let fmt = parse_format(format, scaling)?;
    let full = u32::MAX >> (32 - fmt.bits());
    for &raw in raws {
        if raw > full {
            return Err(CliError::new(
                format!("raw code {raw:#x} does not fit in {} bits", fmt.bits()),
                Some(format!("{fmt} codes range from 0 to {full:#x}")),
            ));
        }
        println!("{}", fixreal_core::decode_value(raw, &fmt));
    }
    Ok(())
}

fn cmd_encode(format: &str, values: &[f64], hex: bool) -> Result<(), CliError> {
    let fmt = parse_format(format, 1.0)?;
    let digits = fmt.width_bytes() * 2;
    for &value in values {
        let raw = fixreal_core::encode_value(value, &fmt)?;
        if hex {
            println!("0x{raw:0digits$x}");
        } else {
            println!("{raw}");
        }
    }
    Ok(())
}

fn cmd_unpack(args: UnpackArgs) -> Result<(), CliError> {
    let fmt = parse_format(&args.format, args.scaling)?;
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    let report = if args.stdout {
        None
    } else {
        let report = args.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        ensure_distinct_output(&report, &input_abs)?;
        Some(report)
    };

    let bytes = fs::read(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    tracing::debug!(path = %resolved_input.display(), bytes = bytes.len(), "read input");

    let values = fixreal_core::decode_sequence(&bytes, &fmt, args.byte_order)?;
    let rep = fixreal_core::make_report(&fmt, args.byte_order, values);
    let json = serialize_report(&rep, args.pretty, args.compact)?;

    let Some(report) = report else {
        print!("{}", json);
        return Ok(());
    };

    write_output(&report, json.as_bytes())?;
    if !args.quiet {
        eprintln!(
            "OK: {} values decoded -> {}",
            rep.values.len(),
            report.display()
        );
    }
    Ok(())
}

fn cmd_pack(args: PackArgs) -> Result<(), CliError> {
    let fmt = parse_format(&args.format, 1.0)?;
    let bytes = fixreal_core::encode_sequence(&args.values, &fmt, args.byte_order)?;
    write_output(&args.output, &bytes)?;
    if !args.quiet {
        eprintln!(
            "OK: {} values encoded -> {}",
            args.values.len(),
            args.output.display()
        );
    }
    Ok(())
}

fn ensure_distinct_output(output: &Path, input_abs: &Path) -> Result<(), CliError> {
    let output_dir = output
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose();
    // A parent that does not exist yet cannot contain the input.
    let Ok(Some(output_dir)) = output_dir else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", output.display()))?;
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("report path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn write_output(path: &Path, contents: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write output: {}", path.display()))?;
    Ok(())
}

fn serialize_report(rep: &ConversionReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a file of raw fixed-point values".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a file of raw fixed-point values".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
