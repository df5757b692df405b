use clap::Parser;
use log::{info, warn};
use std::ffi::OsString;
use std::{fmt::Display, fmt::Formatter};

/// Suffix given to compressed files.
pub const SUFFIX: &str = ".huff";

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Warnings,
    Info,
    Debug,
    Trace,
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffOpts {
    /// Vec of names of files to read for input. Empty means stdin.
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
    /// More than one of compress, decompress and test was requested
    pub mixed_modes: bool,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Warnings,
            mixed_modes: false,
        }
    }

    /// Name of the file written for `input`, or None when nothing is written to disk.
    pub fn output_name(&self, input: &str) -> Option<String> {
        if self.output == Output::Stdout {
            return None;
        }
        match self.op_mode {
            Mode::Zip => Some(format!("{}{}", input, SUFFIX)),
            Mode::Unzip => Some(match input.strip_suffix(SUFFIX) {
                Some(stem) if !stem.is_empty() => stem.to_string(),
                _ => format!("{}.out", input),
            }),
            Mode::Test => None,
        }
    }

    /// Level filter matching the verbosity setting.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A byte oriented huffman file compressor",
    long_about = "
    Compresses each file into <file>.huff using a single huffman tree built from the
    byte frequencies of the whole file. Decompression rebuilds the same tree from the
    frequencies stored in the header.

    With no file names, reads standard input and writes standard output."
)]
struct Args {
    /// Files to process
    files: Vec<String>,

    /// Compress the input files (the default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity; decode and discard the output
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Write output to standard out
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Suppress all messages, including errors
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Be verbose. -v lists symbols and codes. -vv and -vvv add debug and trace
    /// detail in debug builds; release builds stop at -v
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u64,
}

/// Put command line information from CLAP into our internal structure.
fn opts_from_args(args: Args) -> HuffOpts {
    let mut opts = HuffOpts::new();
    opts.files = args.files;
    opts.force_overwrite = args.force;
    opts.op_mode = if args.test {
        Mode::Test
    } else if args.decompress {
        Mode::Unzip
    } else {
        Mode::Zip
    };
    if args.stdout || opts.files.is_empty() {
        opts.output = Output::Stdout;
    }
    opts.verbose = match (args.quiet, args.verbose) {
        (true, _) => Verbosity::Quiet,
        (false, 0) => Verbosity::Warnings,
        (false, 1) => Verbosity::Info,
        (false, 2) => Verbosity::Debug,
        _ => Verbosity::Trace,
    };
    opts.mixed_modes = [args.compress, args.decompress, args.test]
        .iter()
        .filter(|&&m| m)
        .count()
        > 1;
    opts
}

/// Parse an explicit argument list (the first item is the program name).
pub fn huffopts_from<I, T>(args: I) -> Result<HuffOpts, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args).map(opts_from_args)
}

/// Parse the process arguments, exiting with clap's message on error, and set the
/// log level to match.
pub fn huffopts_init() -> HuffOpts {
    let opts = huffopts_from(std::env::args_os()).unwrap_or_else(|e| e.exit());
    log::set_max_level(opts.log_level());
    if opts.mixed_modes {
        warn!("More than one operation was requested; using {}", opts.op_mode);
    }

    // Below we report initialization status to the user
    info!("---- huff initialization ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Output goes to {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    opts
}
