//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use huff::compression::{compress::compress_file, decompress::decompress_file};
use huff::tools::cli::{huffopts_init, Mode};

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace. The cli sets the real
    // maximum from the verbosity flags. Output data may be on stdout, so log to stderr.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("huff: could not start the logger");
    }

    let options = huffopts_init();

    // No file names means stdin.
    let inputs: Vec<Option<&str>> = if options.files.is_empty() {
        vec![None]
    } else {
        options.files.iter().map(|f| Some(f.as_str())).collect()
    };

    let mut failed = false;
    for input in inputs {
        let name = input.unwrap_or("(stdin)");
        info!("---- {} {} ----", options.op_mode, name);
        let result = match options.op_mode {
            Mode::Zip => compress_file(&options, input).map(|_| ()),
            Mode::Unzip | Mode::Test => decompress_file(&options, input).map(|_| ()),
        };
        if let Err(e) = result {
            error!("{}: {}", name, e);
            failed = true;
        }
    }

    info!("Done.\n");
    if failed {
        std::process::exit(1);
    }
}
