use anyhow::Result;
use clap::{Parser, Subcommand};

use mos6502_ir::{
    converter::{convert, ConvertArgs},
    emitter::{emit, EmitArgs},
    instrumentation,
    reconstructor::{unconvert, UnconvertArgs},
};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[clap(long, global = true)]
    #[clap(help = "Enable chrome tracing")]
    #[clap(long_help = "Enable chrome tracing which on program exit will generate
a json file to be opened with a chrome tracing compatible
viewer.")]
    trace: bool,
    #[clap(short, long, global = true)]
    #[clap(help = "Log debug events to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[clap(about = "Convert assembly source to an IR document")]
    #[clap(aliases = &["c", "conv"])]
    Convert(ConvertArgs),
    #[clap(about = "Convert an IR document back to assembly source")]
    #[clap(aliases = &["u", "unconv"])]
    Unconvert(UnconvertArgs),
    #[clap(about = "Generate C++ code from an IR document")]
    #[clap(aliases = &["e", "cpp"])]
    Emit(EmitArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _trace_guard = instrumentation::init(cli.trace, cli.verbose);

    match &cli.command {
        Command::Convert(args) => convert(args),
        Command::Unconvert(args) => unconvert(args),
        Command::Emit(args) => emit(args),
    }
}
