use anyhow::Result;
use clap::Parser;

mod cli;
mod convert_cmd;
mod export_cmd;
mod inspect_cmd;
mod verify_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert(args) => convert_cmd::run_convert(args),
        Command::Inspect(args) => inspect_cmd::run_inspect(args),
        Command::Verify(args) => verify_cmd::run_verify(args),
        Command::Export(args) => export_cmd::run_export(args),
    }
}
