use anyhow::Result;
use clap::{error::ErrorKind, Parser};
use rlox::lox::Lox;
use std::{io, path::PathBuf, process};

// exit codes from sysexits(3)
/// the command was used incorrectly, e.g. with the wrong number of arguments
const EX_USAGE: i32 = 64;
/// the input data was incorrect in some way
const EX_DATAERR: i32 = 65;

#[derive(Parser)]
#[command(name = "rlox")]
struct Args {
    /// script to run; starts a prompt when omitted
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => e.exit(),
        Err(_) => {
            println!("Usage: rlox [script]");
            process::exit(EX_USAGE);
        }
    };

    let mut lox = Lox::new();
    match args.script {
        Some(path) => {
            lox.run_file(&path, &mut io::stdout())?;
            if lox.had_error() {
                process::exit(EX_DATAERR);
            }
        }
        None => lox.run_prompt()?,
    }

    Ok(())
}
