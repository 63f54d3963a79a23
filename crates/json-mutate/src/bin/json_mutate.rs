//! `json-mutate` - apply an update request to a document.
//!
//! Usage:
//!   json-mutate [--config FILE] [--permissions JSON] [--default-allow] '<update-json>'
//!
//! The document is read from stdin and the updated document is written to
//! stdout.

use std::io::{self, Read, Write};

use clap::Parser;
use json_mutate::cli::{apply_update, init_tracing, CliError, MutateArgs};

fn run(args: &MutateArgs) -> Result<String, CliError> {
    let opts = args.options()?;

    let mut doc = String::new();
    io::stdin().read_to_string(&mut doc)?;

    apply_update(doc.trim(), &args.update, args.permissions.as_deref(), args.default_allow, &opts)
}

fn main() {
    let args = MutateArgs::parse();
    init_tracing();
    match run(&args) {
        Ok(result) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            if let CliError::Denied(verification) = &e {
                eprintln!("{}", verification.to_json());
            } else {
                eprintln!("{e}");
            }
            std::process::exit(1);
        }
    }
}
