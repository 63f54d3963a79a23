//! `json-verify` - check an update request against a permission tree.
//!
//! Usage:
//!   json-verify [--default-allow] '<permissions-json>' '<update-json>'
//!
//! Prints `{"allowed": .., "errors": [..]}`. Exits with status 2 when the
//! update is denied and 1 on bad input.

use clap::Parser;
use json_mutate::cli::{check_update, init_tracing, CliError, VerifyArgs};

fn run(args: &VerifyArgs) -> Result<bool, CliError> {
    let verification = check_update(&args.permissions, &args.update, args.default_allow)?;
    println!("{}", verification.to_json());
    Ok(verification.allowed())
}

fn main() {
    // Exit status 2 is reserved for denial.
    let args = match VerifyArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    init_tracing();
    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
