//! Command-line glue for the `json-mutate` and `json-verify` binaries.
//!
//! Argument parsing is `clap` derive:
//!
//! - `json-mutate [--config FILE] [--permissions JSON] [--default-allow] UPDATE`
//!   reads a document from stdin and prints the updated document. With
//!   `--permissions` the update is verified first and refused on denial.
//! - `json-verify [--default-allow] PERMISSIONS UPDATE` prints
//!   `{"allowed": .., "errors": [..]}`.

use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::codec::json::{parse_permissions, parse_update};
use crate::error::MutateError;
use crate::options::MutateOptions;
use crate::verify::{verify, Verification};
use crate::mutate_with;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Mutate(#[from] MutateError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("DENIED: {}", .0.errors().join(", "))]
    Denied(Verification),
}

// ── Arguments ─────────────────────────────────────────────────────────────

/// Arguments of `json-mutate`.
#[derive(Debug, Parser)]
#[command(name = "json-mutate", version)]
#[command(about = "Apply an update request to a JSON document read from stdin")]
pub struct MutateArgs {
    /// TOML file with mutate options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Permission tree the update must pass before it is applied
    #[arg(long)]
    pub permissions: Option<String>,

    /// Allow fields the permission tree does not mention
    #[arg(long)]
    pub default_allow: bool,

    /// Update request as JSON
    pub update: String,
}

impl MutateArgs {
    /// Options from `--config`, or defaults.
    pub fn options(&self) -> Result<MutateOptions, CliError> {
        match &self.config {
            Some(path) => Ok(MutateOptions::from_toml_str(&std::fs::read_to_string(path)?)?),
            None => Ok(MutateOptions::default()),
        }
    }
}

/// Arguments of `json-verify`.
#[derive(Debug, Parser)]
#[command(name = "json-verify", version)]
#[command(about = "Check an update request against a permission tree")]
pub struct VerifyArgs {
    /// Allow fields the permission tree does not mention
    #[arg(long)]
    pub default_allow: bool,

    /// Permission tree as JSON
    pub permissions: String,

    /// Update request as JSON
    pub update: String,
}

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

// ── json-mutate ───────────────────────────────────────────────────────────

/// Applies an update to a document.
///
/// `perms_json`, when given, is checked first; a denied update yields
/// [`CliError::Denied`] and the document is not touched.
///
/// Returns the updated document as a pretty-printed JSON string.
pub fn apply_update(
    doc_json: &str,
    update_json: &str,
    perms_json: Option<&str>,
    default_allow: bool,
    opts: &MutateOptions,
) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let update = parse_update(update_json)?;
    if let Some(perms_json) = perms_json {
        let verification = verify(&parse_permissions(perms_json)?, &update, default_allow);
        if !verification.allowed() {
            return Err(CliError::Denied(verification));
        }
    }
    let result = mutate_with(&doc, &update, opts);
    Ok(serde_json::to_string_pretty(&result)?)
}

// ── json-verify ───────────────────────────────────────────────────────────

/// Verifies an update against a permission tree.
pub fn check_update(perms_json: &str, update_json: &str, default_allow: bool) -> Result<Verification, CliError> {
    let perms = parse_permissions(perms_json)?;
    let update = parse_update(update_json)?;
    Ok(verify(&perms, &update, default_allow))
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Clock;

    #[test]
    fn parse_mutate_args() {
        let args = MutateArgs::try_parse_from([
            "json-mutate",
            "--default-allow",
            "--permissions",
            "{\"set\": true}",
            "{\"set\": {\"a\": 1}}",
        ])
        .unwrap();
        assert!(args.default_allow);
        assert_eq!(args.permissions.as_deref(), Some("{\"set\": true}"));
        assert_eq!(args.update, "{\"set\": {\"a\": 1}}");
        assert_eq!(args.config, None);
    }

    #[test]
    fn parse_mutate_args_errors() {
        assert!(MutateArgs::try_parse_from(["json-mutate"]).is_err());
        assert!(MutateArgs::try_parse_from(["json-mutate", "{}", "--config"]).is_err());
        assert!(MutateArgs::try_parse_from(["json-mutate", "--verbose", "{}"]).is_err());
        assert!(MutateArgs::try_parse_from(["json-mutate", "{}", "{}"]).is_err());
    }

    #[test]
    fn parse_verify_args() {
        let args = VerifyArgs::try_parse_from(["json-verify", "{}", "{\"set\": {}}", "--default-allow"]).unwrap();
        assert!(args.default_allow);
        assert_eq!(args.permissions, "{}");
        assert_eq!(args.update, "{\"set\": {}}");
        assert!(VerifyArgs::try_parse_from(["json-verify", "{}"]).is_err());
    }

    #[test]
    fn options_default_without_config() {
        let args = MutateArgs::try_parse_from(["json-mutate", "{}"]).unwrap();
        assert_eq!(args.options().unwrap(), MutateOptions::default());
    }

    #[test]
    fn options_from_missing_file() {
        let args =
            MutateArgs::try_parse_from(["json-mutate", "--config", "/nonexistent/json-mutate.toml", "{}"]).unwrap();
        assert!(matches!(args.options(), Err(CliError::Io(_))));
    }

    #[test]
    fn apply_update_without_permissions() {
        let out = apply_update(
            r#"{"age": 16}"#,
            r#"{"$inc": {"age": 1}}"#,
            None,
            false,
            &MutateOptions::default(),
        )
        .unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["age"], 17);
    }

    #[test]
    fn apply_update_denied() {
        let err = apply_update(
            r#"{"age": 16}"#,
            r#"{"inc": {"age": 1}}"#,
            Some(r#"{"push": {"favoriteFoods": true}}"#),
            false,
            &MutateOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "DENIED: increment.age");
    }

    #[test]
    fn apply_update_allowed_with_fixed_clock() {
        let opts = MutateOptions::default().with_clock(Clock::Fixed(99));
        let out = apply_update(
            r#"{"seen": 0}"#,
            r#"{"currentDate": {"seen": true}}"#,
            Some(r#"{"currentDate": true}"#),
            false,
            &opts,
        )
        .unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["seen"], 99);
    }

    #[test]
    fn check_update_reports_errors() {
        let verification = check_update(
            r#"{"push": {"favoriteFoods": true}}"#,
            r#"{"set": {"name": "Michael"}, "push": {"favoriteFoods": []}}"#,
            false,
        )
        .unwrap();
        assert_eq!(verification.errors(), ["set.name"]);
    }

    #[test]
    fn check_update_bad_input() {
        assert!(matches!(check_update("[]", "{}", false), Err(CliError::Mutate(_))));
        assert!(matches!(check_update("{", "{}", false), Err(CliError::Mutate(MutateError::Json(_)))));
    }
}
