//! json-mutate - declarative JSON document updates with permission checks.
//!
//! # Overview
//!
//! An [`UpdateRequest`] maps operators (`set`, `unset`, `increment`, `min`,
//! `max`, `multiply`, `currentDate`, `push`, `addToSet`, `pop`) to operator
//! sub-documents shaped like the target document. [`mutate`] applies them to
//! a copy of the document in a fixed order. A [`PermissionTree`] of the same
//! shape declares which operators may touch which fields; [`verify`] checks
//! a request against it and reports every offending field path.
//!
//! # Example
//!
//! ```
//! use json_mutate::{codec, mutate, verify};
//! use serde_json::json;
//!
//! let doc = json!({"name": "Michael", "age": 16, "favoriteFoods": [{"name": "galbi"}]});
//! let perms = codec::decode_permissions(&json!({"push": {"favoriteFoods": true}})).unwrap();
//! let update = codec::decode_update(&json!({
//!     "push": {"favoriteFoods": [{"name": "banana"}]}
//! }))
//! .unwrap();
//!
//! let verification = verify(&perms, &update, false);
//! assert!(verification.allowed());
//!
//! let updated = mutate(&doc, &update);
//! assert_eq!(updated["favoriteFoods"][1]["name"], "banana");
//! ```

pub mod cli;
pub mod codec;
pub mod error;
pub mod mutate;
pub mod operators;
pub mod options;
pub mod types;
pub mod verify;

mod util;

// Re-export the core public API
pub use error::MutateError;
pub use json_mutate_util::clone as copy;
pub use mutate::{dispatch_order, mutate, mutate_with};
pub use operators::{definition, operators, OperatorDefinition};
pub use options::{AddToSetMode, Clock, MutateOptions};
pub use types::{Operator, Permission, PermissionTree, UpdateNode, UpdateRequest, UpdateTree};
pub use verify::{verify, verify_request, FieldPath, Verification};
