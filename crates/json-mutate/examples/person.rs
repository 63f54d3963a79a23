//! Builds a person document, checks a proposed update against a permission
//! tree that only allows pushing favourite foods, and applies the update
//! only if it is admissible.
//!
//! Run with `cargo run -p json-mutate --example person`.

use json_mutate::{
    mutate, verify, Operator, Permission, PermissionTree, UpdateRequest, UpdateTree,
};
use serde_json::json;

fn main() {
    let me = json!({
        "name": "Michael",
        "age": 16,
        "location": "My house",
        "favoriteFoods": [{"name": "galbi"}]
    });

    let allowed_mutations = PermissionTree::new().operator(
        Operator::Push,
        Permission::Tree(PermissionTree::new().allow("favoriteFoods")),
    );

    let push_only = UpdateRequest::new().with(
        Operator::Push,
        UpdateTree::new().leaf("favoriteFoods", json!([{"name": "banana"}])),
    );
    let everything = push_only
        .clone()
        .with(Operator::Set, UpdateTree::new().leaf("name", "Michael"))
        .with(Operator::Increment, UpdateTree::new().leaf("age", 1));

    for update in [&everything, &push_only] {
        let verification = verify(&allowed_mutations, update, false);
        println!("{}", verification.to_json());
        if verification.allowed() {
            println!("{:#}", mutate(&me, update));
        }
    }
}
