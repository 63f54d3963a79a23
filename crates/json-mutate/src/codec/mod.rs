//! Codecs for update requests and permission trees.

pub mod json;

pub use json::{
    decode_permissions, decode_update, encode_permissions, encode_update, parse_permissions,
    parse_update,
};
