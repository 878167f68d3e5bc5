use heck::{ToSnakeCase, ToUpperCamelCase};
use md5::{Digest, Md5};

/// First six hex characters of the MD5 digest of `input`.
///
/// Constraint and index names are derived from this digest so that
/// regenerating an unchanged schema yields the same identifiers.
pub(crate) fn digest6(input: &str) -> String {
    let digest = Md5::digest(input.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(6);
    hex
}

/// `book_author` and `bookAuthor` both become `BookAuthor`.
pub fn studly_case(name: &str) -> String {
    name.to_upper_camel_case()
}

pub fn snake_case(name: &str) -> String {
    name.to_snake_case()
}
