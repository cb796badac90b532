//! Short correlation tokens attached to every envelope
//!
//! Tokens only need to tell concurrent failures apart in logs; they are not
//! secrets and collisions are tolerated.

use uuid::Uuid;

/// Length of the random part of a token
pub const TOKEN_LEN: usize = 16;

/// Category prefixes, so operators can filter logs at a glance
pub mod prefix {
    pub const BUSINESS: &str = "BIZ";
    pub const TECHNICAL: &str = "TECH";
    pub const VALIDATION: &str = "VAL";
    pub const NOT_FOUND: &str = "NF";
    pub const FIELD_VALIDATION: &str = "VALID";
    pub const BINDING: &str = "BIND";
    pub const METHOD: &str = "METHOD";
    pub const PARAMETER: &str = "PARAM";
    pub const TYPE: &str = "TYPE";
    pub const BODY: &str = "JSON";
    pub const NO_ROUTE: &str = "404";
    pub const UNCLASSIFIED: &str = "ERR";
}

/// Generate a bare 16 character lowercase hex token
pub fn generate() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_LEN);
    token
}

/// Generate `prefix-<token>`
pub fn generate_with_prefix(prefix: &str) -> String {
    format!("{prefix}-{}", generate())
}

/// Check that `token` is `prefix-` followed by a well-formed bare token
pub fn is_well_formed(token: &str, prefix: &str) -> bool {
    token
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|bare| bare.len() == TOKEN_LEN && bare.bytes().all(|b| b.is_ascii_hexdigit()))
}
