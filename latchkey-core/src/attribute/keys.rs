//! Canonical store key strings.
//!
//! These are the platform secret-store constant values and form the wire
//! contract with the backend. They must never change.

pub const CLASS: &str = "class";
pub const ACCOUNT: &str = "acct";
pub const VALUE_DATA: &str = "v_Data";

pub const SERVER: &str = "srvr";
pub const SECURITY_DOMAIN: &str = "sdmn";
pub const PORT: &str = "port";
pub const AUTHENTICATION_TYPE: &str = "atyp";
pub const PATH: &str = "path";
pub const PROTOCOL: &str = "ptcl";

pub const SERVICE: &str = "svce";
pub const ACCESS_CONTROL: &str = "accc";
pub const GENERIC: &str = "gena";

pub const CREATION_DATE: &str = "cdat";
pub const MODIFICATION_DATE: &str = "mdat";
pub const DESCRIPTION: &str = "desc";
pub const COMMENT: &str = "icmt";
pub const CREATOR: &str = "crtr";
pub const TYPE: &str = "type";
pub const LABEL: &str = "labl";
pub const IS_INVISIBLE: &str = "invi";
pub const IS_NEGATIVE: &str = "nega";
pub const SYNCHRONIZABLE: &str = "sync";

/// Value stored under [`SYNCHRONIZABLE`] to match both synchronized and
/// local-only items.
pub const SYNCHRONIZABLE_ANY: &str = "syna";

pub const RETURN_DATA: &str = "r_Data";
pub const RETURN_ATTRIBUTES: &str = "r_Attributes";
pub const MATCH_LIMIT: &str = "m_Limit";
pub const MATCH_LIMIT_ONE: &str = "m_LimitOne";
pub const MATCH_LIMIT_ALL: &str = "m_LimitAll";

/// Every key an [`Attribute`](crate::Attribute) constructor may produce.
pub const ATTRIBUTE_KEYS: &[&str] = &[
    CLASS,
    ACCOUNT,
    VALUE_DATA,
    SERVER,
    SECURITY_DOMAIN,
    PORT,
    AUTHENTICATION_TYPE,
    PATH,
    PROTOCOL,
    SERVICE,
    ACCESS_CONTROL,
    GENERIC,
    CREATION_DATE,
    MODIFICATION_DATE,
    DESCRIPTION,
    COMMENT,
    CREATOR,
    TYPE,
    LABEL,
    IS_INVISIBLE,
    IS_NEGATIVE,
    SYNCHRONIZABLE,
];

/// Every key a [`SearchOption`](crate::SearchOption) constructor may produce.
pub const OPTION_KEYS: &[&str] = &[RETURN_DATA, RETURN_ATTRIBUTES, MATCH_LIMIT];

/// Whether `key` is a search-control option rather than an item attribute.
pub fn is_option_key(key: &str) -> bool {
    OPTION_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_attribute_keys_unique() {
        let unique: HashSet<_> = ATTRIBUTE_KEYS.iter().collect();
        assert_eq!(unique.len(), ATTRIBUTE_KEYS.len());
    }

    #[test]
    fn test_vocabularies_disjoint() {
        assert!(ATTRIBUTE_KEYS.iter().all(|k| !is_option_key(k)));
        assert!(OPTION_KEYS.iter().all(|k| is_option_key(k)));
    }
}
