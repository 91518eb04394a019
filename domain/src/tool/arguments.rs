//! Shape check for inbound tool arguments

use serde_json::{Map, Value};
use thiserror::Error;

/// Argument carrying the caller's site reference
pub const SITE_KEY_ARG: &str = "siteKey";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Arguments must be an object")]
    NotAnObject,

    #[error("siteKey must be a string if provided")]
    SiteKeyNotString,
}

/// Inbound arguments that passed the structural check
#[derive(Debug, Clone, Copy)]
pub struct SiteSelector<'a> {
    pub arguments: &'a Map<String, Value>,
    pub site_key: Option<&'a str>,
}

/// Check that `arguments` is an object whose `siteKey`, if present, is a
/// string. Nothing else about the arguments is inspected here.
pub fn validate_site_selector(arguments: &Value) -> Result<SiteSelector<'_>, ArgumentError> {
    let object = arguments.as_object().ok_or(ArgumentError::NotAnObject)?;

    let site_key = match object.get(SITE_KEY_ARG) {
        None => None,
        Some(Value::String(key)) => Some(key.as_str()),
        Some(_) => return Err(ArgumentError::SiteKeyNotString),
    };

    Ok(SiteSelector {
        arguments: object,
        site_key,
    })
}
