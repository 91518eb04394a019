//! WordPress REST API access
//!
//! [`WpRestClient`] talks to `{apiUrl}/wp/v2/...` with optional Basic auth
//! (application passwords). Failures surface as [`WpApiError`], whose
//! message names the attempted action and the requested URL.

mod client;
mod error;

pub use client::WpRestClient;
pub use error::{NO_ROUTE_CODE, WpApiError};
