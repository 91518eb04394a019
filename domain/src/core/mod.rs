//! Core helpers shared across the domain subdomains.

pub mod string;
