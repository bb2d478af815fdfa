// Adapters layer: concrete implementations for external systems (catalog files, http, position input).

pub mod catalog;
pub mod http;
pub mod location;
