//! Request handlers, one module per feature area.

pub mod admin;
pub mod compare;
pub mod geocode;
pub mod stats;
pub mod vendors;
