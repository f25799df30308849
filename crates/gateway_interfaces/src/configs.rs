//! Settings for the pages rendered around redirects.

pub mod defaults;
pub mod settings;
pub mod validations;
