// Chapter reader shared type definitions
// Each submodule defines types used across the crate.

pub mod chapter;
pub mod errors;
pub mod preferences;
pub mod settings;
