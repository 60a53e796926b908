// src/application/ports/util.rs
pub use crate::domain::article::services::SlugGenerator;
