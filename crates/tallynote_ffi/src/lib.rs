//! Flutter bridge crate for tallynote core.

pub mod api;
