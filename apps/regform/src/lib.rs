//! # Regform
//!
//! Registration server: HTML form flow and JSON listing over a
//! [`regform_core::Registry`].
//!
//! - [`api`]: axum router, handlers, views and middleware
//! - [`cli`]: clap command-line interface
//! - [`config`]: layered configuration

pub mod api;
pub mod cli;
pub mod config;
