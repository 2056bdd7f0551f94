//! Snaplink - a small URL shortener
//!
//! Allocates collision-free short codes, resolves them with atomic click
//! accounting, and serves HTTP 302 redirects.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line interface
//!
//! # Architecture
//! - `services`: allocation and resolution engine (`LinkService`)
//! - `storage`: `LinkStore` trait with SeaORM and in-memory backends
//! - `api`: HTTP handlers and routes
//! - `cli`: command-line interface
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: logging setup

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
