//! Livemarks: a personal bookmark manager whose list stays in sync across
//! sessions in real time.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod backend;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
