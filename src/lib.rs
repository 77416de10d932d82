//! Status Rotator Library
//!
//! This library provides the core of the status rotator: loading the
//! configuration documents, resolving live time and weather variables,
//! publishing statuses to every configured account, and the rotation loop
//! tying them together.

// Module declarations
pub mod config;
pub mod constants;
pub mod models;
pub mod rotation;
pub mod services;
#[cfg(feature = "web")]
pub mod web;
