//! Core application module
//!
//! This module contains the application entry point: settings resolution,
//! the select-then-print flow and output handling.

pub mod app;
