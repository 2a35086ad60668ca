//! Interactive rectangular region selection for X11
//!
//! [`selector::select`] grabs the pointer and lets the user drag out a
//! rectangle; [`template::Template`] renders the resulting
//! [`domain::Region`] into text for shell scripts.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod selector;
pub mod template;
pub mod x11;
