//! UI rendering module for the TUI application.
//!
//! This module provides the runtime loop, the main view that lays out the
//! components, the components themselves, theming and small utilities.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
