//! CLI functionality for the mbeanfmt tool
//!
//! This module contains:
//! - Value document loading
//! - Render context construction from options
//! - Output writing

pub mod input;
pub mod output;
pub mod render;
