//! Shared configuration for the gatecheck workspace.

pub mod config;
pub mod properties;
