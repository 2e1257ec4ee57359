//! Registers device types with the Watson IoT Platform.
//!
//! The action checks its required parameters, sends one
//! `POST /device/types` and relays the outcome.

pub mod action;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod params;
pub mod platform;
pub mod proxy;
