//! Voxia - Conversational travel booking
//!
//! This crate drives a multi-turn booking dialogue: it collects trip
//! parameters, searches flights and hotels, lets the user pick options and
//! turns the picks into a priced travel request for approval.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
