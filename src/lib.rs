//! Session Broker - Real-time relay between a game host and its players
//!
//! This crate creates short-lived game sessions identified by four-letter
//! codes, admits one host and any number of players per session over
//! WebSockets, and relays JSON frames between them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
