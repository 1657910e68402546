//! Configuration management for dirlive.
//!
//! Display, watcher and volume settings ([`settings::Config`]) are stored
//! as a TOML file and loaded at startup.

pub mod settings;
