//! Settings module for submerge
//!
//! Server, fetch and default conversion options, loaded from a TOML or
//! YAML file and shared process-wide.

pub mod settings_struct;

// Re-export settings struct and functions
pub use settings_struct::{
    init_settings, update_settings_from_content, DefaultOptions, FetchSettings, ServerSettings,
    Settings, SettingsError,
};
