pub mod interfaces;

pub use interfaces::{config, AppState};
