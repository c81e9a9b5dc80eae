//! Local persistence: downloaded files and operator settings.

mod file_system;
mod settings_repository;

pub use file_system::TokioFileSystem;
pub use settings_repository::{SettingsError, SettingsRepository};
