//! Application use cases (workflow orchestration).

mod download;
mod export_space;
mod import_space;
mod install;
mod marketplace;

pub use export_space::{ExportPhase, ExportWorkflow, HeldExport, SpacesListing};
pub use import_space::{ImportPhase, ImportWorkflow, UsersListing};
pub use install::InstallSpace;
pub use marketplace::{InstallOutcome, Marketplace};
