//! Spaceport Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The paginated list fetcher and typed API gateway
//! - The export, import and marketplace workflows
//! - Application-level error handling

pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod pagination;
pub mod ports;
pub mod use_cases;

mod http;

#[cfg(test)]
pub(crate) mod test_support;

pub use endpoints::{ApiEndpoints, page_url};
pub use error::{ApplicationError, ApplicationResult, ErrorKind};
pub use gateway::SpaceGateway;
pub use pagination::PaginatedFetcher;
pub use ports::{FileSystem, FileSystemError, HttpClient, HttpClientError, Prompt};
pub use use_cases::{
    ExportPhase, ExportWorkflow, HeldExport, ImportPhase, ImportWorkflow, InstallOutcome,
    InstallSpace, Marketplace, SpacesListing, UsersListing,
};
