//! Spaceport Domain - Core business types
//!
//! This crate defines the domain model for the Spaceport space
//! administration client. All types here are pure Rust with no I/O
//! dependencies.

pub mod credential;
pub mod error;
pub mod page;
pub mod request;
pub mod response;
pub mod settings;
pub mod space;
pub mod template;
pub mod user;

pub use credential::{ApiDomain, Credential, KNOWN_DOMAINS};
pub use error::{DomainError, DomainResult};
pub use page::Page;
pub use settings::Settings;
pub use space::{CreatedSpace, MemberAssignment, SpaceDocument, SpaceId, SpaceRole, SpaceSummary};
pub use template::{EntryKind, RepoEntry, Template, display_name_from_folder};
pub use user::{User, UserId};
