//! Export workflow: list spaces, export one, save it locally.

use std::path::{Path, PathBuf};

use spaceport_domain::{Credential, SpaceId, SpaceSummary};
use tracing::info;

use super::download::save_download;
use crate::error::{ApplicationError, ApplicationResult};
use crate::gateway::SpaceGateway;
use crate::ports::{FileSystem, HttpClient};

/// Where the export workflow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// The space list is being fetched.
    FetchingSpaces,
    /// Spaces are listed and one may be selected.
    SpacesListed,
    /// The export request is in flight.
    Exporting,
    /// An export document is held.
    Exported,
    /// The last action failed.
    Failed,
}

/// Outcome of listing spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpacesListing {
    /// The credential sees no spaces.
    Empty,
    /// Spaces were found.
    Listed {
        /// Number of spaces.
        count: usize,
        /// Default selection, `None` while manual ID entry is active.
        selected: Option<SpaceId>,
    },
}

/// Result of the last export, kept for display and download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeldExport {
    /// The pretty-printed document of a space.
    Document {
        /// Exported space.
        space_id: SpaceId,
        /// Pretty-printed JSON.
        text: String,
    },
    /// The export failed.
    Failed {
        /// Error message.
        message: String,
    },
}

impl HeldExport {
    /// Returns what the operator sees: the JSON, or an `Error:` marker.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Document { text, .. } => text.clone(),
            Self::Failed { message } => format!("Error: {message}"),
        }
    }
}

/// Export workflow state, owned by the controller.
pub struct ExportWorkflow<C: HttpClient, F: FileSystem> {
    gateway: SpaceGateway<C>,
    fs: F,
    phase: ExportPhase,
    credential: Option<Credential>,
    spaces: Vec<SpaceSummary>,
    selected: Option<SpaceId>,
    manual_id: Option<SpaceId>,
    held: Option<HeldExport>,
}

impl<C: HttpClient, F: FileSystem> ExportWorkflow<C, F> {
    /// Creates an idle workflow.
    pub const fn new(gateway: SpaceGateway<C>, fs: F) -> Self {
        Self {
            gateway,
            fs,
            phase: ExportPhase::Idle,
            credential: None,
            spaces: Vec::new(),
            selected: None,
            manual_id: None,
            held: None,
        }
    }

    /// Current phase.
    pub const fn phase(&self) -> ExportPhase {
        self.phase
    }

    /// Spaces from the last successful listing.
    pub fn spaces(&self) -> &[SpaceSummary] {
        &self.spaces
    }

    /// Space selected from the list.
    pub const fn selected(&self) -> Option<&SpaceId> {
        self.selected.as_ref()
    }

    /// Result of the last export.
    pub const fn held(&self) -> Option<&HeldExport> {
        self.held.as_ref()
    }

    /// Sets the credential used by later requests without listing spaces.
    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    /// Enters (`Some`) or leaves (`None`) manual ID entry mode.
    pub fn set_manual_id(&mut self, id: Option<SpaceId>) {
        self.manual_id = id;
    }

    /// Lists spaces and selects the first one by default.
    ///
    /// The credential replaces any earlier one even if the listing fails,
    /// and the previous listing and selection are dropped.
    ///
    /// # Errors
    ///
    /// Returns the listing error; the workflow moves to `Failed` and holds
    /// an error marker.
    pub async fn fetch_spaces(&mut self, credential: Credential) -> ApplicationResult<SpacesListing> {
        self.phase = ExportPhase::FetchingSpaces;
        self.held = None;
        self.spaces.clear();
        self.selected = None;
        let credential = self.credential.insert(credential);

        let spaces = match self.gateway.list_spaces(credential).await {
            Ok(spaces) => spaces,
            Err(error) => {
                self.phase = ExportPhase::Failed;
                self.held = Some(HeldExport::Failed {
                    message: error.to_string(),
                });
                return Err(error);
            }
        };

        self.spaces = spaces;
        self.phase = ExportPhase::SpacesListed;
        info!(count = self.spaces.len(), "spaces listed");

        if self.spaces.is_empty() {
            return Ok(SpacesListing::Empty);
        }

        if self.manual_id.is_none() {
            self.selected = self.spaces.first().map(|space| space.id.clone());
        }

        Ok(SpacesListing::Listed {
            count: self.spaces.len(),
            selected: self.selected.clone(),
        })
    }

    /// Selects a listed space.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the id is not in the current list.
    pub fn select_space(&mut self, id: &SpaceId) -> ApplicationResult<()> {
        if !self.spaces.iter().any(|space| &space.id == id) {
            return Err(ApplicationError::validation(format!(
                "Space {id} is not in the fetched list."
            )));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Returns the space that would be exported.
    pub fn resolved_space_id(&self) -> Option<&SpaceId> {
        self.manual_id.as_ref().or(self.selected.as_ref())
    }

    /// Exports the resolved space and holds its pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no credential or space is set, or the
    /// export error; on failure an error marker is held instead.
    pub async fn export_space(&mut self) -> ApplicationResult<&HeldExport> {
        let Some(space_id) = self.resolved_space_id().cloned() else {
            return Err(ApplicationError::validation("Please select a space to export."));
        };
        let Some(credential) = self.credential.clone() else {
            return Err(ApplicationError::validation("Please enter your API key."));
        };

        self.phase = ExportPhase::Exporting;
        let held = match self.gateway.export_space(&credential, &space_id).await {
            Ok(document) => HeldExport::Document {
                space_id: space_id.clone(),
                text: document.to_pretty_string(),
            },
            Err(error) => {
                self.phase = ExportPhase::Failed;
                self.held = Some(HeldExport::Failed {
                    message: error.to_string(),
                });
                return Err(error);
            }
        };

        info!(%space_id, "space exported");
        self.phase = ExportPhase::Exported;
        Ok(self.held.insert(held))
    }

    /// Saves the held export as `space-export-<id>.json` in `dir`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no document is held, or the write error.
    pub async fn download_json(&self, dir: &Path) -> ApplicationResult<PathBuf> {
        let Some(HeldExport::Document { space_id, text }) = &self.held else {
            return Err(ApplicationError::validation("No data to download."));
        };
        save_download(&self.fs, dir, &space_id.export_file_name(), text).await
    }
}
