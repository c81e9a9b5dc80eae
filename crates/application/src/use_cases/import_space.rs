//! Import workflow: stage a JSON document, pick an admin, create the space.

use std::path::Path;

use spaceport_domain::{CreatedSpace, Credential, SpaceDocument, User, UserId};
use tracing::{info, warn};

use super::install::InstallSpace;
use crate::error::{ApplicationError, ApplicationResult};
use crate::gateway::SpaceGateway;
use crate::ports::{FileSystem, HttpClient};

/// Where the import workflow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPhase {
    /// Nothing staged yet.
    #[default]
    Idle,
    /// The user list is being fetched.
    FetchingUsers,
    /// Users are listed and one may be picked as admin.
    UsersListed,
    /// Content is staged and may be edited.
    EditingContent,
    /// The import requests are in flight.
    Importing,
    /// The space was created and the admin assigned.
    Imported,
    /// The space was created but the admin assignment failed.
    PartiallyImported,
    /// The last action failed.
    Failed,
}

/// Outcome of listing company users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsersListing {
    /// The company has no users.
    Empty,
    /// Users were found.
    Listed {
        /// Number of users.
        count: usize,
        /// Default admin: the first user.
        selected: UserId,
    },
}

/// Import workflow state, owned by the controller.
pub struct ImportWorkflow<C: HttpClient, F: FileSystem> {
    gateway: SpaceGateway<C>,
    installer: InstallSpace<C>,
    fs: F,
    phase: ImportPhase,
    staged: Option<String>,
    users: Vec<User>,
    admin: Option<UserId>,
    status: Option<String>,
}

impl<C: HttpClient, F: FileSystem> ImportWorkflow<C, F> {
    /// Creates an idle workflow.
    pub fn new(gateway: SpaceGateway<C>, fs: F) -> Self {
        Self {
            installer: InstallSpace::new(gateway.clone()),
            gateway,
            fs,
            phase: ImportPhase::Idle,
            staged: None,
            users: Vec::new(),
            admin: None,
            status: None,
        }
    }

    /// Current phase.
    pub const fn phase(&self) -> ImportPhase {
        self.phase
    }

    /// Staged JSON text, if any.
    pub fn staged_content(&self) -> Option<&str> {
        self.staged.as_deref()
    }

    /// Users from the last successful listing.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Chosen administrator.
    pub const fn admin(&self) -> Option<UserId> {
        self.admin
    }

    /// Status line of the last import attempt.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Reads a local JSON file and stages it pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns the read error, or `InvalidJson` after clearing any staged
    /// content if the file does not parse.
    pub async fn stage_file(&mut self, path: &Path) -> ApplicationResult<()> {
        let text = self.fs.read_file_string(path).await?;
        match SpaceDocument::parse(&text) {
            Ok(document) => {
                self.staged = Some(document.to_pretty_string());
                self.phase = ImportPhase::EditingContent;
                info!(path = %path.display(), "template staged");
                Ok(())
            }
            Err(e) => {
                self.staged = None;
                self.phase = ImportPhase::Idle;
                warn!(path = %path.display(), error = %e, "rejected invalid JSON file");
                Err(ApplicationError::InvalidJson(format!("Invalid JSON file: {e}")))
            }
        }
    }

    /// Replaces the staged content. Validation happens on import.
    pub fn edit_content(&mut self, text: impl Into<String>) {
        self.staged = Some(text.into());
        self.phase = ImportPhase::EditingContent;
    }

    /// Lists company users and picks the first as default admin.
    ///
    /// # Errors
    ///
    /// Returns the listing error.
    pub async fn fetch_users(&mut self, credential: &Credential) -> ApplicationResult<UsersListing> {
        let previous = self.phase;
        self.phase = ImportPhase::FetchingUsers;

        self.users.clear();
        self.admin = None;

        let users = match self.gateway.list_users(credential).await {
            Ok(users) => users,
            Err(error) => {
                self.phase = ImportPhase::Failed;
                return Err(error);
            }
        };

        self.users = users;
        self.phase = if previous == ImportPhase::EditingContent {
            previous
        } else {
            ImportPhase::UsersListed
        };
        info!(count = self.users.len(), "users listed");

        let Some(first) = self.users.first() else {
            return Ok(UsersListing::Empty);
        };
        self.admin = Some(first.id);
        Ok(UsersListing::Listed {
            count: self.users.len(),
            selected: first.id,
        })
    }

    /// Sets the administrator of the space to be created.
    pub fn select_admin(&mut self, user: UserId) {
        self.admin = Some(user);
    }

    /// Parses the staged content without sending anything.
    ///
    /// # Errors
    ///
    /// Returns a validation error if nothing is staged, or `InvalidJson`
    /// (moving to `Failed`) if the staged text does not parse.
    pub fn validate_content(&mut self) -> ApplicationResult<SpaceDocument> {
        let Some(staged) = self.staged.as_deref() else {
            return Err(ApplicationError::validation("Please select a JSON file to import."));
        };

        SpaceDocument::parse(staged).map_err(|e| {
            let error =
                ApplicationError::InvalidJson(format!("Invalid JSON format in the editor: {e}"));
            self.fail(ImportPhase::Failed, &error);
            error
        })
    }

    /// Creates a space from the staged content and assigns the admin.
    ///
    /// Malformed staged JSON is reported as `InvalidJson` without sending
    /// any request.
    ///
    /// # Errors
    ///
    /// Returns a validation, content, network or partial-failure error.
    pub async fn import_space(&mut self, credential: &Credential) -> ApplicationResult<CreatedSpace> {
        let document = self.validate_content()?;
        let Some(admin) = self.admin else {
            return Err(ApplicationError::validation(
                "Please choose the user who will administer the new space.",
            ));
        };

        self.phase = ImportPhase::Importing;
        self.status = Some("Importing...".to_string());

        match self.installer.execute(credential, &document, admin).await {
            Ok(space) => {
                self.phase = ImportPhase::Imported;
                self.status = Some(format!(
                    "Successfully imported space: {space} and assigned user {admin} as admin."
                ));
                Ok(space)
            }
            Err(error) => {
                let phase = if matches!(error, ApplicationError::AdminAssignmentFailed { .. }) {
                    ImportPhase::PartiallyImported
                } else {
                    ImportPhase::Failed
                };
                self.fail(phase, &error);
                Err(error)
            }
        }
    }

    fn fail(&mut self, phase: ImportPhase, error: &ApplicationError) {
        self.phase = phase;
        self.status = Some(format!("Error: {error}"));
    }
}
