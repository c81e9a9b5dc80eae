//! Creating a space from a document and assigning its administrator.

use spaceport_domain::{CreatedSpace, Credential, MemberAssignment, SpaceDocument, UserId};
use tracing::warn;

use crate::error::{ApplicationError, ApplicationResult};
use crate::gateway::SpaceGateway;
use crate::ports::HttpClient;

/// Two-step installation shared by the import and marketplace workflows.
///
/// The member request is only sent once the creation response has been
/// received and carries the new space id. If it fails, the space stays in
/// place and `ApplicationError::AdminAssignmentFailed` names it.
pub struct InstallSpace<C: HttpClient> {
    gateway: SpaceGateway<C>,
}

impl<C: HttpClient> Clone for InstallSpace<C> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<C: HttpClient> InstallSpace<C> {
    /// Creates the use case over a gateway.
    pub const fn new(gateway: SpaceGateway<C>) -> Self {
        Self { gateway }
    }

    /// Creates the space, then makes `admin` its administrator.
    ///
    /// # Errors
    ///
    /// Returns the creation error as is, or `AdminAssignmentFailed` if only
    /// the second step failed.
    pub async fn execute(
        &self,
        credential: &Credential,
        document: &SpaceDocument,
        admin: UserId,
    ) -> ApplicationResult<CreatedSpace> {
        let space = self.gateway.create_space(credential, document).await?;

        if let Err(reason) = self
            .gateway
            .add_member(credential, &space.id, MemberAssignment::admin(admin))
            .await
        {
            warn!(space_id = %space.id, %admin, error = %reason, "admin assignment failed");
            return Err(ApplicationError::AdminAssignmentFailed {
                space,
                reason: Box::new(reason),
            });
        }

        Ok(space)
    }
}
