//! Role change requests and their per-role outcomes.
//!
//! A `RoleChangeRequest` only becomes a `SanitizedRoleChange` by passing through
//! `RoleChangeRequest::sanitize`, so restricted roles can never reach the upstream
//! grant/revoke calls.

use serenity::all::{RoleId, UserId};

use crate::{
    model::role::{
        RoleChangeActionDto, RoleChangeResultDto, RoleChangeStatusDto, SaveOutcomeDto,
        SaveRolesDto, SaveStatusDto,
    },
    server::{error::role::RoleError, model::role::Classification},
};

/// Role changes requested by a member, before restricted roles are removed.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleChangeRequest {
    pub user_id: UserId,
    pub to_add: Vec<RoleId>,
    pub to_remove: Vec<RoleId>,
}

impl RoleChangeRequest {
    /// Removes every restricted role from both lists.
    ///
    /// Order is preserved and duplicates are kept, each producing its own upstream call.
    ///
    /// # Arguments
    /// - `classification` - Classification fetched for this request
    ///
    /// # Returns
    /// - `Ok(SanitizedRoleChange)` - At least one role change survived
    /// - `Err(RoleError::NoEffectiveChange)` - Both lists are empty after filtering
    pub fn sanitize(
        self,
        classification: &Classification,
    ) -> Result<SanitizedRoleChange, RoleError> {
        let keep = |role_id: &RoleId| !classification.is_restricted(*role_id);

        let to_add: Vec<RoleId> = self.to_add.into_iter().filter(keep).collect();
        let to_remove: Vec<RoleId> = self.to_remove.into_iter().filter(keep).collect();

        if to_add.is_empty() && to_remove.is_empty() {
            return Err(RoleError::NoEffectiveChange);
        }

        Ok(SanitizedRoleChange {
            user_id: self.user_id,
            to_add,
            to_remove,
        })
    }
}

/// Parses the dashboard payload, rejecting zero IDs which Discord never issues.
impl TryFrom<SaveRolesDto> for RoleChangeRequest {
    type Error = RoleError;

    fn try_from(dto: SaveRolesDto) -> Result<Self, Self::Error> {
        let user_id = non_zero(dto.user_id).map(UserId::new)?;
        let to_add = dto
            .roles_to_add
            .into_iter()
            .map(|id| non_zero(id).map(RoleId::new))
            .collect::<Result<_, _>>()?;
        let to_remove = dto
            .roles_to_remove
            .into_iter()
            .map(|id| non_zero(id).map(RoleId::new))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            user_id,
            to_add,
            to_remove,
        })
    }
}

fn non_zero(id: u64) -> Result<u64, RoleError> {
    if id == 0 {
        return Err(RoleError::MalformedPayload("ID must be non-zero".to_string()));
    }
    Ok(id)
}

/// Role changes cleared for application.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedRoleChange {
    user_id: UserId,
    to_add: Vec<RoleId>,
    to_remove: Vec<RoleId>,
}

impl SanitizedRoleChange {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn to_add(&self) -> &[RoleId] {
        &self.to_add
    }

    pub fn to_remove(&self) -> &[RoleId] {
        &self.to_remove
    }

    /// Every upstream call to issue: grants first, then revokes, in request order.
    pub fn changes(&self) -> impl Iterator<Item = (RoleChangeAction, RoleId)> + '_ {
        let grants = self
            .to_add
            .iter()
            .map(|role_id| (RoleChangeAction::Grant, *role_id));
        let revokes = self
            .to_remove
            .iter()
            .map(|role_id| (RoleChangeAction::Revoke, *role_id));

        grants.chain(revokes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChangeAction {
    Grant,
    Revoke,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleChangeStatus {
    Applied,
    Failed(String),
}

/// Outcome of one grant or revoke call.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleChangeResult {
    pub role_id: RoleId,
    pub action: RoleChangeAction,
    pub status: RoleChangeStatus,
}

impl RoleChangeResult {
    pub fn is_applied(&self) -> bool {
        self.status == RoleChangeStatus::Applied
    }

    pub fn into_dto(self) -> RoleChangeResultDto {
        let (status, error) = match self.status {
            RoleChangeStatus::Applied => (RoleChangeStatusDto::Applied, None),
            RoleChangeStatus::Failed(reason) => (RoleChangeStatusDto::Failed, Some(reason)),
        };

        RoleChangeResultDto {
            id: self.role_id.get(),
            action: match self.action {
                RoleChangeAction::Grant => RoleChangeActionDto::Grant,
                RoleChangeAction::Revoke => RoleChangeActionDto::Revoke,
            },
            status,
            error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStatus {
    /// Every role change was applied.
    Success,
    /// Some role changes were applied and some failed.
    Partial,
    /// No role change was applied.
    Failed,
}

/// Per-role results of applying a sanitized change, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    pub results: Vec<RoleChangeResult>,
}

impl ApplyOutcome {
    pub fn new(results: Vec<RoleChangeResult>) -> Self {
        Self { results }
    }

    pub fn status(&self) -> ApplyStatus {
        let applied = self.results.iter().filter(|r| r.is_applied()).count();

        if applied == self.results.len() {
            ApplyStatus::Success
        } else if applied == 0 {
            ApplyStatus::Failed
        } else {
            ApplyStatus::Partial
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &RoleChangeResult> {
        self.results.iter().filter(|r| !r.is_applied())
    }

    pub fn into_dto(self) -> SaveOutcomeDto {
        let status = match self.status() {
            ApplyStatus::Success => SaveStatusDto::Success,
            ApplyStatus::Partial => SaveStatusDto::Partial,
            ApplyStatus::Failed => SaveStatusDto::Failed,
        };

        SaveOutcomeDto {
            status,
            results: self
                .results
                .into_iter()
                .map(RoleChangeResult::into_dto)
                .collect(),
        }
    }
}
