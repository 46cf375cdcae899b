use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::id::{
    deserialize_u64_from_string, deserialize_u64_list_from_strings, serialize_u64_as_string,
    serialize_u64_list_as_strings,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoleDto {
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    #[schema(value_type = String)]
    pub id: u64,
    pub name: String,
    pub color: u32,
    pub priority: u16,
}

/// Role changes submitted from the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SaveRolesDto {
    #[serde(
        rename = "userID",
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    #[schema(value_type = String)]
    pub user_id: u64,
    #[serde(
        rename = "rolesToAdd",
        serialize_with = "serialize_u64_list_as_strings",
        deserialize_with = "deserialize_u64_list_from_strings"
    )]
    #[schema(value_type = Vec<String>)]
    pub roles_to_add: Vec<u64>,
    #[serde(
        rename = "rolesToRemove",
        serialize_with = "serialize_u64_list_as_strings",
        deserialize_with = "deserialize_u64_list_from_strings"
    )]
    #[schema(value_type = Vec<String>)]
    pub roles_to_remove: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleChangeActionDto {
    Grant,
    Revoke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleChangeStatusDto {
    Applied,
    Failed,
}

/// Result of a single grant or revoke call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoleChangeResultDto {
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    #[schema(value_type = String)]
    pub id: u64,
    pub action: RoleChangeActionDto,
    pub status: RoleChangeStatusDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatusDto {
    Success,
    Partial,
    Failed,
}

/// Aggregate outcome of a save request, one entry per submitted role change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SaveOutcomeDto {
    pub status: SaveStatusDto,
    pub results: Vec<RoleChangeResultDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberRolesDto {
    #[serde(
        rename = "userID",
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    #[schema(value_type = String)]
    pub user_id: u64,
    #[serde(
        serialize_with = "serialize_u64_list_as_strings",
        deserialize_with = "deserialize_u64_list_from_strings"
    )]
    #[schema(value_type = Vec<String>)]
    pub roles: Vec<u64>,
}
