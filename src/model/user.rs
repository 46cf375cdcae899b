use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::id::{deserialize_u64_from_string, serialize_u64_as_string};

/// Identity of the logged-in Discord user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    #[schema(value_type = String)]
    pub id: u64,
    pub username: String,
    pub avatar: Option<String>,
    pub discriminator: Option<String>,
    /// Whether the user is a member of the guild this server manages.
    #[serde(rename = "inCorrectGuild")]
    pub in_correct_guild: bool,
}
