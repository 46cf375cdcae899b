pub mod role;

pub use role::GuildRoleApi;
