use chrono::{TimeZone, Utc};
use test_utils::builder::TestBuilder;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::AuthGuard,
        session::{AuthSession, CsrfSession},
    },
};
