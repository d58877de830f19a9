//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000002_create_roles_table.sql`.

use crate::types::DbId;

pub const ROLE_STAFF: &str = "staff";
pub const ROLE_MEMBER: &str = "member";

/// Role id of `member`, assigned to every self-registered account.
pub const MEMBER_ROLE_ID: DbId = 2;
