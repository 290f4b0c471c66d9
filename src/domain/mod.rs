//! Domain types shared across the service.

pub mod id;

pub use id::{MembershipId, OrgId, UserId};
