//! Repository traits and SQLx implementations.

pub mod membership;
pub mod organisation;
pub mod user;

pub use membership::{MembershipRepository, SqlxMembershipRepository};
pub use organisation::{OrganisationRepository, SqlxOrganisationRepository};
pub use user::{SqlxUserRepository, UserRepository};
