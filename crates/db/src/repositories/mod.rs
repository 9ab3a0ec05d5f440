//! Repository layer for database operations.
//!
//! Repositories provide a clean abstraction over `SeaORM` entities and
//! [`DatabaseSource`] serves them to reports and statistics.

pub mod contribution;
pub mod member;
pub mod source;

mod integration_tests;

pub use contribution::{
    ContributionRepository, ContributionRow, NewContribution, contribution_record,
};
pub use member::{MemberRepository, NewMember, member_record};
pub use source::DatabaseSource;
