//! `SeaORM` entity prelude.

pub use super::contributions::Entity as Contributions;
pub use super::members::Entity as Members;
