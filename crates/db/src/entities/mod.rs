//! `SeaORM` entity definitions.

pub mod prelude;

pub mod contributions;
pub mod members;
pub mod sea_orm_active_enums;
