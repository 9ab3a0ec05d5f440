//! Stored enum values.
//!
//! The tables keep the legacy French values; each enum converts to and from
//! its domain counterpart.

use dues_core::contribution::{ContributionStatus, ContributionType, MemberStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ContributionKind {
    #[sea_orm(string_value = "mensuelle")]
    Mensuelle,
    #[sea_orm(string_value = "bapteme")]
    Bapteme,
    #[sea_orm(string_value = "mariage")]
    Mariage,
    #[sea_orm(string_value = "cas_particulier")]
    CasParticulier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "paye")]
    Paye,
    #[sea_orm(string_value = "non_paye")]
    NonPaye,
    #[sea_orm(string_value = "partiel")]
    Partiel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum MemberState {
    #[sea_orm(string_value = "actif")]
    Actif,
    #[sea_orm(string_value = "inactif")]
    Inactif,
}

impl From<ContributionKind> for ContributionType {
    fn from(kind: ContributionKind) -> Self {
        match kind {
            ContributionKind::Mensuelle => Self::Monthly,
            ContributionKind::Bapteme => Self::Baptism,
            ContributionKind::Mariage => Self::Wedding,
            ContributionKind::CasParticulier => Self::SpecialCase,
        }
    }
}

impl From<ContributionType> for ContributionKind {
    fn from(kind: ContributionType) -> Self {
        match kind {
            ContributionType::Monthly => Self::Mensuelle,
            ContributionType::Baptism => Self::Bapteme,
            ContributionType::Wedding => Self::Mariage,
            ContributionType::SpecialCase => Self::CasParticulier,
        }
    }
}

impl From<PaymentStatus> for ContributionStatus {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Paye => Self::Paid,
            PaymentStatus::NonPaye => Self::Unpaid,
            PaymentStatus::Partiel => Self::Partial,
        }
    }
}

impl From<ContributionStatus> for PaymentStatus {
    fn from(status: ContributionStatus) -> Self {
        match status {
            ContributionStatus::Paid => Self::Paye,
            ContributionStatus::Unpaid => Self::NonPaye,
            ContributionStatus::Partial => Self::Partiel,
        }
    }
}

impl From<MemberState> for MemberStatus {
    fn from(state: MemberState) -> Self {
        match state {
            MemberState::Actif => Self::Active,
            MemberState::Inactif => Self::Inactive,
        }
    }
}

impl From<MemberStatus> for MemberState {
    fn from(status: MemberStatus) -> Self {
        match status {
            MemberStatus::Active => Self::Actif,
            MemberStatus::Inactive => Self::Inactif,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveEnum, Iterable};

    #[test]
    fn test_stored_values_parse_as_legacy_names() {
        for kind in ContributionKind::iter() {
            let parsed: ContributionType = kind.to_value().parse().unwrap();
            assert_eq!(parsed, ContributionType::from(kind));
            assert_eq!(ContributionKind::from(parsed), kind);
        }
        for status in PaymentStatus::iter() {
            let parsed: ContributionStatus = status.to_value().parse().unwrap();
            assert_eq!(parsed, ContributionStatus::from(status));
        }
        for state in MemberState::iter() {
            let parsed: MemberStatus = state.to_value().parse().unwrap();
            assert_eq!(MemberState::from(parsed), state);
        }
    }
}
