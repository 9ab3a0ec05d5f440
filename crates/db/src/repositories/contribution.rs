//! Contribution repository for database operations.

use chrono::NaiveDate;
use dues_core::contribution::{
    ContributionError, ContributionFilter, ContributionRecord, ContributionStatus,
    ContributionType,
};
use dues_shared::types::{ContributionId, MemberId};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::entities::{
    contributions, members,
    sea_orm_active_enums::{ContributionKind, PaymentStatus},
};

/// Input for recording a contribution.
#[derive(Debug, Clone)]
pub struct NewContribution {
    /// Contribution type.
    pub contribution_type: ContributionType,
    /// Amount, never negative.
    pub amount: Decimal,
    /// Date of the contribution.
    pub date: NaiveDate,
    /// Paying member.
    pub member_id: MemberId,
    /// Payment status.
    pub status: ContributionStatus,
    /// Free-text observation.
    pub note: Option<String>,
    /// Officiant for baptisms and weddings.
    pub officiant: Option<String>,
}

/// A stored contribution with its member, when the member still exists.
pub type ContributionRow = (contributions::Model, Option<members::Model>);

/// Contribution repository.
#[derive(Debug, Clone)]
pub struct ContributionRepository {
    db: DatabaseConnection,
}

impl ContributionRepository {
    /// Creates a new contribution repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists contributions matching the filter, newest first, joined with
    /// their member.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: &ContributionFilter) -> Result<Vec<ContributionRow>, DbErr> {
        let mut query = contributions::Entity::find();

        if let Some(member_id) = filter.member_id {
            query = query.filter(contributions::Column::MemberId.eq(member_id.into_inner()));
        }
        if let Some(kind) = filter.contribution_type {
            query = query
                .filter(contributions::Column::ContributionType.eq(ContributionKind::from(kind)));
        }
        if let Some(status) = filter.status {
            query = query.filter(contributions::Column::Status.eq(PaymentStatus::from(status)));
        }
        if let Some(name) = filter
            .officiant
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            query = query.filter(Expr::cust_with_values(
                r#"LOWER(TRIM("contributions"."officiant")) = $1"#,
                [name.to_lowercase()],
            ));
        }
        if let Some(start) = filter.date_start {
            query = query.filter(contributions::Column::Date.gte(start));
        }
        if let Some(end) = filter.date_end {
            query = query.filter(contributions::Column::Date.lte(end));
        }

        let rows = query
            .find_also_related(members::Entity)
            .order_by_desc(contributions::Column::Date)
            .order_by_desc(contributions::Column::Id)
            .all(&self.db)
            .await?;

        debug!(rows = rows.len(), "fetched contributions");
        Ok(rows)
    }

    /// Counts all contributions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, DbErr> {
        contributions::Entity::find().count(&self.db).await
    }

    /// Records a contribution.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: NewContribution) -> Result<contributions::Model, DbErr> {
        let now = chrono::Utc::now().into();

        let contribution = contributions::ActiveModel {
            id: NotSet,
            contribution_type: Set(input.contribution_type.into()),
            amount: Set(input.amount),
            date: Set(input.date),
            member_id: Set(input.member_id.into_inner()),
            status: Set(input.status.into()),
            note: Set(input.note),
            officiant: Set(input.officiant),
            created_at: Set(now),
            updated_at: Set(now),
        };

        contribution.insert(&self.db).await
    }
}

/// Converts a stored contribution into its domain record.
///
/// # Errors
///
/// Returns an error if the stored amount is negative.
pub fn contribution_record(
    (model, member): ContributionRow,
) -> Result<ContributionRecord, ContributionError> {
    let mut record = ContributionRecord::new(
        ContributionId::new(model.id),
        model.contribution_type.into(),
        model.amount,
        model.date,
        MemberId::new(model.member_id),
        model.status.into(),
    )?;
    record.member_name = member.map(|m| m.full_name);
    record.note = model.note;
    record.officiant = model.officiant;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn model(amount: Decimal, kind: ContributionKind) -> contributions::Model {
        let now = chrono::Utc::now().into();
        contributions::Model {
            id: 11,
            contribution_type: kind,
            amount,
            date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            member_id: 2,
            status: PaymentStatus::NonPaye,
            note: Some("versé en deux fois".to_string()),
            officiant: Some("Fr. Diallo".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn member() -> members::Model {
        let now = chrono::Utc::now().into();
        members::Model {
            id: 2,
            full_name: "Fatoumata Sow".to_string(),
            phone: None,
            role: None,
            membership_date: None,
            status: crate::entities::sea_orm_active_enums::MemberState::Actif,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_contribution_record_conversion() {
        let record =
            contribution_record((model(dec!(20000), ContributionKind::Bapteme), Some(member())))
                .unwrap();

        assert_eq!(record.id, ContributionId::new(11));
        assert_eq!(record.contribution_type, ContributionType::Baptism);
        assert_eq!(record.status, ContributionStatus::Unpaid);
        assert_eq!(record.amount, dec!(20000));
        assert_eq!(record.member_name.as_deref(), Some("Fatoumata Sow"));
        assert_eq!(record.display_officiant(), Some("Fr. Diallo"));
        assert_eq!(record.note.as_deref(), Some("versé en deux fois"));
    }

    #[test]
    fn test_officiant_kept_but_hidden_for_monthly_rows() {
        let record =
            contribution_record((model(dec!(5000), ContributionKind::Mensuelle), None)).unwrap();
        assert_eq!(record.officiant.as_deref(), Some("Fr. Diallo"));
        assert_eq!(record.display_officiant(), None);
        assert_eq!(record.member_name, None);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = contribution_record((model(dec!(-1), ContributionKind::Mensuelle), None));
        assert!(matches!(
            result,
            Err(ContributionError::NegativeAmount { .. })
        ));
    }
}
