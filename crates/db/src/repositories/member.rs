//! Member repository for database operations.

use chrono::NaiveDate;
use dues_core::contribution::{MemberFilter, MemberRecord, MemberStatus};
use dues_shared::types::MemberId;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{members, sea_orm_active_enums::MemberState};

/// Input for creating a member.
#[derive(Debug, Clone)]
pub struct NewMember {
    /// Full name.
    pub full_name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Role within the organization.
    pub role: Option<String>,
    /// Date of joining.
    pub membership_date: Option<NaiveDate>,
    /// Membership status.
    pub status: MemberStatus,
}

/// Member repository for roster queries.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    db: DatabaseConnection,
}

impl MemberRepository {
    /// Creates a new member repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a member by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: MemberId) -> Result<Option<members::Model>, DbErr> {
        members::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Lists members matching the filter, sorted by full name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: &MemberFilter) -> Result<Vec<members::Model>, DbErr> {
        let mut query = members::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(members::Column::Status.eq(MemberState::from(status)));
        }

        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", escape_like(term));
            query = query.filter(Expr::cust_with_values(
                r#"("members"."full_name" ILIKE $1 OR "members"."phone" ILIKE $1)"#,
                [pattern],
            ));
        }

        query
            .order_by_asc(members::Column::FullName)
            .order_by_asc(members::Column::Id)
            .all(&self.db)
            .await
    }

    /// Counts all members.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, DbErr> {
        members::Entity::find().count(&self.db).await
    }

    /// Creates a member.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: NewMember) -> Result<members::Model, DbErr> {
        let now = chrono::Utc::now().into();

        let member = members::ActiveModel {
            id: NotSet,
            full_name: Set(input.full_name),
            phone: Set(input.phone),
            role: Set(input.role),
            membership_date: Set(input.membership_date),
            status: Set(input.status.into()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        member.insert(&self.db).await
    }
}

/// Converts a stored member into its domain record.
#[must_use]
pub fn member_record(model: members::Model) -> MemberRecord {
    MemberRecord {
        id: MemberId::new(model.id),
        full_name: model.full_name,
        phone: model.phone,
        role: model.role,
        membership_date: model.membership_date,
        status: model.status.into(),
    }
}

/// Escapes `LIKE` wildcards so a search term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
