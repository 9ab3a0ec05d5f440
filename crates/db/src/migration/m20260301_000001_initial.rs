//! Initial schema: members and their contributions.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SCHEMA_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS contributions CASCADE; DROP TABLE IF EXISTS members CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const SCHEMA_SQL: &str = r"
CREATE TABLE members (
    id BIGSERIAL PRIMARY KEY,
    full_name VARCHAR(200) NOT NULL,
    phone VARCHAR(50),
    role VARCHAR(100),
    membership_date DATE,
    status VARCHAR(20) NOT NULL DEFAULT 'actif',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_members_status CHECK (status IN ('actif', 'inactif'))
);

-- Roster is listed by name
CREATE INDEX idx_members_full_name ON members(full_name);

CREATE TABLE contributions (
    id BIGSERIAL PRIMARY KEY,
    type VARCHAR(20) NOT NULL,
    amount NUMERIC(14, 2) NOT NULL,
    date DATE NOT NULL,
    member_id BIGINT NOT NULL REFERENCES members(id) ON DELETE CASCADE,
    status VARCHAR(20) NOT NULL DEFAULT 'non_paye',
    note TEXT,
    officiant TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_contributions_type
        CHECK (type IN ('mensuelle', 'bapteme', 'mariage', 'cas_particulier')),
    CONSTRAINT chk_contributions_status CHECK (status IN ('paye', 'non_paye', 'partiel')),
    CONSTRAINT chk_contributions_amount CHECK (amount >= 0)
);

-- Listing order and date-range filters
CREATE INDEX idx_contributions_date ON contributions(date DESC, id DESC);

-- Member history
CREATE INDEX idx_contributions_member ON contributions(member_id, date DESC);

-- Per-type reports
CREATE INDEX idx_contributions_type ON contributions(type, date DESC);
";
