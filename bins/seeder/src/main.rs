//! Database seeder for dues service development and demos.
//!
//! Seeds a small roster and a year of contributions covering every type and
//! payment status. Does nothing when members already exist.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use dues_core::contribution::{ContributionStatus, ContributionType, MemberStatus};
use dues_db::repositories::{
    ContributionRepository, MemberRepository, NewContribution, NewMember,
};
use dues_shared::types::MemberId;

/// Demo roster: name, phone, role, joining date (y, m, d), active.
const MEMBERS: [(&str, Option<&str>, Option<&str>, (i32, u32, u32), bool); 6] = [
    ("Mamadou Bah", Some("620 11 22 33"), Some("Président"), (2018, 3, 4), true),
    ("Fatoumata Sow", Some("621 44 55 66"), Some("Secrétaire"), (2019, 1, 12), true),
    ("Ibrahima Diallo", Some("622 77 88 99"), Some("Trésorier"), (2019, 6, 30), true),
    ("Aminata Camara", None, None, (2021, 9, 12), true),
    ("Ousmane Touré", Some("624 00 11 22"), None, (2020, 2, 17), true),
    ("Mariama Barry", None, None, (2017, 11, 5), false),
];

const OFFICIANTS: [&str; 2] = ["Abbé Jean Camara", "Père Michel Kourouma"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("DUES__DATABASE__URL"))
        .context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = dues_db::connect(&database_url)
        .await
        .context("failed to connect to database")?;

    let members = MemberRepository::new(db.clone());
    let contributions = ContributionRepository::new(db);

    if members.count().await? > 0 {
        println!("  Members already exist, skipping...");
        return Ok(());
    }

    println!("Seeding members...");
    let mut ids = Vec::with_capacity(MEMBERS.len());
    for (full_name, phone, role, (y, m, d), active) in MEMBERS {
        let member = members
            .create(NewMember {
                full_name: full_name.to_string(),
                phone: phone.map(String::from),
                role: role.map(String::from),
                membership_date: NaiveDate::from_ymd_opt(y, m, d),
                status: if active {
                    MemberStatus::Active
                } else {
                    MemberStatus::Inactive
                },
            })
            .await?;
        ids.push((MemberId::new(member.id), active));
    }

    println!("Seeding contributions...");
    let year = Utc::now().year();
    let mut seeded = 0_u32;

    for month in 1..=12_u32 {
        for (offset, (member_id, active)) in (0_u32..).zip(&ids) {
            if !*active {
                continue;
            }
            let status = match (month + offset) % 5 {
                0 => ContributionStatus::Unpaid,
                1 => ContributionStatus::Partial,
                _ => ContributionStatus::Paid,
            };
            contributions
                .create(NewContribution {
                    contribution_type: ContributionType::Monthly,
                    amount: Decimal::new(50_000, 0),
                    date: date(year, month, 5)?,
                    member_id: *member_id,
                    status,
                    note: (status == ContributionStatus::Partial)
                        .then(|| "Versement partiel".to_string()),
                    officiant: None,
                })
                .await?;
            seeded += 1;
        }
    }

    let events = [
        (ContributionType::Baptism, 2, 14, 0, Some(OFFICIANTS[0])),
        (ContributionType::Wedding, 5, 20, 1, Some(OFFICIANTS[1])),
        (ContributionType::Baptism, 8, 3, 2, Some(OFFICIANTS[1])),
        (ContributionType::SpecialCase, 10, 9, 3, None),
    ];
    for (contribution_type, month, day, member, officiant) in events {
        contributions
            .create(NewContribution {
                contribution_type,
                amount: Decimal::new(25_000, 0),
                date: date(year, month, day)?,
                member_id: ids[member].0,
                status: ContributionStatus::Paid,
                note: None,
                officiant: officiant.map(String::from),
            })
            .await?;
        seeded += 1;
    }

    println!("Seeded {} members and {seeded} contributions.", ids.len());
    println!("Seeding complete!");
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {year}-{month}-{day}"))
}
