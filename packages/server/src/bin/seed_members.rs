// Seeds a handful of demo members and prints a JWT for each so the
// GraphQL API can be exercised by hand.

use anyhow::{Context, Result};
use chrono::Utc;
use duet_core::common::MemberId;
use duet_core::config::Config;
use duet_core::domains::auth::JwtService;
use duet_core::domains::member::models::member::Member;
use sqlx::PgPool;
use uuid::Uuid;

struct SeedMember {
    id: &'static str,
    display_name: &'static str,
    locale: &'static str,
    is_premium: bool,
}

// Fixed ids keep the seed idempotent across reruns.
const SEED_MEMBERS: &[SeedMember] = &[
    SeedMember {
        id: "0198a000-0000-7000-8000-000000000001",
        display_name: "Ava",
        locale: "en",
        is_premium: false,
    },
    SeedMember {
        id: "0198a000-0000-7000-8000-000000000002",
        display_name: "Mateo",
        locale: "es",
        is_premium: true,
    },
    SeedMember {
        id: "0198a000-0000-7000-8000-000000000003",
        display_name: "Noor",
        locale: "en",
        is_premium: false,
    },
    SeedMember {
        id: "0198a000-0000-7000-8000-000000000004",
        display_name: "Lucia",
        locale: "es",
        is_premium: false,
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let config = Config::from_env()?;

    // Connect to database
    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    println!("✓ Connected to database");

    let jwt_service = JwtService::new(&config.jwt_secret, &config.jwt_issuer);

    let mut created_count = 0;
    let mut skipped_count = 0;

    for seed in SEED_MEMBERS {
        let uuid = Uuid::parse_str(seed.id).context("Seed id is not a valid UUID")?;
        let member_id = MemberId::from_uuid(uuid);

        if Member::find_optional(member_id, &pool).await?.is_some() {
            println!("⊘ {} already exists", seed.display_name);
            skipped_count += 1;
        } else {
            let member = Member {
                id: member_id,
                display_name: seed.display_name.to_string(),
                locale: seed.locale.to_string(),
                push_token: None,
                notifications_enabled: true,
                is_premium: seed.is_premium,
                like_count: 20,
                mega_like_count: 5,
                ad_count: 5,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            member.insert(&pool).await.context("Failed to insert member")?;
            println!(
                "✓ Created {} ({})",
                seed.display_name,
                if seed.is_premium { "premium" } else { "free" }
            );
            created_count += 1;
        }

        let token = jwt_service
            .create_token(uuid)
            .context("Failed to mint token")?;
        println!("  id:    {}", uuid);
        println!("  token: {}", token);
    }

    println!("\n✨ Seed complete!");
    println!("   Created: {}", created_count);
    println!("   Skipped: {}", skipped_count);

    Ok(())
}
