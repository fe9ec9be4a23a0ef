//! `liberalia-admin`: account and affiliation maintenance from the command line.
//!
//! Used to bootstrap the first administrator and to backfill missing profiles.

use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use liberalia_catalog::error::CatalogError;
use liberalia_catalog::infra::db::{
    DbAccountRepository, DbAffiliationRepository, DbProfileRepository, DbPublisherRepository,
};
use liberalia_catalog::usecase::account::{
    BackfillProfilesUseCase, CreateAccountInput, CreateAccountUseCase, EnsureProfileUseCase,
    SetRoleUseCase,
};
use liberalia_catalog::usecase::affiliation::{
    AffiliateUseCase, CreatePublisherInput, CreatePublisherUseCase, ListAffiliationsUseCase,
    UnaffiliateUseCase,
};
use liberalia_core::tracing::init_cli_tracing;
use liberalia_domain::role::UserRole;

#[derive(Parser)]
#[command(name = "liberalia-admin", about = "Liberalia catalog administration")]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a user and its profile.
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "LIBERALIA_PASSWORD", hide_env_values = true)]
        password: String,
        /// ADMIN, EDITOR or CONSULTOR.
        #[arg(long, default_value = "CONSULTOR")]
        role: UserRole,
    },
    /// Change a user's role.
    SetRole {
        user_id: Uuid,
        role: UserRole,
    },
    /// Create the default profile of one user if it is missing.
    EnsureProfile { user_id: Uuid },
    /// Create the default profile of every user that has none.
    BackfillProfiles,
    /// Create a publishing house.
    CreatePublisher {
        name: String,
        #[arg(long)]
        tax_id: Option<String>,
    },
    Affiliate { user_id: Uuid, publisher_id: i32 },
    Unaffiliate { user_id: Uuid, publisher_id: i32 },
    ListAffiliations { user_id: Uuid },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_cli_tracing();
    let cli = Cli::parse();

    let db = Database::connect(&cli.database_url)
        .await
        .context("failed to connect to database")?;

    run(Arc::new(db), cli.command).await.map_err(|e| match e {
        CatalogError::Internal(inner) => inner,
        CatalogError::InvalidForm(fields) => {
            let detail = fields
                .iter()
                .map(|f| format!("{}: {}", f.field, f.message))
                .collect::<Vec<_>>()
                .join("; ");
            anyhow::anyhow!("invalid input: {detail}")
        }
        other => anyhow::anyhow!(other),
    })
}

async fn run(db: Arc<DatabaseConnection>, command: Command) -> Result<(), CatalogError> {
    let accounts = DbAccountRepository { db: Arc::clone(&db) };
    let profiles = DbProfileRepository { db: Arc::clone(&db) };
    let publishers = DbPublisherRepository { db: Arc::clone(&db) };
    let affiliations = DbAffiliationRepository { db };

    match command {
        Command::CreateUser {
            username,
            email,
            password,
            role,
        } => {
            let account = CreateAccountUseCase { accounts }
                .execute(CreateAccountInput {
                    username,
                    email,
                    password,
                    role: Some(role),
                })
                .await?;
            println!("{}", account.id);
        }
        Command::SetRole { user_id, role } => {
            SetRoleUseCase { accounts, profiles }
                .execute(user_id, role)
                .await?;
        }
        Command::EnsureProfile { user_id } => {
            let created = EnsureProfileUseCase { profiles }.execute(user_id).await?;
            println!("{}", if created { "created" } else { "exists" });
        }
        Command::BackfillProfiles => {
            let created = BackfillProfilesUseCase { profiles }.execute().await?;
            println!("{created}");
        }
        Command::CreatePublisher { name, tax_id } => {
            let publisher = CreatePublisherUseCase { publishers }
                .execute(CreatePublisherInput { name, tax_id })
                .await?;
            println!("{}", publisher.id);
        }
        Command::Affiliate {
            user_id,
            publisher_id,
        } => {
            AffiliateUseCase {
                accounts,
                publishers,
                affiliations,
            }
            .execute(user_id, publisher_id)
            .await?;
        }
        Command::Unaffiliate {
            user_id,
            publisher_id,
        } => {
            UnaffiliateUseCase { affiliations }
                .execute(user_id, publisher_id)
                .await?;
        }
        Command::ListAffiliations { user_id } => {
            let list = ListAffiliationsUseCase {
                accounts,
                affiliations,
            }
            .execute(user_id)
            .await?;
            for p in list {
                println!("{}\t{}", p.id, p.name);
            }
        }
    }
    Ok(())
}
