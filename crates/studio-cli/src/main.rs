use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use studio_cli::seeder::{self, SeedConfig};
use studio_db::{PgPool, Repositories};
use studio_models::{NewUser, SignupRequest};
use validator::Validate;

#[derive(Parser)]
#[command(name = "studio-cli")]
#[command(about = "Studio CLI - Administrative tools for the yoga studio API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a new administrator account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with teachers, users and sessions
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "20")]
        users: usize,

        /// Number of fake teachers besides the default ones
        #[arg(short = 't', long, default_value = "3")]
        teachers: usize,

        /// Number of sessions to create
        #[arg(short = 's', long, default_value = "10")]
        sessions: usize,

        /// Maximum participants per session
        #[arg(long, default_value = "8")]
        max_participants: usize,
    },
    /// Clear seeded data (keeps admins and the default teachers)
    ClearSeed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = studio_db::init_db_pool()
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => handle_create_admin(&pool, first_name, last_name, email, password).await,
        Commands::Seed {
            users,
            teachers,
            sessions,
            max_participants,
        } => {
            let config = SeedConfig::new(users)
                .with_teachers(teachers)
                .with_sessions(sessions, max_participants);
            handle_seed(&pool, config).await
        }
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }

    Ok(())
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, err);
    std::process::exit(1);
}

async fn handle_migrate(pool: &PgPool) {
    match studio_db::run_migrations(pool).await {
        Ok(()) => println!("✅ Migrations applied"),
        Err(e) => fail("Error running migrations", e),
    }
}

fn prompt_or(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let input = (|| -> anyhow::Result<(String, String, String, String)> {
        let first_name = prompt_or(first_name, "First name")?;
        let last_name = prompt_or(last_name, "Last name")?;
        let email = prompt_or(email, "Email address")?;
        let password = match password {
            Some(password) => password,
            None => Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords don't match")
                .interact()?,
        };
        Ok((first_name, last_name, email, password))
    })();

    let (first_name, last_name, email, password) = match input {
        Ok(values) => values,
        Err(e) => fail("Error reading input", e),
    };

    match create_admin_internal(pool, &first_name, &last_name, &email, &password).await {
        Ok(()) => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", email);
            println!("   Name: {} {}", first_name, last_name);
        }
        Err(e) => fail("Error creating admin", e),
    }
}

/// Applies the registration rules to the admin's details.
fn admin_signup(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<SignupRequest> {
    let request = SignupRequest {
        email: email.trim().to_string(),
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        password: password.to_string(),
    };

    if let Err(errors) = request.validate() {
        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect();
        messages.sort();
        anyhow::bail!(messages.join(", "));
    }

    Ok(request)
}

async fn create_admin_internal(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let request = admin_signup(first_name, last_name, email, password)?;

    let repositories = Repositories::postgres(pool.clone());
    if repositories
        .users
        .exists_by_email(email)
        .await
        .map_err(|e| e.error)?
    {
        anyhow::bail!("a user with email {} already exists", email);
    }

    let password_hash = studio_core::hash_password(&request.password).map_err(|e| e.error)?;
    repositories
        .users
        .create(NewUser {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password_hash,
            admin: true,
        })
        .await
        .map_err(|e| e.error)?;

    Ok(())
}

async fn handle_seed(pool: &PgPool, config: SeedConfig) {
    if let Err(e) = seeder::seed_all(pool, config).await {
        fail("Error seeding database", e);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_seed(pool).await {
        fail("Error clearing seeded data", e);
    }
}
