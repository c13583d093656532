use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;

use dreamit_cli::admin::create_admin;
use dreamit_cli::seeder::{self, SeedConfig};
use dreamit_db::{PgClassStore, PgPool, PgUserStore, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "dreamit-cli")]
#[command(about = "dreamit CLI - Administrative tools for dreamit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create an administrator account, or promote an existing user
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Display name stored on the profile
        #[arg(short = 'n', long)]
        name: Option<String>,
    },
    /// Seed the database with fake users, teachers and classes
    Seed {
        /// Number of users without a role
        #[arg(short = 'u', long, default_value = "10")]
        users: usize,

        /// Number of teachers
        #[arg(short = 't', long, default_value = "3")]
        teachers: usize,

        /// Number of classes, spread across the teachers
        #[arg(short = 'c', long, default_value = "10")]
        classes: usize,
    },
    /// Remove all seeded data (users and classes under @example.com)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::CreateAdmin { email, name } => handle_create_admin(&pool, email, name).await,
        Commands::Seed {
            users,
            teachers,
            classes,
        } => {
            handle_seed(
                &pool,
                SeedConfig {
                    users,
                    teachers,
                    classes,
                },
            )
            .await
        }
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }

    pool.close().await;
}

async fn handle_migrate(pool: &PgPool) {
    match run_migrations(pool).await {
        Ok(()) => println!("✅ Migrations applied"),
        Err(e) => {
            eprintln!("\n❌ Error running migrations: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_admin(pool: &PgPool, email: Option<String>, name: Option<String>) {
    let email = match email {
        Some(email) => email,
        None => match Input::<String>::new()
            .with_prompt("Email address")
            .interact_text()
        {
            Ok(email) => email,
            Err(e) => {
                eprintln!("\n❌ Error reading email: {}", e);
                std::process::exit(1);
            }
        },
    };

    let users = PgUserStore::new(pool.clone());
    match create_admin(&users, &email, name).await {
        Ok(result) if result.upserted_count == 1 => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", email);
        }
        Ok(result) if result.modified_count == 1 => {
            println!("\n✅ Existing user {} promoted to admin", email);
        }
        Ok(_) => println!("\nℹ️  {} is already an admin", email),
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, config: SeedConfig) {
    let users = PgUserStore::new(pool.clone());
    let classes = PgClassStore::new(pool.clone());

    match seeder::seed_all(&users, &classes, config).await {
        Ok(summary) => println!(
            "   {} users, {} teachers, {} classes",
            summary.users, summary.teachers, summary.classes
        ),
        Err(e) => {
            eprintln!("\n❌ Error seeding database: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    match seeder::clear_seeded(pool).await {
        Ok((users, classes)) => {
            println!("✅ Cleared {} seeded users and {} seeded classes", users, classes);
        }
        Err(e) => {
            eprintln!("\n❌ Error clearing seeded data: {:#}", e);
            std::process::exit(1);
        }
    }
}
