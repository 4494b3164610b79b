use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use thriftersfind_cli::maintenance::{self, NewSuperAdmin};
use thriftersfind_db::{PgPool, init_db_pool};

#[derive(Parser)]
#[command(name = "thriftersfind-cli")]
#[command(about = "ThriftersFind CLI - Maintenance tools for the OMS", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a super admin account with every permission flag set
    CreateSuperAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Set every permission flag for all users with the super admin role
    RepairPermissions,
    /// Create the default roles if they are missing
    SeedRoles,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateSuperAdmin {
            name,
            email,
            password,
        } => handle_create_super_admin(&pool, name, email, password).await,
        Commands::RepairPermissions => handle_repair_permissions(&pool).await,
        Commands::SeedRoles => handle_seed_roles(&pool).await,
    }
}

fn prompt_text(label: &str) -> String {
    match Input::new().with_prompt(label).interact_text() {
        Ok(value) => value,
        Err(e) => {
            eprintln!("❌ Failed to read {}: {}", label.to_lowercase(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_super_admin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let name = name.unwrap_or_else(|| prompt_text("Name"));
    let email = email.unwrap_or_else(|| prompt_text("Email address"));

    let password = password.unwrap_or_else(|| {
        match Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
        {
            Ok(value) => value,
            Err(e) => {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            }
        }
    });

    let admin = NewSuperAdmin {
        name,
        email,
        password,
    };

    match maintenance::create_super_admin(pool, &admin).await {
        Ok(_) => {
            println!("\n✅ Super admin created successfully!");
            println!("   Email: {}", admin.email);
            println!("   Name: {}", admin.name);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating super admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_repair_permissions(pool: &PgPool) {
    match maintenance::repair_permissions(pool).await {
        Ok(0) => println!("No super admin users found."),
        Ok(count) => println!("✅ Repaired permissions for {} super admin user(s)", count),
        Err(e) => {
            eprintln!("\n❌ Error repairing permissions: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed_roles(pool: &PgPool) {
    match maintenance::seed_roles(pool).await {
        Ok(count) => println!("✅ Created {} role(s)", count),
        Err(e) => {
            eprintln!("\n❌ Error seeding roles: {}", e);
            std::process::exit(1);
        }
    }
}
