use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use rollcall_cli::admin::{NewAdmin, create_admin};
use rollcall_cli::seeder::{self, SeedConfig};
use rollcall_config::DatabaseConfig;
use rollcall_db::init_db_pool;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "rollcall-cli")]
#[command(about = "Rollcall CLI - Administrative tools for Rollcall", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account
    CreateAdmin {
        /// Login identifier of the admin
        #[arg(short = 'i', long)]
        id: Option<String>,

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
    /// Seed the database with fake teachers, students, lectures and attendance
    Seed {
        /// Number of teachers to create
        #[arg(short = 't', long, default_value = "5")]
        teachers: usize,

        /// Number of students to create
        #[arg(short = 's', long, default_value = "40")]
        students: usize,

        /// Number of lectures per teacher
        #[arg(short = 'l', long, default_value = "8")]
        lectures: usize,

        /// Chance that a student attended a lecture (0.0 - 1.0)
        #[arg(short = 'r', long, default_value = "0.8")]
        rate: f64,
    },
    /// Clear all seeded data (keeps admins and non-seeded users)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateAdmin {
            id,
            name,
            email,
            password,
        } => handle_create_admin(&pool, id, name, email, password).await,
        Commands::Seed {
            teachers,
            students,
            lectures,
            rate,
        } => handle_seed(&pool, teachers, students, lectures, rate).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }

    pool.close().await;
}

async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config)
        .await
        .map_err(|e| format!("Failed to connect to database: {}", e))?;
    Ok(pool)
}

fn prompt(value: Option<String>, label: &str) -> Result<String, dialoguer::Error> {
    match value {
        Some(value) => Ok(value),
        None => Input::new().with_prompt(label).interact_text(),
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    id: Option<String>,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let inputs = (|| -> Result<_, dialoguer::Error> {
        let id = prompt(id, "Admin ID")?;
        let name = prompt(name, "Name")?;
        let email = prompt(email, "Email address")?;
        let password = match password {
            Some(password) => password,
            None => Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords don't match")
                .interact()?,
        };
        Ok((id, name, email, password))
    })();

    let (id, name, email, password) = match inputs {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("\n❌ Failed to read input: {}", e);
            std::process::exit(1);
        }
    };

    let admin = NewAdmin {
        id: &id,
        name: &name,
        email: &email,
        password: &password,
    };

    match create_admin(pool, admin).await {
        Ok(_) => {
            println!("\n✅ Admin created successfully!");
            println!("   ID: {}", id);
            println!("   Name: {}", name);
            println!("   Email: {}", email.to_lowercase());
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, teachers: usize, students: usize, lectures: usize, rate: f64) {
    let config = SeedConfig::new(teachers, students)
        .with_lectures_per_teacher(lectures)
        .with_attendance_rate(rate);

    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}
