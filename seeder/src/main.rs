mod data;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use wantbox_shared::WishlistStore;

#[derive(Parser)]
#[command(name = "wantbox-seeder")]
#[command(about = "Database seeding utility for Wantbox")]
struct Args {
    /// Register the demo users and their wishlist items
    #[arg(long)]
    demo: bool,

    /// Number of random items to add
    #[arg(long, default_value = "0")]
    count: usize,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://wantbox.db")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    println!("{}", "=".repeat(80).cyan());
    println!("{}", "Wantbox Database Seeder".bold().cyan());
    println!("{}", "=".repeat(80).cyan());
    println!();

    let store = WishlistStore::open(&args.database_url, 1)
        .await
        .context("Failed to connect to database")?;
    store
        .init_schema()
        .await
        .context("Failed to initialize schema")?;

    let mut rng = if let Some(seed) = args.seed {
        println!("{} Using seed: {}", "ℹ".blue(), seed);
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_entropy()
    };

    let start_time = Instant::now();

    if args.demo {
        let (users, items) = data::create_demo_data(&store).await?;
        println!("{} Created {} demo users", "✓".green(), users);
        println!("{} Created {} demo items", "✓".green(), items);
    }

    let random = data::create_random_items(&store, args.count, &mut rng).await?;
    if random > 0 {
        println!("{} Created {} random items", "✓".green(), random);
    }

    let total_users = store.count_users().await?;
    let total_items = store.count_items().await?;

    let elapsed = start_time.elapsed();
    println!();
    println!("{}", "=".repeat(80).cyan());
    println!(
        "{} Seeding completed in {:.2}s ({} users, {} items in database)",
        "✓".green().bold(),
        elapsed.as_secs_f64(),
        total_users,
        total_items
    );
    println!("{}", "=".repeat(80).cyan());

    Ok(())
}
