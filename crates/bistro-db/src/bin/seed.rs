//! # Seed Data Generator
//!
//! Populates a development database with a small working restaurant:
//! two floors of tables, a staff roster, a menu, and a few bookings.
//!
//! ## Usage
//! ```bash
//! # Default database path (./bistro_dev.db)
//! cargo run -p bistro-db --bin seed
//!
//! # Specify database path
//! cargo run -p bistro-db --bin seed -- --db ./data/bistro.db
//! ```

use std::env;

use chrono::{Duration, Utc};

use bistro_core::{Shape, StaffRole};
use bistro_db::{Database, DbConfig};

/// Floor plans: (table_number, floor, shape). Laid out so nothing overlaps.
const TABLES: &[(i64, i64, Shape)] = &[
    (1, 1, Shape::Rectangle { x: 0, y: 0, width: 100, height: 100 }),
    (2, 1, Shape::Rectangle { x: 150, y: 0, width: 100, height: 100 }),
    (3, 1, Shape::Rectangle { x: 300, y: 0, width: 100, height: 100 }),
    (4, 1, Shape::Circle { x: 80, y: 250, radius: 60 }),
    (5, 1, Shape::Circle { x: 250, y: 250, radius: 60 }),
    (6, 2, Shape::Rectangle { x: 0, y: 0, width: 120, height: 80 }),
    (7, 2, Shape::Rectangle { x: 160, y: 0, width: 120, height: 80 }),
    (8, 2, Shape::Circle { x: 100, y: 200, radius: 70 }),
];

/// Staff roster: (name, role).
const STAFF: &[(&str, StaffRole)] = &[
    ("Alice Martin", StaffRole::Manager),
    ("Ben Okafor", StaffRole::Chef),
    ("Carla Diaz", StaffRole::Waiter),
    ("Dmitri Volkov", StaffRole::Waiter),
];

/// Menu: (name, price in cents).
const MENU: &[(&str, i64)] = &[
    ("Margherita Pizza", 1250),
    ("Quattro Formaggi", 1450),
    ("Spaghetti Carbonara", 1350),
    ("Caesar Salad", 950),
    ("Bruschetta", 650),
    ("Tiramisu", 700),
    ("Espresso", 250),
    ("House Red (glass)", 550),
    ("Sparkling Water", 300),
    ("Bread Basket", 0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./bistro_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bistro RMS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bistro_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🍽  Bistro RMS Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if db.tables().count().await? > 0 {
        println!("⚠ Database already has tables; skipping seed.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Floor plan
    let mut table_ids = Vec::new();
    for &(number, floor, shape) in TABLES {
        let created = db.table_service().create(number, floor, shape).await?;
        table_ids.push(created.id);
    }
    println!("✓ Created {} tables on 2 floors", table_ids.len());

    // Roster
    let mut staff_ids = Vec::new();
    for &(name, role) in STAFF {
        let member = db.staff_service().create(name, role).await?;
        staff_ids.push(member.id);
    }
    println!("✓ Created {} staff members", staff_ids.len());

    // Menu
    let mut item_ids = Vec::new();
    for &(name, price_cents) in MENU {
        let created = db.item_service().create(name, price_cents).await?;
        item_ids.push(created.id);
    }
    println!("✓ Created {} menu items", item_ids.len());

    // Tonight's bookings on table 1: two back-to-back slots.
    let tonight = Utc::now() + Duration::hours(4);
    db.reservation_service()
        .create(&table_ids[0], "Walker, party of 4", tonight, tonight + Duration::hours(2))
        .await?;
    db.reservation_service()
        .create(
            &table_ids[0],
            "Nguyen, party of 2",
            tonight + Duration::hours(2),
            tonight + Duration::hours(4),
        )
        .await?;
    println!("✓ Created 2 reservations");

    // Waiter shifts: lunch and dinner, back to back.
    let opening = Utc::now() + Duration::hours(1);
    db.shift_service()
        .create(&staff_ids[2], opening, opening + Duration::hours(6))
        .await?;
    db.shift_service()
        .create(&staff_ids[3], opening + Duration::hours(6), opening + Duration::hours(12))
        .await?;
    println!("✓ Created 2 shifts");

    // A live order so the floor isn't empty: pizza + espresso on table 2.
    let opened = db
        .order_service()
        .create(
            &table_ids[1],
            &staff_ids[2],
            &[item_ids[0].clone(), item_ids[6].clone()],
        )
        .await?;
    println!("✓ Opened order {} on table 2", opened.id);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
