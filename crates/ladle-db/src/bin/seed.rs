//! # Seed Data Generator
//!
//! Populates the database with sample companies, employees, and orders for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p ladle-db --bin seed
//!
//! # Specify database path
//! cargo run -p ladle-db --bin seed -- --db ./data/ladle.db
//! ```
//!
//! ## Generated Data
//! - Client companies with per-item prices from $0.75 to $3.50
//! - A small staff roster covering every role
//! - A handful of submitted orders built through the draft flow, so their
//!   pack/item totals are real computed values

use chrono::{Duration, NaiveDate, Utc};
use std::env;

use ladle_core::{
    Company, Employee, EmployeeRole, OrderDraft, OrderType, RecordStatus,
};
use ladle_db::migrations::migration_status;
use ladle_db::repository::company::generate_company_id;
use ladle_db::repository::employee::generate_employee_id;
use ladle_db::repository::order::generate_order_id;
use ladle_db::{Database, DbConfig};

/// Sample companies: (name, contact, email, phone, address, price cents)
const COMPANIES: &[(&str, &str, &str, &str, &str, i64)] = &[
    (
        "Lakeside Catering",
        "Alex Chen",
        "orders@lakeside-catering.com",
        "555-0101",
        "12 Marina Way",
        250,
    ),
    (
        "Harbor Foods",
        "Dana Wu",
        "purchasing@harborfoods.com",
        "555-0102",
        "88 Dockside Ave",
        175,
    ),
    (
        "Summit Events",
        "Robin Patel",
        "robin@summitevents.com",
        "555-0103",
        "401 Highland Blvd",
        350,
    ),
    (
        "Greenfield Co-op",
        "Morgan Lee",
        "kitchen@greenfield.coop",
        "555-0104",
        "7 Orchard Lane",
        120,
    ),
    (
        "Brick & Vine",
        "Jamie Ortiz",
        "events@brickandvine.com",
        "555-0105",
        "230 Warehouse Row",
        75,
    ),
];

/// Sample staff: (name, email, role)
const EMPLOYEES: &[(&str, &str, EmployeeRole)] = &[
    ("Dana Wu", "dana@ladle.local", EmployeeRole::Admin),
    ("Sam Riley", "sam@ladle.local", EmployeeRole::Manager),
    ("Priya Nair", "priya@ladle.local", EmployeeRole::Staff),
    ("Leo Fontaine", "leo@ladle.local", EmployeeRole::Staff),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./ladle_dev.db");

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
                println!("Ladle Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./ladle_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Ladle Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    let (total, applied) = migration_status(db.pool()).await?;
    println!("✓ Migrations applied ({}/{})", applied, total);

    let existing = db.companies().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} companies", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Companies
    println!();
    println!("Seeding companies...");
    let mut companies = Vec::new();
    for (name, contact, email, phone, address, price_cents) in COMPANIES {
        let company = make_company(name, contact, email, phone, address, *price_cents);
        db.companies().insert(&company).await?;
        companies.push(company);
    }
    println!("✓ {} companies", companies.len());

    // Employees
    println!("Seeding employees...");
    for (name, email, role) in EMPLOYEES {
        let employee = make_employee(name, email, *role);
        db.employees().insert(&employee).await?;
    }
    println!("✓ {} employees", EMPLOYEES.len());

    // Orders: a small spread over the last two weeks, built through the
    // draft flow so every total is computed, not invented
    println!("Seeding orders...");
    let today = Utc::now().date_naive();
    let mut order_count = 0;
    for (offset, company) in companies.iter().enumerate() {
        let date = today - Duration::days(offset as i64 * 3);
        let order = make_order(company, date, offset)?;
        db.orders().insert(&order).await?;
        order_count += 1;
    }
    println!("✓ {} orders", order_count);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn make_company(
    name: &str,
    contact: &str,
    email: &str,
    phone: &str,
    address: &str,
    price_cents: i64,
) -> Company {
    let now = Utc::now();
    Company {
        id: generate_company_id(),
        name: name.to_string(),
        contact_person: contact.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        price_per_item_cents: price_cents,
        status: RecordStatus::Active,
        created_at: now,
        updated_at: now,
    }
}

fn make_employee(name: &str, email: &str, role: EmployeeRole) -> Employee {
    let now = Utc::now();
    Employee {
        id: generate_employee_id(),
        name: name.to_string(),
        email: email.to_string(),
        phone: String::new(),
        role,
        status: RecordStatus::Active,
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap_or_else(|| Utc::now().date_naive()),
        created_at: now,
        updated_at: now,
    }
}

/// Builds one order through the draft flow. Quantities vary with `seed` so
/// the dashboard has something to show.
fn make_order(
    company: &Company,
    date: NaiveDate,
    seed: usize,
) -> Result<ladle_core::Order, Box<dyn std::error::Error>> {
    let mut draft = OrderDraft::new(date);
    draft.select_company(company)?;
    draft.rename_item(1, "Lunch boxes");
    draft.update_pack(1, 1, Some(2 + seed as i64 % 3), Some(4))?;

    if seed % 2 == 0 {
        draft.add_item()?;
        draft.rename_item(2, "Salad trays");
        draft.update_pack(2, 1, Some(1), Some(6))?;
    }

    if seed % 3 == 0 {
        draft.set_order_type(OrderType::Delivery);
        draft.set_delivery_address(&company.address);
    }

    let order = draft.to_order(&generate_order_id(), Utc::now())?;
    Ok(order)
}
