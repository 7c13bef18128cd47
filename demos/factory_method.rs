//! Factory Method pattern demo.
//!
//! Demonstrates:
//! - The creator trait deferring product choice to implementors
//! - Shared planning logic written once against the `Transport` interface
//!
//! Run with: `cargo run --example factory_method`

use singleton_catalog::factory::{Logistics, RoadLogistics, SeaLogistics};

fn main() {
    println!("=== singleton-catalog: Factory Method ===\n");

    // -------------------------------------------------------------------------
    // 1. Each creator picks its own product
    // -------------------------------------------------------------------------
    println!("1. Planning deliveries per company...");

    let road = RoadLogistics;
    let sea = SeaLogistics;

    println!("   road: {}", road.plan_delivery());
    println!("   sea:  {}", sea.plan_delivery());

    // -------------------------------------------------------------------------
    // 2. Creators behind one interface
    // -------------------------------------------------------------------------
    println!("\n2. Planning through the shared Logistics interface...");

    let companies: Vec<Box<dyn Logistics>> = vec![Box::new(RoadLogistics), Box::new(SeaLogistics)];
    for (i, company) in companies.iter().enumerate() {
        println!("   company {i}: {}", company.plan_delivery());
    }

    println!("\nDone.");
}
