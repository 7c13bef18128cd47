//! Builder pattern demo.
//!
//! Demonstrates:
//! - The fluent step sequence of `HouseBuilder`
//! - Default steps versus a fully specified build
//!
//! Run with: `cargo run --example builder`

use singleton_catalog::builder::House;

fn main() {
    println!("=== singleton-catalog: Builder ===\n");

    // -------------------------------------------------------------------------
    // 1. Build with defaults
    // -------------------------------------------------------------------------
    println!("1. Building with default steps...");

    let basic = House::builder().build();
    println!("   {basic}");

    // -------------------------------------------------------------------------
    // 2. Full step sequence
    // -------------------------------------------------------------------------
    println!("\n2. Building with every step specified...");

    let villa = House::builder()
        .with_walls(8)
        .with_doors(3)
        .with_windows(12)
        .with_garage()
        .with_garden()
        .build();
    println!("   {villa}");

    // -------------------------------------------------------------------------
    // 3. Reusing a partial sequence
    // -------------------------------------------------------------------------
    println!("\n3. Branching one partial sequence into two houses...");

    let base = House::builder().with_walls(4).with_windows(6);
    let with_garage = base.clone().with_garage().build();
    let with_garden = base.with_garden().build();

    println!("   {with_garage}");
    println!("   {with_garden}");

    println!("\nDone.");
}
