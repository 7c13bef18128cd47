//! Singleton pattern demo.
//!
//! Demonstrates:
//! - Lazy, exactly-once construction under concurrent first access
//! - Identity of every resolved handle (`Handle::ptr_eq`)
//! - Constructor failure surfacing to the triggering caller, with retry
//! - Tracing registry operations with `set_trace_callback`
//!
//! Run with: `cargo run --example singleton`

use singleton_catalog::{
    clear_trace_callback, initialized, instance, set_trace_callback, BoxError, Handle, Singleton,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

/// The shared instance. Its constructor sleeps to widen the race window and
/// counts invocations so the demo can prove exactly-once construction.
struct EventBus {
    name: &'static str,
}

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

impl Singleton for EventBus {
    fn construct() -> Result<Self, BoxError> {
        thread::sleep(Duration::from_millis(100));
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        Ok(EventBus { name: "bus-0" })
    }
}

/// A singleton whose construction fails until a flag is flipped.
struct Database;

static DATABASE_UP: AtomicBool = AtomicBool::new(false);

impl Singleton for Database {
    fn construct() -> Result<Self, BoxError> {
        if DATABASE_UP.load(Ordering::SeqCst) {
            Ok(Database)
        } else {
            Err("database unreachable".into())
        }
    }
}

fn main() {
    println!("=== singleton-catalog: Singleton ===\n");

    // -------------------------------------------------------------------------
    // 1. Trace registry operations
    // -------------------------------------------------------------------------
    println!("1. Enabling tracing...");
    set_trace_callback(|event| println!("   [trace] {event}"));

    // -------------------------------------------------------------------------
    // 2. Concurrent first access
    // -------------------------------------------------------------------------
    println!("\n2. Resolving EventBus from 8 threads at once...");

    let barrier = Arc::new(Barrier::new(8));
    let workers: Vec<_> = (0..8)
        .map(|i| {
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let bus: Handle<EventBus> = instance().unwrap();
                println!("   thread {i} sees {}", bus.name);
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    println!(
        "   constructor ran {} time(s)",
        CONSTRUCTIONS.load(Ordering::SeqCst)
    );

    // -------------------------------------------------------------------------
    // 3. Identity of repeated resolutions
    // -------------------------------------------------------------------------
    println!("\n3. Resolving EventBus twice more...");

    let a: Handle<EventBus> = instance().unwrap();
    let b: Handle<EventBus> = instance().unwrap();
    println!("   same object: {}", Handle::ptr_eq(&a, &b));

    // -------------------------------------------------------------------------
    // 4. Construction failure and retry
    // -------------------------------------------------------------------------
    println!("\n4. Constructing Database while it is down...");

    match instance::<Database>() {
        Ok(_) => println!("   unexpected success"),
        Err(err) => println!("   error: {err}"),
    }
    println!(
        "   initialized after failure: {}",
        initialized::<Database>().unwrap()
    );

    println!("   ...bringing the database up and retrying...");
    DATABASE_UP.store(true, Ordering::SeqCst);

    match instance::<Database>() {
        Ok(_) => println!("   retry succeeded"),
        Err(err) => println!("   retry failed: {err}"),
    }
    println!(
        "   initialized after retry: {}",
        initialized::<Database>().unwrap()
    );

    clear_trace_callback();
    println!("\nDone.");
}
