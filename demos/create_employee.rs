//! "Create employee" demo: adapted guards and a callback-style store
//! composed into one fail-fast workflow.
//!
//! Run with: cargo run --example create_employee
//! Set RUST_LOG=splice=info to see step events.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use splice::{asyncify, compose, from_callback, guard, Continuation};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Domain
// ============================================================================

#[derive(Debug, Clone)]
struct Employee {
    name: String,
    age: u32,
    hair: String,
    license: Option<String>,
    address: Option<String>,
}

const NATURAL_HAIR: [&str; 5] = ["black", "brown", "blonde", "red", "grey"];

fn has_natural_hair(employee: &Employee) -> bool {
    NATURAL_HAIR.contains(&employee.hair.as_str())
}

// ============================================================================
// A callback-style datastore
// ============================================================================

#[derive(Clone, Default)]
struct Database {
    rows: Arc<Mutex<HashMap<u64, Employee>>>,
}

impl Database {
    fn insert(&self, employee: Employee, done: Continuation<u64, String>) {
        let rows = self.rows.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let id = {
                let mut rows = rows.lock();
                let id = rows.len() as u64 + 1;
                println!("  [insert] Stored {} as #{}", employee.name, id);
                rows.insert(id, employee);
                id
            };
            done(Ok(id));
        });
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let db = Database::default();
    let store = db.clone();

    // Bottom to top: age, hair, license, address, then insert.
    let create_employee = compose!(
        from_callback(move |e: Employee, done: Continuation<u64, String>| store.insert(e, done))
            .named("insert"),
        asyncify(guard(
            |e: &Employee| e.address.is_some(),
            "a postal address is required".to_string()
        ))
        .named("ensure_address"),
        asyncify(guard(
            |e: &Employee| e.license.is_some(),
            "a driving license is required".to_string()
        ))
        .named("ensure_license"),
        asyncify(guard(has_natural_hair, "hair colour must be natural".to_string()))
            .named("ensure_natural_hair"),
        asyncify(guard(|e: &Employee| e.age > 17, "must be 18+".to_string()))
            .named("ensure_adult"),
    );

    let candidates = [
        Employee {
            name: "Ada".into(),
            age: 36,
            hair: "brown".into(),
            license: Some("B-1815".into()),
            address: Some("12 St James's Square".into()),
        },
        Employee {
            name: "Tim".into(),
            age: 16,
            hair: "blonde".into(),
            license: None,
            address: Some("3 Elm Road".into()),
        },
        Employee {
            name: "Zig".into(),
            age: 29,
            hair: "green".into(),
            license: Some("C-0042".into()),
            address: Some("7 Neon Lane".into()),
        },
        Employee {
            name: "Bo".into(),
            age: 41,
            hair: "grey".into(),
            license: None,
            address: None,
        },
    ];

    println!("\n=== create employee ===\n");

    for candidate in candidates {
        let name = candidate.name.clone();
        let run = create_employee.run_traced(candidate).await;

        match &run.outcome {
            Ok(id) => println!("  ✓ {name} created as #{id}"),
            Err(reason) => println!("  ✗ {name} rejected: {reason}"),
        }
        for record in run.trace.records() {
            println!(
                "      {:<20} {:?} ({} ms)",
                record.name,
                record.status,
                record.duration_ms().unwrap_or_default()
            );
        }
        if run.trace.skipped() > 0 {
            println!("      ... {} step(s) skipped", run.trace.skipped());
        }
        println!();
    }

    // The same workflow, continuation style.
    let (tx, rx) = tokio::sync::oneshot::channel();
    let late = Employee {
        name: "Grace".into(),
        age: 85,
        hair: "grey".into(),
        license: Some("A-1906".into()),
        address: Some("1 Navy Yard".into()),
    };
    let dispatch = match create_employee.call(late, move |outcome| {
        let _ = tx.send(outcome);
    }) {
        Ok(dispatch) => dispatch,
        Err(e) => {
            eprintln!("could not dispatch: {e}");
            return;
        }
    };
    dispatch.join().await;
    match rx.await {
        Ok(Ok(id)) => println!("  ✓ Grace created as #{id} (via continuation)"),
        Ok(Err(reason)) => println!("  ✗ Grace rejected: {reason}"),
        Err(_) => println!("  ✗ continuation never ran"),
    }

    println!("\n  {} employee(s) stored\n", db.rows.lock().len());
}
