//! Common types and steps for tests.
//!
//! This module contains:
//! - `Employee`: The record flowing through the workflow
//! - Failure messages and predicates
//! - `Directory`: A callback-style in-memory store
//! - `create_employee`: The full workflow

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{asyncify, compose, from_callback, guard, Chain, Continuation, Step, Workflow};

// ============================================================================
// Failures
// ============================================================================

/// Every step in the test workflows fails with a static message.
pub type Failure = &'static str;

pub const TOO_YOUNG: Failure = "must be 18+";
pub const WILD_HAIR: Failure = "hair colour must be natural";
pub const NO_LICENSE: Failure = "a driving license is required";
pub const NO_ADDRESS: Failure = "a postal address is required";
pub const EMPTY_HEAD: Failure = "Can't get head of empty array.";

// ============================================================================
// Domain
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub age: u32,
    pub hair: String,
    pub license: Option<String>,
    pub address: Option<String>,
}

impl Employee {
    /// An employee that passes every check.
    pub fn valid(name: &str) -> Self {
        Self {
            name: name.into(),
            age: 30,
            hair: "brown".into(),
            license: Some("B-1234".into()),
            address: Some("1 Main Street".into()),
        }
    }
}

pub fn is_adult(age: &u32) -> bool {
    *age > 17
}

pub fn has_natural_hair(employee: &Employee) -> bool {
    matches!(
        employee.hair.as_str(),
        "black" | "brown" | "blonde" | "red" | "grey"
    )
}

/// First element of a list.
pub fn head(items: Vec<i32>) -> Result<i32, Failure> {
    items.into_iter().next().ok_or(EMPTY_HEAD)
}

// ============================================================================
// Directory
// ============================================================================

/// Row id assigned by the directory.
pub type EmployeeId = usize;

/// In-memory employee table with a callback-style insert.
#[derive(Clone, Default)]
pub struct Directory {
    rows: Arc<RwLock<Vec<Employee>>>,
}

impl Directory {
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn names(&self) -> Vec<String> {
        self.rows.read().iter().map(|e| e.name.clone()).collect()
    }

    /// Store `employee` on a later turn and report its id through `done`.
    pub fn insert(&self, employee: Employee, done: Continuation<EmployeeId, Failure>) {
        let rows = self.rows.clone();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            let id = {
                let mut rows = rows.write();
                rows.push(employee);
                rows.len() - 1
            };
            done(Ok(id));
        });
    }

    pub fn insert_step(&self) -> impl Step<Employee, Failure, Output = EmployeeId> {
        let directory = self.clone();
        from_callback(move |employee: Employee, done: Continuation<EmployeeId, Failure>| {
            directory.insert(employee, done)
        })
        .named("insert")
    }
}

// ============================================================================
// Workflow
// ============================================================================

/// Validate an employee and store it. Steps run bottom to top.
pub fn create_employee(
    directory: &Directory,
) -> Workflow<impl Chain<Employee, Failure, Output = EmployeeId>> {
    compose!(
        directory.insert_step(),
        asyncify(guard(
            |e: &Employee| e.address.is_some(),
            NO_ADDRESS
        ))
        .named("ensure_address"),
        asyncify(guard(
            |e: &Employee| e.license.is_some(),
            NO_LICENSE
        ))
        .named("ensure_license"),
        asyncify(guard(has_natural_hair, WILD_HAIR)).named("ensure_natural_hair"),
        asyncify(guard(|e: &Employee| is_adult(&e.age), TOO_YOUNG)).named("ensure_adult"),
    )
}
