//! Native callback step tests.
//!
//! Callback-style functions, like a datastore insert, sit in the same
//! workflow as adapted direct-style guards.

use crate::{asyncify, from_callback, guard, pipe, Continuation, Step};

use super::common::{is_adult, Directory, Employee, EmployeeId, Failure, TOO_YOUNG};

/// Test that the directory insert works as a standalone step.
#[tokio::test]
async fn insert_step_stores_record() {
    let directory = Directory::default();
    let insert = directory.insert_step();

    assert_eq!(insert.run(Employee::valid("Ada")).await, Ok(0));
    assert_eq!(insert.run(Employee::valid("Grace")).await, Ok(1));
    assert_eq!(directory.names(), ["Ada", "Grace"]);
}

/// Test that a failing callback step stops the workflow like any other.
#[tokio::test]
async fn callback_failure_short_circuits() {
    let directory = Directory::default();

    let reject_all = from_callback(|_: Employee, done: Continuation<Employee, Failure>| {
        tokio::spawn(async move { done(Err("directory is read-only")) });
    })
    .named("read_only");

    let workflow = pipe!(
        asyncify(guard(|e: &Employee| is_adult(&e.age), TOO_YOUNG)),
        reject_all,
        directory.insert_step(),
    );

    let run = workflow.run_traced(Employee::valid("Ada")).await;

    assert_eq!(run.outcome, Err("directory is read-only"));
    assert_eq!(run.trace.skipped(), 1);
    assert_eq!(directory.len(), 0);
}

/// Test that a callback step can invoke its continuation synchronously.
#[tokio::test]
async fn callback_may_complete_inline() {
    let count_chars = from_callback(|s: String, done: Continuation<usize, Failure>| {
        done(Ok(s.chars().count()))
    });

    let workflow = pipe!(
        count_chars,
        asyncify(|n: usize| -> Result<EmployeeId, Failure> { Ok(n) }),
    );

    assert_eq!(workflow.run("héllo".to_string()).await, Ok(5));
}
