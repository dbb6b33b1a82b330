#![deny(missing_docs)]

//! Splice — fail-fast pipelines of direct-style and continuation-style steps.
//!
//! # Design Goals
//!
//! - **One outcome shape**: every step finishes with `Result<T, E>`, and the
//!   failure value reaches the caller exactly as the failing step produced it
//! - **Uniform scheduling**: adapted synchronous functions complete on a later
//!   turn of the runtime, just like genuinely asynchronous steps
//! - **Non-empty pipelines**: a workflow with no steps is a compile error
//!
//! # Core Concepts
//!
//! - [`ensure`] / [`guard`]: turn a predicate and a failure value into a check
//! - [`asyncify`]: lift a direct-style function into a continuation-style step
//! - [`Step`]: a unit of work that completes with a value or a failure
//! - [`Workflow`]: steps composed with [`pipe!`] or [`compose!`]; the first
//!   failure skips every remaining step
//!
//! # Example
//!
//! ```
//! use splice::{asyncify, compose, guard};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let check_age = asyncify(guard(|age: &u32| *age > 17, "must be 18+"));
//! let greet = asyncify(|age: u32| Ok::<_, &str>(format!("welcome, {age}")));
//!
//! let workflow = compose!(greet, check_age);
//!
//! assert_eq!(workflow.run(20).await, Ok("welcome, 20".to_string()));
//! assert_eq!(workflow.run(16).await, Err("must be 18+"));
//! # }
//! ```

// Modules
pub mod adapter;
pub mod continuation;
pub mod guard;
mod macros;
pub mod pipeline;
pub mod step;
pub mod trace;
pub mod workflow;

// Re-exports for convenience
pub use adapter::{asyncify, Asyncified};
pub use continuation::{
    defer, from_callback, split, Callback, Continuation, Dispatch, DispatchError,
};
pub use guard::{ensure, guard};
pub use pipeline::{Chain, HCons, HLen, HNil, HSingle};
pub use step::{step_fn, Step, StepFn};
pub use trace::{RunId, StepRecord, StepStatus, Trace};
pub use workflow::{Run, Workflow};

#[cfg(test)]
mod tests;
