//! Workflows: runnable, reusable step pipelines.
//!
//! A [`Workflow`] owns a non-empty [`Chain`] of steps and runs it with
//! fail-fast semantics: each success feeds the next step, the first failure
//! ends the run and reaches the caller unchanged.

use std::borrow::Cow;
use std::sync::Arc;

use crate::continuation::{current_runtime, Dispatch, DispatchError};
use crate::pipeline::{Chain, HLen};
use crate::step::Step;
use crate::trace::Trace;

/// Outcome of a traced run.
#[derive(Debug)]
pub struct Run<T, E> {
    /// The last step's value, or the first failure.
    pub outcome: Result<T, E>,
    /// What ran, in order.
    pub trace: Trace,
}

impl<T, E> Run<T, E> {
    /// Returns `true` if the run completed without failure.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Returns `true` if a step failed.
    pub fn is_failed(&self) -> bool {
        self.outcome.is_err()
    }
}

/// A composed sequence of steps.
///
/// Cloning is cheap; clones share the same steps. Build one with
/// [`pipe!`](crate::pipe) (declared order) or [`compose!`](crate::compose)
/// (right-to-left).
///
/// An empty workflow does not compile:
///
/// ```compile_fail
/// use splice::{HNil, Workflow};
///
/// # async fn run() {
/// let empty = Workflow::new(HNil);
/// let _ = empty.run::<(), ()>(()).await;
/// # }
/// ```
pub struct Workflow<C> {
    chain: Arc<C>,
    name: Option<Cow<'static, str>>,
}

impl<C> Clone for Workflow<C> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            name: self.name.clone(),
        }
    }
}

impl<C> Workflow<C> {
    /// Create a workflow from a chain of steps.
    pub fn new(chain: C) -> Self {
        Self {
            chain: Arc::new(chain),
            name: None,
        }
    }

    /// Attach a name, used when this workflow is nested as a step.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of steps.
    pub fn len(&self) -> usize
    where
        C: HLen,
    {
        C::LEN
    }

    /// Always `false`; a workflow has at least one step.
    pub fn is_empty(&self) -> bool
    where
        C: HLen,
    {
        C::LEN == 0
    }

    /// Run every step in order and return the last value or the first
    /// failure.
    pub async fn run<In, Err>(&self, input: In) -> Result<C::Output, Err>
    where
        C: Chain<In, Err>,
        In: Send + 'static,
        Err: Send + 'static,
    {
        self.run_traced(input).await.outcome
    }

    /// Like [`run`](Self::run), also returning the step trace.
    pub async fn run_traced<In, Err>(&self, input: In) -> Run<C::Output, Err>
    where
        C: Chain<In, Err>,
        In: Send + 'static,
        Err: Send + 'static,
    {
        let mut trace = Trace::new();

        #[cfg(feature = "tracing")]
        tracing::info!(run = %trace.id(), steps = C::LEN, "workflow.start");

        let outcome = self.chain.run_chain(input, &mut trace).await;

        #[cfg(feature = "tracing")]
        tracing::info!(
            run = %trace.id(),
            failed = outcome.is_err(),
            skipped = trace.skipped(),
            "workflow.end"
        );

        Run { outcome, trace }
    }

    /// Run the workflow on the current runtime and hand its outcome to
    /// `continuation`.
    ///
    /// Returns immediately; the continuation is invoked at most once, from
    /// the spawned task. If a step panics the run has no outcome and the
    /// continuation is dropped without being invoked; the panic surfaces
    /// through [`Dispatch::join`]. Outside a runtime this returns
    /// [`DispatchError::NoRuntime`] and nothing runs.
    pub fn call<In, Err, K>(&self, input: In, continuation: K) -> Result<Dispatch, DispatchError>
    where
        C: Chain<In, Err>,
        In: Send + 'static,
        Err: Send + 'static,
        K: FnOnce(Result<C::Output, Err>) + Send + 'static,
    {
        let runtime = current_runtime()?;
        let workflow = self.clone();
        Ok(Dispatch::spawn(&runtime, async move {
            let outcome = workflow.run(input).await;
            continuation(outcome)
        }))
    }
}

// A workflow is itself a step, so workflows nest.
#[async_trait::async_trait]
impl<C, In, Err> Step<In, Err> for Workflow<C>
where
    C: Chain<In, Err>,
    In: Send + 'static,
    Err: Send + 'static,
{
    type Output = C::Output;

    async fn run(&self, input: In) -> Result<Self::Output, Err> {
        Workflow::run(self, input).await
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("workflow")
    }
}
