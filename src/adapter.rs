//! Direct-to-continuation adapter.
//!
//! [`asyncify`] lifts a direct-style function, one that returns a value or a
//! failure, into a continuation-style step. The adapted step never completes
//! inside the caller's stack: the callback form spawns the continuation, the
//! [`Step`] form yields to the scheduler once before finishing. Either way it
//! can sit in a workflow next to genuinely asynchronous steps.
//!
//! Functions of several arguments take them as a tuple.

use std::borrow::Cow;

use crate::continuation::{current_runtime, Dispatch, DispatchError};
use crate::step::Step;

/// A direct-style function adapted to continuation style. Created by
/// [`asyncify`].
#[derive(Clone)]
pub struct Asyncified<F> {
    f: F,
    name: Option<Cow<'static, str>>,
}

/// Adapt a direct-style function into a continuation-style step.
///
/// ```
/// use splice::{asyncify, guard};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ensure_of_age = asyncify(guard(|age: &u32| *age > 17, "must be 18+"));
///
/// let (tx, rx) = tokio::sync::oneshot::channel();
/// ensure_of_age
///     .call(16, move |outcome| {
///         let _ = tx.send(outcome);
///     })
///     .unwrap();
/// assert_eq!(rx.await.unwrap(), Err("must be 18+"));
/// # }
/// ```
pub fn asyncify<F>(f: F) -> Asyncified<F> {
    Asyncified { f, name: None }
}

impl<F> Asyncified<F> {
    /// Attach a name used in traces and log events.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Run the wrapped function now and deliver its outcome to
    /// `continuation` on a later turn of the current runtime.
    ///
    /// The function is invoked exactly once and the continuation receives
    /// its return value or its failure, unchanged. A panic in the function
    /// unwinds out of `call` itself. Outside a runtime this returns
    /// [`DispatchError::NoRuntime`] without invoking either.
    pub fn call<In, Out, Err, K>(&self, input: In, continuation: K) -> Result<Dispatch, DispatchError>
    where
        F: Fn(In) -> Result<Out, Err>,
        Out: Send + 'static,
        Err: Send + 'static,
        K: FnOnce(Result<Out, Err>) + Send + 'static,
    {
        let runtime = current_runtime()?;
        let outcome = (self.f)(input);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            step = self.label(),
            failed = outcome.is_err(),
            "continuation.defer"
        );

        Ok(Dispatch::spawn(&runtime, async move {
            continuation(outcome)
        }))
    }

    fn label(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| std::any::type_name::<F>())
    }
}

#[async_trait::async_trait]
impl<F, In, Out, Err> Step<In, Err> for Asyncified<F>
where
    F: Fn(In) -> Result<Out, Err> + Send + Sync + 'static,
    In: Send + 'static,
    Out: Send + 'static,
    Err: Send + 'static,
{
    type Output = Out;

    async fn run(&self, input: In) -> Result<Out, Err> {
        let outcome = (self.f)(input);
        tokio::task::yield_now().await;
        outcome
    }

    fn name(&self) -> &str {
        self.label()
    }
}
