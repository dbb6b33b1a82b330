//! Callback-style continuations.
//!
//! A continuation receives the outcome of a step exactly once. `FnOnce`
//! rules out a second invocation at compile time; invoking it at least once
//! is the contract of whoever holds it.

use std::borrow::Cow;
use std::future::Future;
use std::marker::PhantomData;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::step::Step;

/// A boxed continuation for callback-style steps.
pub type Continuation<T, E> = Box<dyn FnOnce(Result<T, E>) + Send + 'static>;

/// Errors raised while scheduling a continuation.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Called outside a Tokio runtime, so there is no next turn to defer to.
    #[error("no Tokio runtime is running on this thread")]
    NoRuntime,
}

/// Get the runtime the continuation will be deferred to.
pub(crate) fn current_runtime() -> Result<Handle, DispatchError> {
    Handle::try_current().map_err(|_| DispatchError::NoRuntime)
}

/// Handle to a task that will invoke a continuation.
///
/// Dropping it detaches the task. If the task panics before the continuation
/// runs, the continuation is dropped uninvoked and the panic is held here;
/// [`join`](Self::join) re-raises it on the awaiting caller.
#[derive(Debug)]
pub struct Dispatch {
    handle: JoinHandle<()>,
}

impl Dispatch {
    pub(crate) fn spawn<Fut>(runtime: &Handle, task: Fut) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: runtime.spawn(task),
        }
    }

    /// Wait until the continuation has run.
    ///
    /// # Panics
    ///
    /// Resumes the panic of the dispatched task, with its original payload.
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            if e.is_panic() {
                std::panic::resume_unwind(e.into_panic());
            }
        }
    }
}

/// Hand `outcome` to `continuation` on a later turn of the runtime.
///
/// The continuation is spawned as its own task, so it never runs inside the
/// caller's stack frame.
pub fn defer<T, E, K>(outcome: Result<T, E>, continuation: K) -> Result<Dispatch, DispatchError>
where
    T: Send + 'static,
    E: Send + 'static,
    K: FnOnce(Result<T, E>) + Send + 'static,
{
    let runtime = current_runtime()?;
    Ok(Dispatch::spawn(&runtime, async move {
        continuation(outcome)
    }))
}

/// Split an outcome into the `(failure, value)` pair of node-style callbacks.
///
/// Exactly one side is `Some`.
pub fn split<T, E>(outcome: Result<T, E>) -> (Option<E>, Option<T>) {
    match outcome {
        Ok(value) => (None, Some(value)),
        Err(failure) => (Some(failure), None),
    }
}

/// A step backed by a native callback-style function. Created by
/// [`from_callback`].
pub struct Callback<F, Out> {
    f: F,
    name: Option<Cow<'static, str>>,
    _output: PhantomData<fn() -> Out>,
}

/// Adapt a function that reports through a trailing continuation into a
/// [`Step`].
///
/// # Panics
///
/// The resulting step panics if `f` drops its continuation without invoking
/// it.
pub fn from_callback<F, Out>(f: F) -> Callback<F, Out> {
    Callback {
        f,
        name: None,
        _output: PhantomData,
    }
}

impl<F, Out> Callback<F, Out> {
    /// Attach a name used in traces and log events.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn label(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| std::any::type_name::<F>())
    }
}

impl<F: Clone, Out> Clone for Callback<F, Out> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            name: self.name.clone(),
            _output: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<F, In, Out, Err> Step<In, Err> for Callback<F, Out>
where
    F: Fn(In, Continuation<Out, Err>) + Send + Sync + 'static,
    In: Send + 'static,
    Out: Send + 'static,
    Err: Send + 'static,
{
    type Output = Out;

    async fn run(&self, input: In) -> Result<Out, Err> {
        let (tx, rx) = oneshot::channel::<Result<Out, Err>>();
        (self.f)(
            input,
            Box::new(move |outcome: Result<Out, Err>| {
                // The receiver is gone only if the run was abandoned.
                let _ = tx.send(outcome);
            }),
        );

        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => panic!(
                "step `{}` dropped its continuation without invoking it",
                self.label()
            ),
        }
    }

    fn name(&self) -> &str {
        self.label()
    }
}
