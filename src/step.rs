//! The continuation-style step trait.
//!
//! A `Step` takes an input and eventually completes with exactly one of a
//! success value or a failure. Direct-style functions become steps through
//! [`asyncify`](crate::asyncify), async closures through [`step_fn`], and
//! native callback functions through [`from_callback`](crate::from_callback).

use std::borrow::Cow;
use std::future::Future;

/// A single unit of work in a workflow.
///
/// # Type Parameters
/// - `In`: The input consumed by this step
/// - `Err`: The failure type shared by every step of a workflow
#[async_trait::async_trait]
pub trait Step<In, Err>: Send + Sync + 'static
where
    In: Send + 'static,
    Err: Send + 'static,
{
    /// The value produced on success and fed to the next step.
    type Output: Send + 'static;

    /// Run the step to completion.
    ///
    /// Returns `Ok(value)` to hand `value` to the next step, or `Err(e)` to
    /// stop the workflow with `e`.
    async fn run(&self, input: In) -> Result<Self::Output, Err>;

    /// Name used in traces and log events.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A step backed by an async closure. Created by [`step_fn`].
#[derive(Clone)]
pub struct StepFn<F> {
    f: F,
    name: Option<Cow<'static, str>>,
}

/// Wrap an async function as a step.
///
/// ```
/// use splice::{step_fn, Step};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let double = step_fn(|n: u32| async move { Ok::<_, String>(n * 2) });
/// assert_eq!(double.run(21).await, Ok(42));
/// # }
/// ```
pub fn step_fn<F>(f: F) -> StepFn<F> {
    StepFn { f, name: None }
}

impl<F> StepFn<F> {
    /// Attach a name used in traces and log events.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[async_trait::async_trait]
impl<F, Fut, In, Out, Err> Step<In, Err> for StepFn<F>
where
    F: Fn(In) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Out, Err>> + Send + 'static,
    In: Send + 'static,
    Out: Send + 'static,
    Err: Send + 'static,
{
    type Output = Out;

    async fn run(&self, input: In) -> Result<Out, Err> {
        (self.f)(input).await
    }

    fn name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| std::any::type_name::<F>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn step_fn_forwards_success() {
        let step = step_fn(|s: String| async move { Ok::<_, ()>(s.len()) });
        assert_eq!(step.run(String::from("four")).await, Ok(4));
    }

    #[tokio::test]
    async fn step_fn_forwards_failure() {
        let step = step_fn(|_: ()| async { Err::<u8, _>("nope") });
        assert_eq!(step.run(()).await, Err("nope"));
    }

    #[test]
    fn step_fn_name() {
        let step = step_fn(|n: u8| async move { Ok::<_, ()>(n) }).named("identity");
        assert_eq!(Step::<u8, ()>::name(&step), "identity");
    }
}
