//! Heterogeneous step lists for compile-time validated pipelines.
//!
//! Each step's output type must match the next step's input type, and the
//! list must be non-empty: `HNil` does not implement [`Chain`], so an empty
//! pipeline is a compile error rather than a runtime surprise.

use crate::step::Step;
use crate::trace::{StepStatus, Trace};

/// Empty heterogeneous list.
///
/// `HNil` intentionally does NOT implement `Chain`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HNil;

/// Non-empty heterogeneous list node.
///
/// `HCons<H, T>` runs `head` and feeds its output to `tail`.
#[derive(Debug, Clone)]
pub struct HCons<H, T> {
    /// The step that runs first.
    pub head: H,
    /// The remaining steps (another HCons or HSingle).
    pub tail: T,
}

impl<H, T> HCons<H, T> {
    /// Create a new HCons with the given head and tail.
    pub fn new(head: H, tail: T) -> Self {
        Self { head, tail }
    }
}

/// Single-element heterogeneous list (base case).
#[derive(Debug, Clone)]
pub struct HSingle<H>(pub H);

impl<H> HSingle<H> {
    /// Create a new single-element list.
    pub fn new(head: H) -> Self {
        Self(head)
    }
}

/// Compile-time length of a non-empty list.
pub trait HLen {
    /// Number of elements.
    const LEN: usize;
}

impl<H> HLen for HSingle<H> {
    const LEN: usize = 1;
}

impl<H, T: HLen> HLen for HCons<H, T> {
    const LEN: usize = 1 + T::LEN;
}

/// A non-empty sequence of steps where each output feeds the next input.
///
/// The first failure stops the sequence; later steps never run.
#[async_trait::async_trait]
pub trait Chain<In, Err>: HLen + Send + Sync + 'static
where
    In: Send + 'static,
    Err: Send + 'static,
{
    /// Output of the last step.
    type Output: Send + 'static;

    /// Run every step in order, recording each into `trace`.
    async fn run_chain(&self, input: In, trace: &mut Trace) -> Result<Self::Output, Err>;
}

#[async_trait::async_trait]
impl<S, In, Err> Chain<In, Err> for HSingle<S>
where
    S: Step<In, Err>,
    In: Send + 'static,
    Err: Send + 'static,
{
    type Output = S::Output;

    async fn run_chain(&self, input: In, trace: &mut Trace) -> Result<Self::Output, Err> {
        run_recorded(&self.0, input, trace).await
    }
}

#[async_trait::async_trait]
impl<S, T, In, Err> Chain<In, Err> for HCons<S, T>
where
    S: Step<In, Err>,
    T: Chain<S::Output, Err>,
    In: Send + 'static,
    Err: Send + 'static,
{
    type Output = T::Output;

    async fn run_chain(&self, input: In, trace: &mut Trace) -> Result<Self::Output, Err> {
        match run_recorded(&self.head, input, trace).await {
            Ok(value) => self.tail.run_chain(value, trace).await,
            Err(e) => {
                trace.skip(T::LEN);
                Err(e)
            }
        }
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
async fn run_recorded<S, In, Err>(step: &S, input: In, trace: &mut Trace) -> Result<S::Output, Err>
where
    S: Step<In, Err>,
    In: Send + 'static,
    Err: Send + 'static,
{
    let index = trace.begin(step.name());

    #[cfg(feature = "tracing")]
    tracing::info!(run = %trace.id(), step = index, name = step.name(), "step.start");

    match step.run(input).await {
        Ok(value) => {
            trace.end(StepStatus::Succeeded);

            #[cfg(feature = "tracing")]
            tracing::info!(run = %trace.id(), step = index, outcome = "succeeded", "step.end");

            Ok(value)
        }
        Err(e) => {
            trace.end(StepStatus::Failed);

            #[cfg(feature = "tracing")]
            tracing::warn!(run = %trace.id(), step = index, outcome = "failed", "step.end");

            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asyncify;

    #[test]
    fn hsingle_creation() {
        let single = HSingle::new(42);
        assert_eq!(single.0, 42);
    }

    #[test]
    fn hcons_creation() {
        let list = HCons::new(1, HSingle::new(2));
        assert_eq!(list.head, 1);
        assert_eq!(list.tail.0, 2);
    }

    #[test]
    fn len_counts_steps() {
        assert_eq!(<HSingle<()> as HLen>::LEN, 1);
        assert_eq!(<HCons<(), HCons<(), HSingle<()>>> as HLen>::LEN, 3);
    }

    #[tokio::test]
    async fn output_feeds_next_input() {
        let chain = HCons::new(
            asyncify(|s: &'static str| Ok::<_, ()>(s.len())),
            HSingle::new(asyncify(|n: usize| Ok::<_, ()>(n * 10))),
        );

        let mut trace = Trace::new();
        assert_eq!(chain.run_chain("abcd", &mut trace).await, Ok(40));
        assert_eq!(trace.records().len(), 2);
        assert!(trace.is_success());
    }

    #[tokio::test]
    async fn failure_skips_tail() {
        let chain = HCons::new(
            asyncify(|n: i32| if n < 0 { Err("negative") } else { Ok(n) }),
            HCons::new(
                asyncify(|n: i32| Ok::<_, &str>(n + 1)),
                HSingle::new(asyncify(|n: i32| Ok::<_, &str>(n * 2))),
            ),
        );

        let mut trace = Trace::new();
        assert_eq!(chain.run_chain(-1, &mut trace).await, Err("negative"));
        assert_eq!(trace.records().len(), 1);
        assert_eq!(trace.skipped(), 2);
    }
}
