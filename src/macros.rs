//! Macros for building workflows.
//!
//! - `pipe!`: steps run in the order they are written
//! - `compose!`: steps run right-to-left, last argument first

/// Build a step chain in declared order. Used by `pipe!` and `compose!`.
#[doc(hidden)]
#[macro_export]
macro_rules! chain {
    ($only:expr $(,)?) => {
        $crate::HSingle::new($only)
    };

    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::HCons::new($first, $crate::chain!($($rest),+))
    };
}

/// Build a [`Workflow`](crate::Workflow) whose steps run in the order given.
///
/// ```
/// use splice::{asyncify, pipe};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let workflow = pipe!(
///     asyncify(|s: &'static str| s.parse::<u32>().map_err(|_| "not a number")),
///     asyncify(|n: u32| Ok::<_, &str>(n + 1)),
/// );
///
/// assert_eq!(workflow.run("41").await, Ok(42));
/// assert_eq!(workflow.run("x").await, Err("not a number"));
/// # }
/// ```
#[macro_export]
macro_rules! pipe {
    ($($step:expr),+ $(,)?) => {
        $crate::Workflow::new($crate::chain!($($step),+))
    };
}

/// Build a [`Workflow`](crate::Workflow) from right to left.
///
/// `compose!(s1, s2, s3)` runs `s3` on the input, feeds its value to `s2`,
/// then to `s1`. It is `pipe!(s3, s2, s1)`.
///
/// ```
/// use splice::{asyncify, compose};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let workflow = compose!(
///     asyncify(|n: u32| Ok::<_, ()>(n * 2)),
///     asyncify(|n: u32| Ok::<_, ()>(n + 1)),
/// );
///
/// // (3 + 1) * 2
/// assert_eq!(workflow.run(3).await, Ok(8));
/// # }
/// ```
#[macro_export]
macro_rules! compose {
    (@rev [$($done:expr),+]) => {
        $crate::pipe!($($done),+)
    };

    (@rev [$($done:expr),*] $next:expr $(, $rest:expr)*) => {
        $crate::compose!(@rev [$next $(, $done)*] $($rest),*)
    };

    ($($step:expr),+ $(,)?) => {
        $crate::compose!(@rev [] $($step),+)
    };
}
