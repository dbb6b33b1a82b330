//! Predicate guards.
//!
//! A guard turns a boolean predicate and a fixed failure value into a
//! direct-style step: the input comes back unchanged when the predicate
//! holds, otherwise the failure value is returned exactly as configured.

/// Check `input` against `predicate`.
///
/// Returns `Ok(input)` when the predicate holds and `Err(failure)` when it
/// does not. The failure value is returned as-is, with no added context.
///
/// The predicate is expected to be total. If it panics, the panic unwinds
/// through `ensure` untouched; it is never turned into `failure`.
///
/// # Example
///
/// ```
/// use splice::ensure;
///
/// assert_eq!(ensure(|age: &u32| *age > 17, "must be 18+", 20), Ok(20));
/// assert_eq!(ensure(|age: &u32| *age > 17, "must be 18+", 16), Err("must be 18+"));
/// ```
pub fn ensure<T, E, P>(predicate: P, failure: E, input: T) -> Result<T, E>
where
    P: FnOnce(&T) -> bool,
{
    if predicate(&input) {
        Ok(input)
    } else {
        Err(failure)
    }
}

/// Bind a predicate and a failure value into a reusable guard.
///
/// This is `ensure` with its first two arguments applied. Each rejected call
/// yields a fresh clone of `failure`.
///
/// # Example
///
/// ```
/// use splice::guard;
///
/// let ensure_of_age = guard(|age: &u32| *age > 17, "must be 18+");
/// assert_eq!(ensure_of_age(16), Err("must be 18+"));
/// assert_eq!(ensure_of_age(20), Ok(20));
/// ```
pub fn guard<T, E, P>(predicate: P, failure: E) -> impl Fn(T) -> Result<T, E> + Clone + Send + Sync
where
    P: Fn(&T) -> bool + Clone + Send + Sync,
    E: Clone + Send + Sync,
{
    move |input| ensure(&predicate, failure.clone(), input)
}
