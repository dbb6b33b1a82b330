//! Scenario tests for guards, adapters and workflows.
//!
//! ## Test Organization
//!
//! - `common`: Shared employee domain, predicates and an in-memory directory
//! - `adapt`: `ensure` and `asyncify` behaviour through the callback surface
//! - `workflow`: Composition order, short-circuiting and traces
//! - `callback`: Mixing native callback steps with adapted direct steps
//!
//! ## Test Domain
//!
//! Most tests use a "create employee" workflow:
//! - Guards check age, hair colour, driving license and address
//! - `Directory::insert` is a callback-style store that completes on a later turn

mod common;

mod callback;
