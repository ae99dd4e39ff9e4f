//! Access control for Herald guild operations.
//!
//! Authorization is a pure function over explicit value types (the
//! requester's role and permission name sets and the configured
//! [`AccessPolicy`](herald_core::AccessPolicy)), with no dependency on any
//! bot or web framework's user model. The policy is process-wide: it is
//! loaded from the settings file at startup and passed into
//! [`AccessChecker::new`], never read from ambient state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;

pub use checker::AccessChecker;
