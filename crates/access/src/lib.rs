//! # Engage Access
//!
//! The authorization predicate every community mutation runs before it
//! touches storage.
//!
//! ```text
//! (actor?, policy, resource?)
//!     │
//!     ├──> A. authentication   → Deny(Unauthenticated)
//!     ├──> B. role gate        → Deny(RoleNotPermitted)
//!     ├──> C. ownership gate   → Deny(NotOwner)
//!     ├──> D. self-review      → Deny(SelfReview)
//!     │
//!     └──> Allow
//! ```
//!
//! Rules run in that order and the first failure wins. The caller loads the
//! actor and the resource; this crate only compares them.
//!
//! ## Example
//!
//! ```rust
//! use engage_access::{Actor, DenyReason, Operation, Resource, Role, Verdict};
//!
//! let owner = Actor::new("u-17", Role::BusinessOwner);
//! let business = Resource::owned_by("u-17");
//!
//! assert_eq!(
//!     Operation::CreateReview.authorize(Some(&owner), Some(&business)),
//!     Verdict::Deny(DenyReason::SelfReview)
//! );
//! assert!(Operation::RespondToReview
//!     .authorize(Some(&owner), Some(&business))
//!     .is_allowed());
//! ```

mod error;
mod operation;
mod policy;
mod types;

pub use error::{AccessError, Result};
pub use operation::{Operation, Subgraph};
pub use policy::{authorize, AccessPolicy, Authentication, DenyReason, OwnerRule, Verdict};
pub use types::{Actor, ActorId, Resource, Role};
