//! # Panelgate Access
//!
//! Route access policy for restricted principals.
//!
//! Some panel accounts are handed out to customers or to people who should only
//! ever see the dashboard. Their IDs are listed in configuration, and every
//! authenticated request they make is classified here:
//!
//! - [`Decision::Pass`]: hand the request to the next handler unchanged
//! - [`Decision::EmptyUserPage`] / [`Decision::EmptyList`]: answer with an empty
//!   but well-formed payload so the admin UI keeps rendering
//! - [`Decision::Deny`]: answer with the `403001` failure envelope
//!
//! The evaluator is a pure function of the principal ID, the request path and
//! the two paging query parameters. It holds no mutable state and is shared
//! across requests behind an `Arc`.
//!
//! This crate restricts, it does not authenticate: anonymous requests always
//! pass. Compose it after the authentication layer.
//!
//! # Example
//!
//! ```
//! use panelgate_access::{AccessPolicy, Decision, RequestFacts};
//!
//! let policy = AccessPolicy::standard([7], [9]);
//!
//! let facts = RequestFacts::new(Some(9), "/api/v2/admin/stat/getStats");
//! assert!(matches!(policy.evaluate(&facts), Decision::Pass(_)));
//!
//! let facts = RequestFacts::new(Some(9), "/api/v2/admin/ticket/fetch");
//! assert_eq!(policy.evaluate(&facts), Decision::Deny);
//! ```

pub mod page;
pub mod policy;
pub mod route;
pub mod tier;

pub use page::EmptyPage;
pub use policy::{AccessPolicy, Decision, PassReason, RequestFacts};
pub use route::{VERSION_PREFIX_SEGMENTS, effective_route, trimmed_path};
pub use tier::{
    CUSTOMER_WHITELIST, DASHBOARD_WHITELIST, SpecialCase, SpecialResponse, Tier, TierPolicy,
};
