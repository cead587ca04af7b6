//! Data profiling primitives for understanding set membership.

mod membership;

pub use membership::{profile_membership, MembershipProfile};
