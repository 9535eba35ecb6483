//! Placement and adjustment passes.
//!
//! [`placement`] builds the first-draft geometry from the ordered input, and
//! [`adjust`] relaxes it into a collision-free layout. Both re-use
//! [`projection`] to derive signal geometry from actor geometry.

pub(crate) mod adjust;
pub(crate) mod placement;
pub(crate) mod projection;
