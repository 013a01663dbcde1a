//! ## About
//!
//! Partitions a rigid-body solver's active constraint rows, and the degrees
//! of freedom they touch, into disjoint islands: maximal groups that can be
//! solved independently because no constraint couples one group to another.
//!
//! The core algorithm is plain connected-components over a graph whose
//! vertices are kinematic trees and whose edges come from constraints that
//! couple two trees together ([`flood_fill`]). Everything else here is about
//! getting that graph cheaply from a constraint Jacobian ([`jacobian`],
//! [`edges`]) and publishing the result through intrusive, arena-backed
//! output arrays without ever reallocating mid-step ([`budget`], [`builder`]).
//!
//! See [`build_islands`] to get started.
//!
//! ## Naming conventions
//! * Structs – substantives that indicate entities implementing a behavior
//! * Methods – imperative forms with the exception of getters and factories,
//!   which use substantives (i.e., omit a `get_` prefix) much like the
//!   standard library.

pub mod arena;
pub mod budget;
pub mod builder;
pub mod data;
pub mod edges;
pub mod error;
pub mod flood_fill;
pub mod jacobian;
pub mod model;

pub use arena::{Arena, ArenaExhausted, ArenaMark};
pub use builder::{build_islands, IslandOutput};
pub use data::{Contact, Data, EfcType, Jacobian};
pub use error::IslandError;
pub use flood_fill::flood_fill;
pub use model::{EqualityKind, Model, STATIC_TREE};
