//! The per-step input: active constraint rows and the Jacobian they were
//! assembled over, in either representation the upstream solver may produce.

/// The constraint family a row belongs to, read from `efc_type[i]`.
///
/// `Contact` covers all three contact friction cones (frictionless,
/// pyramidal, elliptic) — they share the same edge-collection fast path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfcType {
    JointFriction,
    JointLimit,
    Contact,
    Equality,
    Other,
}

/// A single contact's participating geoms.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub geom1: usize,
    pub geom2: usize,
}

/// The constraint Jacobian, in whichever representation the solver produced
/// it for this step. [`crate::jacobian::tree_next`] abstracts over both.
#[derive(Debug, Clone, Copy)]
pub enum Jacobian<'a> {
    Sparse {
        rownnz: &'a [usize],
        rowadr: &'a [usize],
        colind: &'a [i32],
    },
    Dense {
        /// Row-major, `nefc * nv` entries.
        j: &'a [f64],
        nv: usize,
    },
}

/// Per-step constraint data, aligned row-for-row with the Jacobian.
#[derive(Debug, Clone, Copy)]
pub struct Data<'a> {
    /// Number of active constraint rows. May be zero.
    pub nefc: usize,
    pub efc_type: &'a [EfcType],
    pub efc_id: &'a [usize],
    pub jacobian: Jacobian<'a>,
    pub ncon: usize,
    pub ne: usize,
    pub nf: usize,
    pub contact: &'a [Contact],
}
