//! The read-only, per-simulation model: kinematic trees, DoFs, tendons and
//! equality constraints. Populated by the kinematics pass; this crate only
//! reads it.

/// Sentinel tree id denoting the static tree (worldbody) — DoFs never belong
/// to it (trees partition the DoFs), but bodies, geoms and equality objects
/// may resolve to it.
pub const STATIC_TREE: i32 = -1;

/// The subtype of an equality constraint, as looked up via `eq_type[efc_id]`.
/// Only `Connect` and `Weld` get a fast edge-collection path; every other
/// subtype falls through to the generic Jacobian scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityKind {
    Connect,
    Weld,
    Other,
}

/// Read-only per-simulation model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Number of degrees of freedom.
    pub nv: usize,
    /// Number of kinematic trees.
    pub ntree: usize,
    /// Number of tendons.
    pub ntendon: usize,
    /// Number of DoFs spanned by each tendon.
    pub tendon_num: Vec<usize>,
    /// Whether each tendon has a length limit constraint.
    pub tendon_limited: Vec<bool>,
    /// Whether each tendon has friction loss.
    pub tendon_frictionloss: Vec<bool>,
    /// Tree id of each DoF. Every entry is a valid index into `0..ntree`;
    /// trees partition the DoFs, so `STATIC_TREE` never appears here.
    pub dof_treeid: Vec<i32>,
    /// Tree id of each body; `STATIC_TREE` for the worldbody.
    pub body_treeid: Vec<i32>,
    /// Body id owning each geom.
    pub geom_bodyid: Vec<i32>,
    /// First DoF address of each joint.
    pub jnt_dofadr: Vec<i32>,
    /// Subtype of each equality constraint.
    pub eq_type: Vec<EqualityKind>,
    /// First coupled body/site of each equality constraint.
    pub eq_obj1id: Vec<i32>,
    /// Second coupled body/site of each equality constraint.
    pub eq_obj2id: Vec<i32>,
}
