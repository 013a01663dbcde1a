//! Turn the edges [`crate::edges::collect_edges`] found into islands, allocate
//! the intrusive output arrays from the [`Arena`], and thread DoFs and
//! constraint rows onto their island's linked list.
//!
//! Arena rollback lives inside [`build_islands`]: any allocation failure here
//! is recoverable — rewind to the entry watermark, warn, and report zero
//! islands rather than propagate.

use itertools::Itertools;
use tracing::warn;

use crate::arena::{Arena, ArenaExhausted};
use crate::budget::edge_budget;
use crate::data::Data;
use crate::edges::collect_edges;
use crate::error::IslandError;
use crate::flood_fill::flood_fill;
use crate::jacobian::tree_next;
use crate::model::{Model, STATIC_TREE};

/// The published result of one island-discovery pass.
///
/// `*_island` holds each element's island id (or `-1` if it participates in
/// no active constraint and thus no island); `*_islandnext` is the intrusive
/// next-link of elements sharing an island, threaded in ascending index
/// order; `island_*adr` is each island's list head.
#[derive(Debug, Clone)]
pub struct IslandOutput {
    pub nisland: usize,
    pub dof_island: Vec<i32>,
    pub dof_islandnext: Vec<i32>,
    pub island_dofadr: Vec<i32>,
    pub efc_island: Vec<i32>,
    pub efc_islandnext: Vec<i32>,
    pub island_efcadr: Vec<i32>,
}

impl IslandOutput {
    fn empty(nv: usize, nefc: usize) -> Self {
        IslandOutput {
            nisland: 0,
            dof_island: vec![-1; nv],
            dof_islandnext: vec![-1; nv],
            island_dofadr: Vec::new(),
            efc_island: vec![-1; nefc],
            efc_islandnext: vec![-1; nefc],
            island_efcadr: Vec::new(),
        }
    }
}

/// Internal distinction between the two failure modes island building can
/// hit: one routes through the arena rollback, the other is propagated as-is.
enum BuildFailure {
    ArenaExhausted(ArenaExhausted),
    Fatal(IslandError),
}

impl From<IslandError> for BuildFailure {
    fn from(err: IslandError) -> Self {
        BuildFailure::Fatal(err)
    }
}

/// Discover constraint islands for the current step.
///
/// On arena exhaustion, rewinds to the entry watermark, emits a
/// `tracing::warn!`, and returns an empty [`IslandOutput`] (every DoF and
/// constraint row unassigned, `nisland == 0`) rather than failing the step.
/// Any other error is a fatal invariant violation and is propagated.
#[tracing::instrument(skip(model, data, arena), fields(nefc = data.nefc))]
pub fn build_islands(model: &Model, data: &Data, arena: &mut Arena) -> Result<IslandOutput, IslandError> {
    if data.nefc == 0 {
        return Ok(IslandOutput::empty(model.nv, data.nefc));
    }

    let mark = arena.mark();
    match build_islands_inner(model, data, arena) {
        Ok(output) => Ok(output),
        Err(BuildFailure::Fatal(err)) => Err(err),
        Err(BuildFailure::ArenaExhausted(exhausted)) => {
            arena.rewind(mark);
            warn!(
                requested = exhausted.requested,
                available = exhausted.available,
                "island arena exhausted; rolled back, reporting no islands for this step"
            );
            Ok(IslandOutput::empty(model.nv, data.nefc))
        }
    }
}

fn build_islands_inner(model: &Model, data: &Data, arena: &mut Arena) -> Result<IslandOutput, BuildFailure> {
    let nedge_max = edge_budget(model, data);
    let (records, treenedge) = collect_edges(model, data, nedge_max)?;

    // Prefix-sum the per-tree edge counts into CSR row offsets.
    let mut rowadr = vec![0usize; model.ntree];
    let mut running = 0usize;
    for t in 0..model.ntree {
        rowadr[t] = running;
        running += treenedge[t] as usize;
    }
    let rownnz = treenedge.iter().map(|&n| n as usize).collect_vec();

    let mut colind = vec![0usize; records.len()];
    let mut fill_cursor = rowadr.clone();
    for &(a, b) in &records {
        let slot = &mut fill_cursor[a as usize];
        colind[*slot] = b as usize;
        *slot += 1;
    }

    let mut scratch = Vec::new();
    let mut tree_island = vec![-1i32; model.ntree];
    let nisland = flood_fill(model.ntree, &rownnz, &rowadr, &colind, &mut scratch, &mut tree_island);

    // Six persistent output arrays, reserved from the arena in one shot.
    let words = 2 * model.nv + 2 * nisland + 2 * data.nefc;
    arena
        .reserve(words)
        .map_err(BuildFailure::ArenaExhausted)?;

    let mut output = IslandOutput::empty(model.nv, data.nefc);
    output.nisland = nisland;
    output.island_dofadr = vec![-1i32; nisland];
    output.island_efcadr = vec![-1i32; nisland];

    let mut island_last_dof = vec![-1i32; nisland];
    let mut discovered_by_dof = 0usize;
    for dof in 0..model.nv {
        let tree = model.dof_treeid[dof];
        debug_assert!(tree >= 0, "dof {dof} resolves to the static tree; trees must partition the DoFs");
        let island = tree_island[tree as usize];
        if island < 0 {
            continue;
        }
        output.dof_island[dof] = island;
        let idx = island as usize;
        match island_last_dof[idx] {
            -1 => {
                output.island_dofadr[idx] = dof as i32;
                discovered_by_dof += 1;
            }
            prev => output.dof_islandnext[prev as usize] = dof as i32,
        }
        island_last_dof[idx] = dof as i32;
    }

    if discovered_by_dof != nisland {
        return Err(IslandError::IslandCountMismatch {
            found: nisland,
            assigned: discovered_by_dof,
        }
        .into());
    }

    let mut island_last_efc = vec![-1i32; nisland];
    let mut assigned_islands = vec![false; nisland];
    for row in 0..data.nefc {
        let mut cursor = 0usize;
        let first_tree = tree_next(model, &data.jacobian, row, STATIC_TREE, &mut cursor);
        if first_tree < 0 {
            return Err(IslandError::RowWithoutTree(row).into());
        }
        let island = tree_island[first_tree as usize];
        if island < 0 {
            continue;
        }
        output.efc_island[row] = island;
        let idx = island as usize;
        assigned_islands[idx] = true;
        match island_last_efc[idx] {
            -1 => output.island_efcadr[idx] = row as i32,
            prev => output.efc_islandnext[prev as usize] = row as i32,
        }
        island_last_efc[idx] = row as i32;
    }

    let assigned = assigned_islands.iter().filter(|&&a| a).count();
    if assigned != nisland {
        return Err(IslandError::IslandCountMismatch { found: nisland, assigned }.into());
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Contact, EfcType, Jacobian};
    use crate::model::EqualityKind;

    fn two_body_model() -> Model {
        Model {
            nv: 2,
            ntree: 2,
            ntendon: 0,
            tendon_num: vec![],
            tendon_limited: vec![],
            tendon_frictionloss: vec![],
            dof_treeid: vec![0, 1],
            body_treeid: vec![-1, 0, 1],
            geom_bodyid: vec![1, 2],
            jnt_dofadr: vec![0, 1],
            eq_type: vec![],
            eq_obj1id: vec![],
            eq_obj2id: vec![],
        }
    }

    #[test_log::test]
    fn no_constraints_yields_no_islands() {
        let model = two_body_model();
        let data = Data {
            nefc: 0,
            efc_type: &[],
            efc_id: &[],
            jacobian: Jacobian::Dense { j: &[], nv: 2 },
            ncon: 0,
            ne: 0,
            nf: 0,
            contact: &[],
        };
        let mut arena = Arena::with_capacity(64);

        let output = build_islands(&model, &data, &mut arena).unwrap();
        assert_eq!(output.nisland, 0);
        assert_eq!(output.dof_island, vec![-1, -1]);
        assert_eq!(arena.remaining(), 64);
    }

    #[test_log::test]
    fn one_contact_merges_both_trees_into_one_island() {
        let model = two_body_model();
        let data = Data {
            nefc: 1,
            efc_type: &[EfcType::Contact],
            efc_id: &[0],
            jacobian: Jacobian::Dense { j: &[1.0, 1.0], nv: 2 },
            ncon: 1,
            ne: 0,
            nf: 0,
            contact: &[Contact { geom1: 0, geom2: 1 }],
        };
        let mut arena = Arena::with_capacity(64);

        let output = build_islands(&model, &data, &mut arena).unwrap();
        assert_eq!(output.nisland, 1);
        assert_eq!(output.dof_island, vec![0, 0]);
        assert_eq!(output.efc_island, vec![0]);
        assert_eq!(output.island_dofadr, vec![0]);
        assert_eq!(output.dof_islandnext, vec![1, -1]);
        assert_eq!(output.island_efcadr, vec![0]);
    }

    #[test_log::test]
    fn independent_trees_form_independent_islands() {
        let mut model = two_body_model();
        model.ntree = 2;
        let data = Data {
            nefc: 2,
            efc_type: &[EfcType::JointFriction, EfcType::JointFriction],
            efc_id: &[0, 1],
            jacobian: Jacobian::Dense { j: &[1.0, 0.0, 0.0, 1.0], nv: 2 },
            ncon: 0,
            ne: 0,
            nf: 2,
            contact: &[],
        };
        let mut arena = Arena::with_capacity(64);

        let output = build_islands(&model, &data, &mut arena).unwrap();
        assert_eq!(output.nisland, 2);
        assert_eq!(output.dof_island, vec![0, 1]);
        assert_eq!(output.efc_island, vec![0, 1]);
    }

    #[test_log::test]
    fn equality_weld_fast_path_couples_two_trees() {
        let mut model = two_body_model();
        model.eq_type = vec![EqualityKind::Weld];
        model.eq_obj1id = vec![1];
        model.eq_obj2id = vec![2];
        let data = Data {
            nefc: 1,
            efc_type: &[EfcType::Equality],
            efc_id: &[0],
            jacobian: Jacobian::Dense { j: &[1.0, 1.0], nv: 2 },
            ncon: 0,
            ne: 1,
            nf: 0,
            contact: &[],
        };
        let mut arena = Arena::with_capacity(64);

        let output = build_islands(&model, &data, &mut arena).unwrap();
        assert_eq!(output.nisland, 1);
        assert_eq!(output.dof_island, vec![0, 0]);
    }

    #[test_log::test]
    fn arena_exhaustion_rolls_back_and_reports_no_islands() {
        let model = two_body_model();
        let data = Data {
            nefc: 1,
            efc_type: &[EfcType::Contact],
            efc_id: &[0],
            jacobian: Jacobian::Dense { j: &[1.0, 1.0], nv: 2 },
            ncon: 1,
            ne: 0,
            nf: 0,
            contact: &[Contact { geom1: 0, geom2: 1 }],
        };
        let mut arena = Arena::with_capacity(1);

        let output = build_islands(&model, &data, &mut arena).unwrap();
        assert_eq!(output.nisland, 0);
        assert_eq!(arena.remaining(), 1);
    }

    #[test_log::test]
    fn static_tree_absorption_leaves_single_body_its_own_island() {
        let mut model = two_body_model();
        model.ntree = 1;
        model.nv = 1;
        model.dof_treeid = vec![0];
        model.body_treeid = vec![-1, 0];
        model.geom_bodyid = vec![1, 0];
        let data = Data {
            nefc: 1,
            efc_type: &[EfcType::Contact],
            efc_id: &[0],
            jacobian: Jacobian::Dense { j: &[1.0], nv: 1 },
            ncon: 1,
            ne: 0,
            nf: 0,
            contact: &[Contact { geom1: 0, geom2: 1 }],
        };
        let mut arena = Arena::with_capacity(64);

        let output = build_islands(&model, &data, &mut arena).unwrap();
        assert_eq!(output.nisland, 1);
        assert_eq!(output.dof_island, vec![0]);
    }
}
