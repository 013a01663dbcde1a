//! Walk the active constraint rows and emit tree-tree edges, using a fast
//! path per constraint kind where one exists and the generic Jacobian scan
//! otherwise.

use crate::data::{Data, EfcType};
use crate::error::IslandError;
use crate::jacobian::tree_next;
use crate::model::{EqualityKind, Model, STATIC_TREE};

/// Fold the static-tree sentinel onto the other endpoint, or fail if both
/// endpoints are static — that can only happen on malformed input.
fn fold_static(row: usize, t1: i32, t2: i32) -> Result<(i32, i32), IslandError> {
    match (t1, t2) {
        (STATIC_TREE, STATIC_TREE) => Err(IslandError::BothEndpointsStatic { row }),
        (STATIC_TREE, other) | (other, STATIC_TREE) => Ok((other, other)),
        (a, b) => Ok((a, b)),
    }
}

/// Push one edge (or, for a non-self edge, its symmetric pair) into
/// `records`, deduplicating against the immediately preceding record and
/// bumping the per-tree counts that will become CSR row lengths.
fn add_edge(
    records: &mut Vec<(i32, i32)>,
    treenedge: &mut [i32],
    nedge_max: usize,
    row: usize,
    t1: i32,
    t2: i32,
) -> Result<(), IslandError> {
    let (a, b) = fold_static(row, t1, t2)?;

    if a == b {
        if records.last() != Some(&(a, a)) {
            records.push((a, a));
            treenedge[a as usize] += 1;
        }
    } else {
        let prev = records.last().copied();
        if prev != Some((a, b)) && prev != Some((b, a)) {
            records.push((a, b));
            records.push((b, a));
            treenedge[a as usize] += 1;
            treenedge[b as usize] += 1;
        }
    }

    if records.len() > nedge_max {
        return Err(IslandError::EdgeBufferOverflow { row, budget: nedge_max });
    }
    Ok(())
}

/// Scan the Jacobian row for the chain of trees it touches and emit the
/// spanning chain of pairwise edges — the fallback for any constraint kind
/// without a dedicated fast path.
fn collect_generic(
    model: &Model,
    data: &Data,
    row: usize,
    records: &mut Vec<(i32, i32)>,
    treenedge: &mut [i32],
    nedge_max: usize,
) -> Result<(), IslandError> {
    let mut cursor = 0usize;
    let t1 = tree_next(model, &data.jacobian, row, STATIC_TREE, &mut cursor);
    if t1 < 0 {
        return Err(IslandError::RowWithoutTree(row));
    }

    let t2 = tree_next(model, &data.jacobian, row, t1, &mut cursor);
    if t2 < 0 {
        return add_edge(records, treenedge, nedge_max, row, t1, t1);
    }

    add_edge(records, treenedge, nedge_max, row, t1, t2)?;
    let mut prev = t2;
    loop {
        let next = tree_next(model, &data.jacobian, row, prev, &mut cursor);
        if next < 0 || next == prev {
            break;
        }
        add_edge(records, treenedge, nedge_max, row, prev, next)?;
        prev = next;
    }
    Ok(())
}

/// Walk `data`'s active rows in order, deduplicating consecutive rows that
/// share `(efc_type, efc_id)`, and emit tree-tree edges via the fast paths
/// of the constraint-kind table above, or the generic fallback.
///
/// Returns the emitted `(src, dst)` records (symmetric: a non-self edge is
/// always followed by its flip) and the per-tree edge counts.
pub fn collect_edges(model: &Model, data: &Data, nedge_max: usize) -> Result<(Vec<(i32, i32)>, Vec<i32>), IslandError> {
    let mut records = Vec::with_capacity(nedge_max);
    let mut treenedge = vec![0i32; model.ntree];

    for row in 0..data.nefc {
        if row > 0 && data.efc_type[row] == data.efc_type[row - 1] && data.efc_id[row] == data.efc_id[row - 1] {
            continue;
        }

        let efc_id = data.efc_id[row];
        match data.efc_type[row] {
            EfcType::JointFriction => {
                let t = model.dof_treeid[efc_id];
                add_edge(&mut records, &mut treenedge, nedge_max, row, t, t)?;
            }
            EfcType::JointLimit => {
                let dof = model.jnt_dofadr[efc_id] as usize;
                let t = model.dof_treeid[dof];
                add_edge(&mut records, &mut treenedge, nedge_max, row, t, t)?;
            }
            EfcType::Contact => {
                let contact = &data.contact[efc_id];
                let t1 = model.body_treeid[model.geom_bodyid[contact.geom1] as usize];
                let t2 = model.body_treeid[model.geom_bodyid[contact.geom2] as usize];
                add_edge(&mut records, &mut treenedge, nedge_max, row, t1, t2)?;
            }
            EfcType::Equality if matches!(model.eq_type[efc_id], EqualityKind::Connect | EqualityKind::Weld) => {
                let t1 = model.body_treeid[model.eq_obj1id[efc_id] as usize];
                let t2 = model.body_treeid[model.eq_obj2id[efc_id] as usize];
                add_edge(&mut records, &mut treenedge, nedge_max, row, t1, t2)?;
            }
            EfcType::Equality | EfcType::Other => {
                collect_generic(model, data, row, &mut records, &mut treenedge, nedge_max)?;
            }
        }
    }

    Ok((records, treenedge))
}
