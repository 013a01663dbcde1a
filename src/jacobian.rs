//! Scan a single Jacobian row for the trees it touches, dense or sparse.

use crate::data::Jacobian;
use crate::model::Model;

/// Return the next tree incident on `row`'s Jacobian, different from `tree`,
/// starting the scan at `*cursor` and leaving `*cursor` just past it so the
/// scan can resume. Returns `-1` once no further distinct tree is found.
///
/// `tree == -1` (the static-tree sentinel) is a legal filter: it makes this
/// return the first tree incident on the row at all.
pub fn tree_next(model: &Model, jacobian: &Jacobian, row: usize, tree: i32, cursor: &mut usize) -> i32 {
    match *jacobian {
        Jacobian::Sparse { rownnz, rowadr, colind } => {
            let start = rowadr[row];
            let nnz = rownnz[row];
            while *cursor < nnz {
                let col = colind[start + *cursor] as usize;
                *cursor += 1;
                let t = model.dof_treeid[col];
                if t != tree {
                    return t;
                }
            }
            -1
        }
        Jacobian::Dense { j, nv } => {
            while *cursor < nv {
                let col = *cursor;
                *cursor += 1;
                if j[row * nv + col] != 0.0 {
                    let t = model.dof_treeid[col];
                    if t != tree {
                        return t;
                    }
                }
            }
            -1
        }
    }
}
