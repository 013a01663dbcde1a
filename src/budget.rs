//! Upper bound on the number of edge records [`crate::edges::collect_edges`]
//! can emit, used to size scratch buffers before the scan.

use crate::data::Data;
use crate::model::Model;

/// `2*ncon + 2*ne + nf + Σ tendon frictionloss DoFs + Σ tendon limit DoFs`.
///
/// Sufficient because contacts and equalities contribute at most two records
/// each (a pair plus its flip), joint friction contributes one self-record,
/// and each tendon constraint contributes at most one record per DoF it spans.
pub fn edge_budget(model: &Model, data: &Data) -> usize {
    let tendon_records: usize = (0..model.ntendon)
        .map(|t| {
            let mut n = 0;
            if model.tendon_frictionloss[t] {
                n += model.tendon_num[t];
            }
            if model.tendon_limited[t] {
                n += model.tendon_num[t];
            }
            n
        })
        .sum();

    2 * data.ncon + 2 * data.ne + data.nf + tendon_records
}
