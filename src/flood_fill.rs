//! Generic connected-components over a symmetric sparse adjacency graph in
//! CSR form. Used to partition kinematic trees here, but the algorithm
//! itself knows nothing about trees, DoFs or constraints.

/// Partition a graph of `n` vertices whose adjacency is given as CSR
/// (`rownnz`, `rowadr`, `colind`) into connected components.
///
/// Writes `island[0..n)`: component id in `[0, k)` for vertices with at
/// least one edge, `-1` for isolated vertices (`rownnz[v] == 0`). Returns
/// `k`, the number of components found. `scratch` is reused as the
/// depth-first flood stack; duplicate column indices and self-loops in
/// `colind` are tolerated without affecting the result.
pub fn flood_fill(
    n: usize,
    rownnz: &[usize],
    rowadr: &[usize],
    colind: &[usize],
    scratch: &mut Vec<usize>,
    island: &mut [i32],
) -> usize {
    debug_assert_eq!(island.len(), n);
    island.fill(-1);
    scratch.clear();

    let mut component = 0i32;
    for v in 0..n {
        if rownnz[v] == 0 || island[v] != -1 {
            continue;
        }
        scratch.push(v);
        while let Some(u) = scratch.pop() {
            if island[u] != -1 {
                continue;
            }
            island[u] = component;
            let start = rowadr[u];
            let nnz = rownnz[u];
            scratch.extend_from_slice(&colind[start..start + nnz]);
        }
        component += 1;
    }
    component as usize
}
