use petal_graph::{Distance, Meters};

/// Positions of the `survivor_count` lengths closest to `target`, closest
/// first. Equal deviations keep their original order.
pub fn select_by_length(
    lengths: &[Distance<Meters>],
    target: Distance<Meters>,
    survivor_count: usize,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..lengths.len()).collect();
    indices.sort_by_key(|&i| lengths[i].abs_diff(target));
    indices.truncate(survivor_count);
    indices
}
