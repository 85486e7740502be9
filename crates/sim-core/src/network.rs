//! Small-World Network Generator
//!
//! Watts-Strogatz graph over firm indices: a ring lattice where every node
//! connects to its `k` nearest neighbors (k/2 per side), with each lattice
//! edge independently rewired with probability `p` to a uniformly random
//! non-adjacent target. The graph models inter-firm imitation and never
//! changes after generation within a replication.

use rand::rngs::SmallRng;
use rand::Rng;
use std::collections::HashSet;

/// Default lattice degree (3 neighbors per side).
pub const DEFAULT_K: usize = 6;
/// Default rewiring probability.
pub const DEFAULT_P: f64 = 0.1;
/// Attempts to find a valid rewiring target before keeping the lattice edge.
const REWIRE_ATTEMPTS: usize = 16;

/// Generate a symmetric Watts-Strogatz adjacency over `n` nodes.
///
/// Returns, for each node, its neighbor indices in ascending order (the
/// fixed materialization order the firms store at creation).
pub fn watts_strogatz(n: usize, k: usize, p: f64, rng: &mut SmallRng) -> Vec<Vec<usize>> {
    let mut adjacency: Vec<HashSet<usize>> = vec![HashSet::new(); n];
    if n < 2 {
        return adjacency.into_iter().map(|_| Vec::new()).collect();
    }
    let half_k = (k / 2).min(n.saturating_sub(1) / 2).max(1);

    // Ring lattice
    for i in 0..n {
        for j in 1..=half_k {
            let t = (i + j) % n;
            adjacency[i].insert(t);
            adjacency[t].insert(i);
        }
    }

    // Rewire each original lattice edge (i, i+j) with probability p
    for i in 0..n {
        for j in 1..=half_k {
            let old = (i + j) % n;
            if rng.gen::<f64>() >= p {
                continue;
            }
            let mut rewired = None;
            for _ in 0..REWIRE_ATTEMPTS {
                let candidate = rng.gen_range(0..n);
                if candidate != i && candidate != old && !adjacency[i].contains(&candidate) {
                    rewired = Some(candidate);
                    break;
                }
            }
            // No valid target within the attempt budget: keep the lattice edge
            let Some(new) = rewired else { continue };
            adjacency[i].remove(&old);
            adjacency[old].remove(&i);
            adjacency[i].insert(new);
            adjacency[new].insert(i);
        }
    }

    adjacency
        .into_iter()
        .map(|set| {
            let mut v: Vec<usize> = set.into_iter().collect();
            v.sort_unstable();
            v
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_symmetric_no_self_loops() {
        let mut rng = SmallRng::seed_from_u64(7);
        let adj = watts_strogatz(500, DEFAULT_K, DEFAULT_P, &mut rng);
        for (i, neighbors) in adj.iter().enumerate() {
            assert!(!neighbors.contains(&i), "node {i} has a self-loop");
            for &n in neighbors {
                assert!(adj[n].contains(&i), "edge {i}-{n} is not symmetric");
            }
        }
    }

    #[test]
    fn test_deterministic_per_seed() {
        let mut rng1 = SmallRng::seed_from_u64(42);
        let mut rng2 = SmallRng::seed_from_u64(42);
        let a = watts_strogatz(200, DEFAULT_K, DEFAULT_P, &mut rng1);
        let b = watts_strogatz(200, DEFAULT_K, DEFAULT_P, &mut rng2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_rewiring_is_pure_lattice() {
        let mut rng = SmallRng::seed_from_u64(1);
        let adj = watts_strogatz(10, 4, 0.0, &mut rng);
        for (i, neighbors) in adj.iter().enumerate() {
            assert_eq!(neighbors.len(), 4, "node {i} should keep lattice degree");
        }
    }

    #[test]
    fn test_tiny_graphs() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(watts_strogatz(0, DEFAULT_K, DEFAULT_P, &mut rng).is_empty());
        let one = watts_strogatz(1, DEFAULT_K, DEFAULT_P, &mut rng);
        assert!(one[0].is_empty());
    }
}
