use log::{debug, trace};
use rayon::prelude::*;
use crate::interactions::{epa_collision_info, gjk_intersection, EpaResult, EpaStatus};
use crate::models::Collider;
use crate::utils::{vector_sub, EpaConfig, GJK_MAX_ITERATIONS};

/// Penetration between one pair of colliders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenetrationContact {
    pub status: EpaStatus,
    pub result: EpaResult,
}

/// Runs GJK followed by EPA on a single pair.
///
/// Returns `None` when the colliders do not overlap.
pub fn collide(a: &Collider, b: &Collider, config: &EpaConfig) -> Option<PenetrationContact> {
    let initial_direction = vector_sub(a.position, b.position);
    let simplex = gjk_intersection(a, b, initial_direction, GJK_MAX_ITERATIONS)?;

    let (status, result) = epa_collision_info(&simplex, a, b, config);
    trace!(
        "{} vs {}: {} with depth {}",
        a.shape.name(), b.shape.name(), status, result.penetration_depth
    );

    Some(PenetrationContact { status, result })
}

/// Tests every pair in parallel. Output slot `i` belongs to `pairs[i]`.
///
/// Pairs naming an index outside `colliders` yield `None`.
pub fn collide_pairs(
    colliders: &[Collider],
    pairs: &[(usize, usize)],
    config: &EpaConfig
) -> Vec<Option<PenetrationContact>> {
    debug!("Narrow phase over {} pairs on {} threads", pairs.len(), rayon::current_num_threads());

    pairs.par_iter()
        .map(|&(i, j)| match (colliders.get(i), colliders.get(j)) {
            (Some(a), Some(b)) => collide(a, b, config),
            _ => None,
        })
        .collect()
}
