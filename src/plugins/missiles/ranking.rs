//! Target ranking: which blocks are closest to a point, measured to their surface.
//!
//! Distances are compared squared. Targets without a usable shape are unreachable and
//! never ranked.

use bevy::prelude::*;

/// Read access to the set of targets the missiles may pick from.
///
/// Iteration order is the tie-breaker for equal distances.
pub trait TargetCatalog {
    fn targets(&self) -> impl Iterator<Item = Entity> + '_;

    /// Cleared targets are skipped. Unknown targets read as cleared.
    fn is_cleared(&self, target: Entity) -> bool;

    /// Closest point on the target's shape boundary, or `None` without a usable shape.
    fn closest_point(&self, target: Entity, from: Vec2) -> Option<Vec2>;

    /// Reference position of the target, used when its shape is unusable.
    fn anchor(&self, target: Entity) -> Option<Vec2>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankedCandidate {
    pub target: Entity,
    pub sqr_dist: f32,
}

/// Squared distance from `origin` to the target's surface; `f32::INFINITY` when unreachable.
pub fn sqr_distance_to_target<C: TargetCatalog>(origin: Vec2, catalog: &C, target: Entity) -> f32 {
    catalog
        .closest_point(target, origin)
        .map_or(f32::INFINITY, |p| origin.distance_squared(p))
}

/// Every reachable un-cleared target, as catalog-ordered candidates.
fn candidates<C: TargetCatalog>(origin: Vec2, catalog: &C) -> impl Iterator<Item = RankedCandidate> + '_ {
    catalog
        .targets()
        .filter(move |&t| !catalog.is_cleared(t))
        .map(move |t| RankedCandidate {
            target: t,
            sqr_dist: sqr_distance_to_target(origin, catalog, t),
        })
        .filter(|c| c.sqr_dist.is_finite())
}

/// All reachable un-cleared targets, nearest first.
pub fn rank<C: TargetCatalog>(origin: Vec2, catalog: &C) -> Vec<RankedCandidate> {
    let mut out: Vec<_> = candidates(origin, catalog).collect();
    // Stable: equal distances keep catalog order.
    out.sort_by(|a, b| a.sqr_dist.total_cmp(&b.sqr_dist));
    out
}

/// The `k` nearest reachable un-cleared targets, nearest first.
///
/// Same result as `rank(..)` truncated to `k`, without sorting the whole set.
/// The buffer stays sorted; its worst entry sits at the end.
pub fn rank_top_k<C: TargetCatalog>(origin: Vec2, catalog: &C, k: usize) -> Vec<RankedCandidate> {
    let mut best: Vec<RankedCandidate> = Vec::with_capacity(k);
    if k == 0 {
        return best;
    }

    for c in candidates(origin, catalog) {
        if best.len() < k {
            best.push(c);
        } else if c.sqr_dist < best[k - 1].sqr_dist {
            best[k - 1] = c;
        } else {
            continue;
        }

        // Bubble the newcomer toward the front. Strict `<` keeps earlier ties ahead.
        let mut j = best.len() - 1;
        while j > 0 && best[j].sqr_dist < best[j - 1].sqr_dist {
            best.swap(j, j - 1);
            j -= 1;
        }
    }

    best
}

/// The single nearest reachable un-cleared target.
pub fn nearest<C: TargetCatalog>(origin: Vec2, catalog: &C) -> Option<RankedCandidate> {
    rank_top_k(origin, catalog, 1).pop()
}
