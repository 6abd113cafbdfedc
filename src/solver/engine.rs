use std::collections::HashMap;

use super::bit_set::BitSet;
use super::index::PruneIndex;

/// How the antagonist aggregates the costs of its candidate answers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Objective {
    /// Minimize the maximum number of guesses the adversary can force.
    WorstCase,
    /// Minimize the sum over feedback classes of class size times subtree
    /// cost, a path-sum proxy for the expected guess count under a uniform
    /// answer distribution.
    MeanWeighted,
}

/// A solved state: the best guess and the cost the adversary can force
/// against it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Recommendation {
    pub guess: usize,
    pub cost: u32,
}

/// Memoized adversarial search over remaining-candidate states.
///
/// States are prune masks; a clear bit marks a word that is still a
/// possible answer. The player minimizes over guesses drawn from the live
/// set, the antagonist maximizes (or sums) over the feedback classes those
/// guesses split the live set into.
pub struct Engine {
    objective: Objective,
    memo: HashMap<BitSet, (u32, usize)>,
}

const UNBOUNDED: u32 = u32::MAX;

impl Engine {
    pub fn new(objective: Objective) -> Engine {
        Engine {
            objective,
            memo: HashMap::new(),
        }
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Number of memoized states. Grows monotonically across solves; the
    /// memo stays valid for every state drawn from the same index.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Best guess for the given state. At least one word must be live.
    pub fn solve(&mut self, index: &PruneIndex, pruned: &BitSet) -> Recommendation {
        assert_eq!(pruned.len(), index.size(), "state does not match index");
        assert!(pruned.count_zeros() > 0, "no live candidates to solve for");

        let (cost, guess) = self.player(index, pruned, UNBOUNDED);
        log::debug!(
            "solved state with {} live candidates: cost {}, memo {} entries",
            pruned.count_zeros(),
            cost,
            self.memo.len()
        );
        Recommendation { guess, cost }
    }

    /// Minimizing half of the search: pick the live guess whose adversarial
    /// cost is smallest. Ties keep the first guess in index order.
    fn player(&mut self, index: &PruneIndex, pruned: &BitSet, bound: u32) -> (u32, usize) {
        if pruned.count_zeros() == 1 {
            let only = pruned.zeros().next().expect("one live candidate");
            return (1, only);
        }

        if let Some(&hit) = self.memo.get(pruned) {
            return hit;
        }

        let entry_bound = bound;
        let mut bound = bound;
        let mut best: Option<(u32, usize)> = None;

        for g in pruned.zeros() {
            let (cost, _) = self.antagonist(index, pruned, g, bound);
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, g));
                bound = bound.min(cost);
            }
        }

        let best = best.expect("player requires a live candidate");

        // A result above the entry bound may come from aborted antagonist
        // loops; it is only a lower bound then and must not be memoized.
        if best.0 <= entry_bound {
            self.memo.insert(pruned.clone(), best);
        }
        best
    }

    /// Maximizing half: for a fixed guess, find the answer (equivalently,
    /// the feedback class) that costs the player the most.
    fn antagonist(
        &mut self,
        index: &PruneIndex,
        pruned: &BitSet,
        g: usize,
        bound: u32,
    ) -> (u32, usize) {
        let size = index.size();

        // Answers sharing a feedback with one already explored land in the
        // same subtree; marking the survivors collapses the loop from the
        // live count to the number of distinct feedback classes.
        let mut computed = pruned.clone();
        let mut worst: Option<(u32, usize)> = None;
        let mut path_sum: u32 = 0;

        for s in 0..size {
            if computed.get(s) {
                continue;
            }

            if s == g {
                computed.set(s);
                if worst.map_or(true, |(w, _)| 1 > w) {
                    worst = Some((1, s));
                }
                path_sum += 1;
                continue;
            }

            let mask = index.prune_pair(g, s);
            computed.union_not(mask);

            let mut next = pruned.clone();
            next.union_with(mask);

            let child_bound = match self.objective {
                Objective::WorstCase => bound.saturating_sub(1),
                Objective::MeanWeighted => UNBOUNDED,
            };
            let (child_cost, _) = self.player(index, &next, child_bound);
            let cost = child_cost + 1;

            if worst.map_or(true, |(w, _)| cost > w) {
                worst = Some((cost, s));
            }

            match self.objective {
                Objective::WorstCase => {
                    // The caller can no longer pick this guess; the partial
                    // max already exceeds its bound.
                    if cost > bound {
                        break;
                    }
                }
                Objective::MeanWeighted => {
                    path_sum += next.count_zeros() as u32 * cost;
                }
            }
        }

        let (max_cost, worst_s) = worst.expect("antagonist requires a live candidate");
        match self.objective {
            Objective::WorstCase => (max_cost, worst_s),
            Objective::MeanWeighted => (path_sum, worst_s),
        }
    }
}
