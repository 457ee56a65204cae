//! Iterative label overlap relaxation
//!
//! Level labels are pinned to their bars; only delta labels move, and only vertically.

use super::defaults::{MAX_PASSES, NUDGE_EPSILON};
use super::primitives::Label;
use crate::log::{debug, warn};
use crate::validate::clean_float;

/// Outcome of [`relax_labels`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relaxation {
    /// Passes run, including the final clean one.
    pub passes: usize,
    /// `false` when the pass cap was reached with overlaps left.
    pub converged: bool,
}

/// Overlap depth of two boxes at heights `a` and `b`, plus one box height.
pub fn find_delta(a: f64, b: f64, h: f64) -> f64 {
    a.min(b).abs() + h - a.max(b).abs()
}

/// Nudge apart two probed labels that overlap.
pub fn fix_overlap(labels: &mut [Label], i: usize, j: usize) {
    let (a, b) = (&labels[i], &labels[j]);
    let height = |l: &Label| l.bbox.map(|r| r.height()).unwrap_or(0.0);
    let delta = find_delta(a.anchor.y, b.anchor.y, height(a).max(height(b))) + NUDGE_EPSILON;
    let i_above = a.anchor.y > b.anchor.y;

    // positive moves i up and j down
    let (shift_i, shift_j) = match (a.is_delta(), b.is_delta()) {
        (true, true) => {
            let half = delta / 2.0;
            let i_up = match (clean_float(&a.text), clean_float(&b.text)) {
                (Some(vi), Some(vj)) if vi != vj => {
                    if vi > 0.0 && vj < 0.0 {
                        true
                    } else if vi < 0.0 && vj > 0.0 {
                        false
                    } else {
                        vi.abs() > vj.abs()
                    }
                }
                _ => i_above,
            };
            if i_up { (half, -half) } else { (-half, half) }
        }
        (true, false) => (if i_above { delta } else { -delta }, 0.0),
        (false, true) => (0.0, if i_above { -delta } else { delta }),
        (false, false) => (0.0, 0.0),
    };

    labels[i].anchor.y += shift_i;
    labels[j].anchor.y += shift_j;
}

/// Run overlap passes until one is clean or [`MAX_PASSES`] is reached.
pub fn relax_labels(labels: &mut [Label]) -> Relaxation {
    for pass in 1..=MAX_PASSES {
        let mut dirty = false;
        for i in 0..labels.len() {
            for j in 0..i {
                if labels[i].footprint().overlaps(&labels[j].footprint()) {
                    fix_overlap(labels, i, j);
                    dirty = true;
                }
            }
        }
        if !dirty {
            debug!(passes = pass, "labels relaxed");
            return Relaxation {
                passes: pass,
                converged: true,
            };
        }
    }

    warn!(passes = MAX_PASSES, "label overlaps remain after pass limit");
    Relaxation {
        passes: MAX_PASSES,
        converged: false,
    }
}
