//! Interval algebra over safe arcs
//!
//! A safe-arc set is a list of disjoint arcs within one turn. Subtracting a
//! shadow splits anything that crosses 360°, trims each arc against the
//! shadow, and merges neighbours that touch again.

use super::arc::Arc;
use crate::consts::{SLIVER_DEGREES, WRAP_MERGE_DEGREES};

/// How a shadow overlaps an arc
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcIntersection {
    /// Shadow lies within the arc
    Inside,
    /// Shadow covers the whole arc
    Full,
    /// Shadow covers the arc's start
    Left,
    /// Shadow covers the arc's end
    Right,
    /// No overlap
    None,
}

/// Classify `shadow` against `arc` (neither may cross 360°)
pub fn classify(arc: &Arc, shadow: &Arc) -> ArcIntersection {
    if shadow.end() <= arc.start || arc.end() <= shadow.start {
        ArcIntersection::None
    } else if shadow.start >= arc.start && shadow.end() <= arc.end() {
        ArcIntersection::Inside
    } else if shadow.start < arc.start && shadow.end() > arc.end() {
        ArcIntersection::Full
    } else if shadow.start < arc.start {
        ArcIntersection::Left
    } else {
        ArcIntersection::Right
    }
}

/// Remove `shadow` from a set of safe arcs, returning the new set sorted by start
pub fn subtract(arcs: &[Arc], shadow: Arc) -> Vec<Arc> {
    if shadow.crosses_wrap() {
        return shadow
            .split_at_wrap()
            .into_iter()
            .fold(arcs.to_vec(), |acc, half| subtract(&acc, half));
    }

    let trimmed = arcs
        .iter()
        .flat_map(|arc| split_if_wrapping(*arc))
        .flat_map(|arc| trim(arc, &shadow))
        .collect();
    merge(trimmed)
}

fn split_if_wrapping(arc: Arc) -> Vec<Arc> {
    if arc.crosses_wrap() {
        arc.split_at_wrap().to_vec()
    } else {
        vec![arc]
    }
}

/// What is left of `arc` once `shadow` is taken out
fn trim(arc: Arc, shadow: &Arc) -> Vec<Arc> {
    if arc.span < SLIVER_DEGREES {
        return Vec::new();
    }
    let pieces = match classify(&arc, shadow) {
        ArcIntersection::None => return vec![arc],
        ArcIntersection::Full => return Vec::new(),
        ArcIntersection::Inside => vec![
            (arc.start, shadow.start - arc.start),
            (shadow.end(), arc.end() - shadow.end()),
        ],
        ArcIntersection::Left => vec![(shadow.end(), arc.end() - shadow.end())],
        ArcIntersection::Right => vec![(arc.start, shadow.start - arc.start)],
    };
    // Gaps narrower than the sliver tolerance (including any float-noise
    // negatives) are dropped rather than inverted into a misplaced arc
    pieces
        .into_iter()
        .filter(|&(_, span)| span >= SLIVER_DEGREES)
        .map(|(start, span)| Arc::new(start, span))
        .collect()
}

/// Whether `second` starts where `first` ends, within tolerance or across the wrap
fn touches(first: &Arc, second: &Arc) -> Option<f32> {
    let gap = second.start - first.end();
    if (0.0..SLIVER_DEGREES).contains(&gap) {
        return Some(gap);
    }
    let wrapped_gap = second.start + 360.0 - first.end();
    if first.end() > WRAP_MERGE_DEGREES && second.start < SLIVER_DEGREES {
        return Some(wrapped_gap.max(0.0));
    }
    if (0.0..SLIVER_DEGREES).contains(&wrapped_gap) {
        return Some(wrapped_gap);
    }
    None
}

/// Join touching arcs until nothing else merges; output is sorted by start
pub fn merge(mut arcs: Vec<Arc>) -> Vec<Arc> {
    sort_by_start(&mut arcs);
    'scan: loop {
        for i in 0..arcs.len() {
            for j in 0..arcs.len() {
                if i == j {
                    continue;
                }
                if let Some(gap) = touches(&arcs[i], &arcs[j]) {
                    let joined = Arc::new(arcs[i].start, arcs[i].span + gap + arcs[j].span);
                    let (hi, lo) = if i > j { (i, j) } else { (j, i) };
                    arcs.swap_remove(hi);
                    arcs.swap_remove(lo);
                    arcs.push(joined);
                    sort_by_start(&mut arcs);
                    continue 'scan;
                }
            }
        }
        return arcs;
    }
}

fn sort_by_start(arcs: &mut [Arc]) {
    arcs.sort_by(|a, b| a.start.total_cmp(&b.start));
}
