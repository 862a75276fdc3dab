//! One-shot reveal-on-scroll
//!
//! Elements are registered once and fire the first time the observer sees
//! them intersect. A fired element leaves the registry for good; scrolling it
//! out and back in does nothing.

use std::collections::HashSet;
use std::hash::Hash;

use crate::config::AnimationConfig;

/// Observer report for one watched element
#[derive(Clone, Debug, PartialEq)]
pub struct Intersection<K> {
    pub key: K,
    pub is_intersecting: bool,
}

/// What to do with an element that just came into view
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealAction<K> {
    /// Reduced motion: jump straight to the visible state
    ShowImmediately(K),
    /// Apply [`RevealStyle::hidden`] now and [`RevealStyle::visible`] on the next frame
    AnimateIn(K),
}

impl<K> RevealAction<K> {
    pub fn key(&self) -> &K {
        match self {
            RevealAction::ShowImmediately(k) | RevealAction::AnimateIn(k) => k,
        }
    }
}

/// Inline style values written to a revealed element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealStyle {
    pub opacity: String,
    pub transform: String,
    pub transition: String,
}

impl RevealStyle {
    /// Starting state registered before the transition begins
    pub fn hidden(animation: &AnimationConfig) -> Self {
        Self {
            opacity: "0".to_string(),
            transform: format!("translateY({}px)", animation.offset_px),
            transition: "none".to_string(),
        }
    }

    /// Final state, transitioned from [`RevealStyle::hidden`]
    pub fn visible(animation: &AnimationConfig) -> Self {
        let d = animation.duration_ms;
        let e = &animation.easing;
        Self {
            opacity: "1".to_string(),
            transform: "translateY(0)".to_string(),
            transition: format!("opacity {d}ms {e}, transform {d}ms {e}"),
        }
    }

    /// Final state with no transition
    pub fn immediate() -> Self {
        Self {
            opacity: "1".to_string(),
            transform: "none".to_string(),
            transition: "none".to_string(),
        }
    }
}

/// Elements still waiting for their reveal
pub struct RevealRegistry<K> {
    pending: HashSet<K>,
    revealed: HashSet<K>,
    reduced_motion: bool,
}

impl<K: Clone + Eq + Hash> RevealRegistry<K> {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            pending: HashSet::new(),
            revealed: HashSet::new(),
            reduced_motion,
        }
    }

    /// Register an element; returns false if it is already pending or has fired
    pub fn watch(&mut self, key: K) -> bool {
        if self.revealed.contains(&key) {
            return false;
        }
        self.pending.insert(key)
    }

    /// Consume an observer batch
    ///
    /// Each returned key must be unobserved by the caller; the registry has
    /// already dropped it.
    pub fn on_intersection(&mut self, entries: &[Intersection<K>]) -> Vec<RevealAction<K>> {
        let mut actions = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if !self.pending.remove(&entry.key) {
                continue;
            }
            self.revealed.insert(entry.key.clone());
            let key = entry.key.clone();
            actions.push(if self.reduced_motion {
                RevealAction::ShowImmediately(key)
            } else {
                RevealAction::AnimateIn(key)
            });
        }
        actions
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains(key)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed.len()
    }

    /// Every watched element has fired
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    /// Forget pending elements (teardown)
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
