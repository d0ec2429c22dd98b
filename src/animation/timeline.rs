use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use super::{AnimationDriver, Layer, Target, Transaction, Transition, Value};
use crate::button::Step;

#[derive(Debug)]
struct Running {
    transaction: u64,
    transition: Transition,
    elapsed: f64,
}

impl Running {
    fn fraction(&self) -> f32 {
        let duration = self.transition.duration;
        if duration <= 0.0 {
            return if self.transition.repeat { 0.0 } else { 1.0 };
        }
        let raw = self.elapsed / duration;
        if self.transition.repeat {
            raw.fract() as f32
        } else {
            raw.min(1.0) as f32
        }
    }

    fn is_finished(&self) -> bool {
        !self.transition.repeat && self.elapsed >= self.transition.duration
    }

    fn value(&self) -> Value {
        let eased = self.transition.easing.apply(self.fraction());
        self.transition.from.lerp(self.transition.to, eased)
    }
}

#[derive(Debug)]
struct Pending {
    remaining: usize,
    finish: Option<Step>,
}

/// Deterministic [`AnimationDriver`] advanced by the host's frame clock.
#[derive(Debug, Default)]
pub struct Timeline {
    models: HashMap<Target, Value>,
    running: Vec<Running>,
    transactions: BTreeMap<u64, Pending>,
    finished: Vec<Step>,
    next_transaction: u64,
    clock: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds advanced since creation.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Number of transitions currently armed, repeating ones included.
    pub fn running_len(&self) -> usize {
        self.running.len()
    }

    /// Whether a transition is armed for `target`.
    pub fn is_animating(&self, target: Target) -> bool {
        self.running.iter().any(|run| run.transition.target == target)
    }

    fn remove_where(&mut self, predicate: impl Fn(&Running) -> bool) {
        let mut dropped = Vec::new();
        self.running.retain(|run| {
            if predicate(run) {
                dropped.push(run.transaction);
                false
            } else {
                true
            }
        });
        for id in dropped {
            if let Some(pending) = self.transactions.remove(&id) {
                trace!(transaction = id, finish = ?pending.finish, "Transaction superseded");
            }
        }
    }
}

impl AnimationDriver for Timeline {
    fn set_model(&mut self, target: Target, value: Value) {
        self.models.insert(target, value);
    }

    fn model(&self, target: Target) -> Value {
        self.models
            .get(&target)
            .copied()
            .unwrap_or(Value::Scalar(0.0))
    }

    fn presented(&self, target: Target) -> Value {
        self.running
            .iter()
            .rev()
            .find(|run| run.transition.target == target)
            .map(Running::value)
            .unwrap_or_else(|| self.model(target))
    }

    fn clear(&mut self, layer: Layer) {
        self.remove_where(|run| run.transition.target.layer == layer);
    }

    fn commit(&mut self, transaction: Transaction) {
        let id = self.next_transaction;
        self.next_transaction += 1;
        let (transitions, finish) = transaction.into_parts();
        if transitions.is_empty() {
            if let Some(step) = finish {
                self.finished.push(step);
            }
            return;
        }
        for transition in &transitions {
            let target = transition.target;
            self.remove_where(|run| run.transition.target == target);
        }
        self.transactions.insert(
            id,
            Pending {
                remaining: transitions.len(),
                finish,
            },
        );
        self.running
            .extend(transitions.into_iter().map(|transition| Running {
                transaction: id,
                transition,
                elapsed: 0.0,
            }));
    }

    fn advance(&mut self, dt: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clock += dt;
        for run in &mut self.running {
            run.elapsed += dt;
        }
        let mut completed = Vec::new();
        self.running.retain(|run| {
            if run.is_finished() {
                completed.push(run.transaction);
                false
            } else {
                true
            }
        });
        for id in completed {
            let Some(pending) = self.transactions.get_mut(&id) else {
                continue;
            };
            pending.remaining = pending.remaining.saturating_sub(1);
            if pending.remaining == 0 {
                if let Some(pending) = self.transactions.remove(&id) {
                    if let Some(step) = pending.finish {
                        self.finished.push(step);
                    }
                }
            }
        }
    }

    fn drain_finished(&mut self) -> Vec<Step> {
        std::mem::take(&mut self.finished)
    }

    fn is_idle(&self) -> bool {
        self.running.is_empty() && self.finished.is_empty()
    }
}
