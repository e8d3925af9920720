//! The step recorder each algorithm run owns.

use std::collections::BTreeMap;

use crate::types::{Edge, VertexId};

use super::{Auxiliary, Disposition, Step, StepSequence};

/// Collects snapshots for one algorithm run.
///
/// The recorder keeps the accepted-edge list and running total itself, so
/// every snapshot carries the state at the moment it was pushed.
#[derive(Debug)]
pub struct StepRecorder<V> {
    steps: Vec<Step<V>>,
    accepted: Vec<Edge<V>>,
    running_total: f64,
    enabled: bool,
    max_steps: Option<usize>,
    truncated: bool,
}

impl<V: VertexId> StepRecorder<V> {
    /// A recorder that keeps every step.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            accepted: Vec::new(),
            running_total: 0.0,
            enabled: true,
            max_steps: None,
            truncated: false,
        }
    }

    /// A recorder that keeps nothing. Algorithms still track the running total.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// A recorder that stops after `max_steps` snapshots.
    pub fn with_limit(max_steps: usize) -> Self {
        Self {
            max_steps: Some(max_steps),
            ..Self::new()
        }
    }

    /// True while snapshots are still being kept.
    pub fn is_recording(&self) -> bool {
        self.enabled && !self.truncated
    }

    /// Number of snapshots kept so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if no snapshot has been kept yet.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of accepted edge weights.
    pub fn running_total(&self) -> f64 {
        self.running_total
    }

    /// Record an accepted edge; later snapshots include it.
    pub fn accept(&mut self, edge: &Edge<V>) {
        self.running_total += edge.weight;
        if self.is_recording() {
            self.accepted.push(edge.clone());
        }
    }

    /// Start a snapshot. Returns `None` when nothing is being recorded, so
    /// callers skip building subtitles and auxiliary payloads.
    pub fn step(&mut self, title: impl Into<String>) -> Option<StepDraft<'_, V>> {
        if !self.is_recording() {
            return None;
        }
        if let Some(max) = self.max_steps {
            if self.steps.len() >= max {
                log::debug!("step limit {} reached, trace truncated", max);
                self.truncated = true;
                return None;
            }
        }
        Some(StepDraft {
            recorder: self,
            title: title.into(),
            subtitle: None,
            considered: None,
            disposition: None,
            auxiliary: BTreeMap::new(),
        })
    }

    /// Finish recording and hand the sequence to the caller.
    pub fn finish(self) -> StepSequence<V> {
        StepSequence::new(self.steps, self.truncated)
    }
}

impl<V: VertexId> Default for StepRecorder<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot being assembled. Nothing is recorded until [`StepDraft::push`].
#[must_use = "a step draft does nothing until pushed"]
pub struct StepDraft<'a, V> {
    recorder: &'a mut StepRecorder<V>,
    title: String,
    subtitle: Option<String>,
    considered: Option<Edge<V>>,
    disposition: Option<Disposition>,
    auxiliary: BTreeMap<&'static str, Auxiliary<V>>,
}

impl<V: VertexId> StepDraft<'_, V> {
    /// Set the subtitle.
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Attach the edge under consideration and its fate.
    pub fn considering(mut self, edge: &Edge<V>, disposition: Disposition) -> Self {
        self.considered = Some(edge.clone());
        self.disposition = Some(disposition);
        self
    }

    /// Attach an auxiliary field.
    pub fn aux(mut self, key: &'static str, value: Auxiliary<V>) -> Self {
        self.auxiliary.insert(key, value);
        self
    }

    /// Append the snapshot to the recorder.
    pub fn push(self) {
        let recorder = self.recorder;
        let step = Step {
            title: self.title,
            subtitle: self.subtitle,
            accepted_edges: recorder.accepted.clone(),
            considered_edge: self.considered,
            disposition: self.disposition,
            running_total: recorder.running_total,
            auxiliary: self.auxiliary,
        };
        recorder.steps.push(step);
    }
}
