use crate::{
    error::SpreadError,
    report::{DaySnapshot, SimulationDisplay},
};
use std::{cell::RefCell, rc::Rc};

#[derive(Default)]
struct Recording {
    snapshots: Vec<DaySnapshot>,
    last_render: Vec<(String, u64)>,
}

/// Keeps every published snapshot in memory. Clones share the same recording, so keep one
/// clone to read from and hand the other to `Context::add_display`.
#[derive(Clone, Default)]
pub struct SnapshotRecorder {
    recording: Rc<RefCell<Recording>>,
}

impl SnapshotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> Vec<DaySnapshot> {
        self.recording.borrow().snapshots.clone()
    }

    pub fn last(&self) -> Option<DaySnapshot> {
        self.recording.borrow().snapshots.last().cloned()
    }

    /// The infected counts of the most recent render.
    pub fn last_render(&self) -> Vec<(String, u64)> {
        self.recording.borrow().last_render.clone()
    }

    pub fn len(&self) -> usize {
        self.recording.borrow().snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recording.borrow().snapshots.is_empty()
    }
}

impl SimulationDisplay for SnapshotRecorder {
    fn publish(&mut self, snapshot: &DaySnapshot) -> Result<(), SpreadError> {
        self.recording.borrow_mut().snapshots.push(snapshot.clone());
        Ok(())
    }

    fn render(&mut self, infected: &[(&str, u64)]) -> Result<(), SpreadError> {
        self.recording.borrow_mut().last_render = infected
            .iter()
            .map(|(name, count)| ((*name).to_string(), *count))
            .collect();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SpreadError> {
        let mut recording = self.recording.borrow_mut();
        recording.snapshots.clear();
        recording.last_render.clear();
        Ok(())
    }
}
