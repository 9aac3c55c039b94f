//! Scripted touch sequences.
//!
//! `SequenceBuilder` keeps the active contact set so every produced batch
//! carries the full current contact list, matching the engine's input
//! contract, including the terminating contact on end/cancel batches.

use tactus_foundation::touch::{ContactId, TouchBatch, TouchPhase, TouchSample};

const PRIMARY: ContactId = 0;
const SECONDARY: ContactId = 1;

#[derive(Default)]
pub struct SequenceBuilder {
    batches: Vec<TouchBatch>,
    active: Vec<(ContactId, (f64, f64))>,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary contact lands.
    pub fn down(self, t: u64, x: f64, y: f64) -> Self {
        self.contact_down(t, PRIMARY, x, y)
    }

    /// A second contact lands while the primary is held.
    pub fn second_down(self, t: u64, x: f64, y: f64) -> Self {
        self.contact_down(t, SECONDARY, x, y)
    }

    /// Primary contact moves.
    pub fn move_to(self, t: u64, x: f64, y: f64) -> Self {
        self.contact_move(t, PRIMARY, x, y)
    }

    /// Both contacts of a two-finger sequence move in one batch.
    pub fn move_pair(mut self, t: u64, a: (f64, f64), b: (f64, f64)) -> Self {
        self.set_position(PRIMARY, a);
        self.set_position(SECONDARY, b);
        self.push(TouchPhase::Move, t);
        self
    }

    /// Primary contact lifts at its last position.
    pub fn up(self, t: u64) -> Self {
        self.contact_up(t, PRIMARY)
    }

    pub fn second_up(self, t: u64) -> Self {
        self.contact_up(t, SECONDARY)
    }

    /// The platform cancels the sequence (incoming call, palm rejection).
    pub fn cancel(mut self, t: u64) -> Self {
        self.push(TouchPhase::Cancel, t);
        self.active.clear();
        self
    }

    pub fn build(self) -> Vec<TouchBatch> {
        self.batches
    }

    fn contact_down(mut self, t: u64, id: ContactId, x: f64, y: f64) -> Self {
        self.active.retain(|(existing, _)| *existing != id);
        self.active.push((id, (x, y)));
        self.push(TouchPhase::Start, t);
        self
    }

    fn contact_move(mut self, t: u64, id: ContactId, x: f64, y: f64) -> Self {
        self.set_position(id, (x, y));
        self.push(TouchPhase::Move, t);
        self
    }

    fn contact_up(mut self, t: u64, id: ContactId) -> Self {
        self.push(TouchPhase::End, t);
        self.active.retain(|(existing, _)| *existing != id);
        self
    }

    fn set_position(&mut self, id: ContactId, position: (f64, f64)) {
        for (existing, current) in self.active.iter_mut() {
            if *existing == id {
                *current = position;
            }
        }
    }

    fn push(&mut self, phase: TouchPhase, t: u64) {
        let contacts = self
            .active
            .iter()
            .map(|(id, (x, y))| TouchSample::new(*id, *x, *y, t));
        self.batches.push(TouchBatch::new(phase, t, contacts));
    }
}
