//! Raw touch input types.
//!
//! The input contract is a sequence of [`TouchBatch`]es, each representing
//! one platform event (start/move/end/cancel) and carrying the full current
//! contact list so multi-touch recognizers can read the contact count. The
//! source of the batches is an external collaborator; the engine only
//! requires monotonic timestamps and stable per-contact identifiers.

use crate::geometry::Point;
use smallvec::SmallVec;

pub type ContactId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A single contact point observation. Immutable once produced.
///
/// `t` is a monotonic timestamp in milliseconds; timestamps within one
/// contact's lifetime are non-decreasing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    pub id: ContactId,
    pub x: f64,
    pub y: f64,
    pub t: u64,
}

impl TouchSample {
    pub fn new(id: ContactId, x: f64, y: f64, t: u64) -> Self {
        Self { id, x, y, t }
    }

    pub fn position(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}

/// One input event: a phase plus every contact currently on the surface.
///
/// For `End`/`Cancel` batches the terminating contact is still present in
/// `contacts`, carrying its final observation.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchBatch {
    pub phase: TouchPhase,
    pub t: u64,
    pub contacts: SmallVec<[TouchSample; 2]>,
}

impl TouchBatch {
    pub fn new(phase: TouchPhase, t: u64, contacts: impl IntoIterator<Item = TouchSample>) -> Self {
        Self {
            phase,
            t,
            contacts: contacts.into_iter().collect(),
        }
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// The first contact in the batch, if any. Single-contact recognizers
    /// read this one.
    pub fn primary(&self) -> Option<&TouchSample> {
        self.contacts.first()
    }

    pub fn contact(&self, id: ContactId) -> Option<&TouchSample> {
        self.contacts.iter().find(|sample| sample.id == id)
    }

    /// Both contacts of a two-finger batch, in list order.
    pub fn pair(&self) -> Option<(&TouchSample, &TouchSample)> {
        match self.contacts.as_slice() {
            [a, b] => Some((a, b)),
            _ => None,
        }
    }
}
