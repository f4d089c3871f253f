//! Speaker roster management.
//!
//! The roster is plain synchronous state owned by the scheduler task's
//! side of the system; the countdown engine only reads the active entry
//! on load/reset/advance events and never mutates it.

use podium_types::Speaker;

/// Errors that can occur when editing the roster.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RosterError {
    /// The given roster index does not exist.
    #[error("no speaker at roster index {index}")]
    OutOfBounds {
        /// The offending index.
        index: usize,
    },
}

/// An ordered list of speakers with an optional active cursor.
#[derive(Debug, Clone, Default)]
pub struct SpeakerRoster {
    speakers: Vec<Speaker>,
    current: Option<usize>,
}

impl SpeakerRoster {
    /// Create an empty roster with no active speaker.
    pub const fn new() -> Self {
        Self {
            speakers: Vec::new(),
            current: None,
        }
    }

    /// Create a roster from an existing speaker list; the cursor starts
    /// unset even when the list is non-empty.
    pub const fn from_speakers(speakers: Vec<Speaker>) -> Self {
        Self {
            speakers,
            current: None,
        }
    }

    /// Number of speakers on the roster.
    pub const fn len(&self) -> usize {
        self.speakers.len()
    }

    /// True when no speakers have been added.
    pub const fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    /// The active speaker, if one has been selected.
    pub fn current(&self) -> Option<&Speaker> {
        self.current.and_then(|idx| self.speakers.get(idx))
    }

    /// The active cursor position, if set.
    pub const fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// All speakers in roster order.
    pub fn speakers(&self) -> &[Speaker] {
        &self.speakers
    }

    /// Append a speaker to the end of the roster. Returns its index.
    pub fn add(&mut self, speaker: Speaker) -> usize {
        self.speakers.push(speaker);
        self.speakers.len().saturating_sub(1)
    }

    /// Replace the speaker at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::OutOfBounds`] if the index does not exist.
    pub fn update(&mut self, index: usize, speaker: Speaker) -> Result<(), RosterError> {
        let slot = self
            .speakers
            .get_mut(index)
            .ok_or(RosterError::OutOfBounds { index })?;
        *slot = speaker;
        Ok(())
    }

    /// Remove the speaker at `index`, adjusting the active cursor.
    ///
    /// Removing the active speaker clears the cursor; removing an
    /// earlier entry shifts the cursor down so it keeps pointing at the
    /// same speaker.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::OutOfBounds`] if the index does not exist.
    pub fn remove(&mut self, index: usize) -> Result<Speaker, RosterError> {
        if index >= self.speakers.len() {
            return Err(RosterError::OutOfBounds { index });
        }
        let removed = self.speakers.remove(index);
        self.current = match self.current {
            Some(cur) if cur == index => None,
            Some(cur) if cur > index => Some(cur.saturating_sub(1)),
            other => other,
        };
        Ok(removed)
    }

    /// Select the speaker at `index` as active.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::OutOfBounds`] if the index does not exist.
    pub fn select(&mut self, index: usize) -> Result<&Speaker, RosterError> {
        let speaker = self
            .speakers
            .get(index)
            .ok_or(RosterError::OutOfBounds { index })?;
        self.current = Some(index);
        Ok(speaker)
    }

    /// Advance the cursor to the next speaker, wrapping to the first
    /// entry past the end. Selects the first speaker when the cursor is
    /// unset. Returns `None` on an empty roster.
    pub fn advance(&mut self) -> Option<&Speaker> {
        if self.speakers.is_empty() {
            self.current = None;
            return None;
        }
        let next = self.current.map_or(0, |cur| {
            let candidate = cur.saturating_add(1);
            if candidate >= self.speakers.len() {
                0
            } else {
                candidate
            }
        });
        self.current = Some(next);
        self.speakers.get(next)
    }
}
