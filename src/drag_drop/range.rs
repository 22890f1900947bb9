use std::fmt;

/// Inclusive index interval within which an item may be relocated during one
/// drag session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DraggableRange {
    start: usize,
    end: usize,
}

impl DraggableRange {
    /// Creates a new range spanning `start..=end`.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "invalid range specified --- start > end (start = {start}, end = {end})"
        );
        Self { start, end }
    }

    /// The full range of a collection with `item_count` items.
    pub fn full(item_count: usize) -> Self {
        Self {
            start: 0,
            end: item_count.saturating_sub(1),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn contains(&self, position: usize) -> bool {
        (self.start..=self.end).contains(&position)
    }

    /// Checks that the range fits the backing collection and contains the
    /// dragged item's position. Called once at drag start; a failure there is
    /// a configuration error and aborts the gesture before any state mutation.
    pub(crate) fn validate(&self, item_count: usize, position: usize) -> Result<(), RangeError> {
        let max_end = item_count.saturating_sub(1);
        if self.end > max_end {
            return Err(RangeError::EndOutOfBounds {
                range: *self,
                item_count,
            });
        }
        if !self.contains(position) {
            return Err(RangeError::ExcludesDraggedItem {
                range: *self,
                position,
            });
        }
        Ok(())
    }
}

impl fmt::Display for DraggableRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Why a [`DraggableRange`] was rejected at drag start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeError {
    /// `range.end()` points past the last item of the collection.
    EndOutOfBounds {
        range: DraggableRange,
        item_count: usize,
    },
    /// The range does not contain the dragged item's position.
    ExcludesDraggedItem {
        range: DraggableRange,
        position: usize,
    },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOutOfBounds { range, item_count } => write!(
                f,
                "invalid range specified --- end >= count (range = {range}, count = {item_count})"
            ),
            Self::ExcludesDraggedItem { range, position } => write!(
                f,
                "invalid range specified --- does not contain drag target item (range = {range}, position = {position})"
            ),
        }
    }
}

impl std::error::Error for RangeError {}
