use std::fmt;

use crate::mat3::Mat3;
use crate::poly::Poly;

/// Stable identity for a list entry. Reordering moves entries around; ids are
/// never reassigned or reused within a list, so UI state keyed by id survives
/// reorders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u64);

#[derive(Clone, Debug)]
pub struct TransformEntry {
    pub id: EntryId,
    /// Describes how the matrix was constructed (e.g. "Rotate 45"). Cell
    /// edits intentionally leave the name untouched.
    pub name: String,
    pub mat: Mat3,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditError {
    InvalidCellValue { text: String },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::InvalidCellValue { text } => {
                write!(f, "invalid cell value: {text:?} (expected a finite number)")
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Ordered, user-editable sequence of transform entries. Insertion order is
/// the composition order.
#[derive(Clone, Debug, Default)]
pub struct TransformList {
    entries: Vec<TransformEntry>,
    next_id: u64,
}

impl TransformList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns its id.
    pub fn add(&mut self, mat: Mat3, name: impl Into<String>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(TransformEntry {
            id,
            name: name.into(),
            mat,
        });
        id
    }

    /// The default add: an identity entry.
    pub fn add_identity(&mut self) -> EntryId {
        self.add(Mat3::identity(), "Identity")
    }

    pub fn add_translate(&mut self, x: f64, y: f64) -> EntryId {
        self.add(Mat3::translate(x, y), format!("Translate ({x}, {y})"))
    }

    pub fn add_scale(&mut self, x: f64, y: f64) -> EntryId {
        self.add(Mat3::scale(x, y), format!("Scale ({x}, {y})"))
    }

    pub fn add_rotate(&mut self, angle_deg: f64) -> EntryId {
        self.add(Mat3::rotate(angle_deg), format!("Rotate {angle_deg}"))
    }

    /// Removes the entry at `index`, preserving the relative order of the
    /// rest. Out of bounds is an explicit no-op returning `false`.
    pub fn delete(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        true
    }

    /// Swaps the entry at `index` with its predecessor. No-op at index 0 and
    /// out of bounds.
    pub fn move_up(&mut self, index: usize) {
        if index == 0 || index >= self.entries.len() {
            return;
        }
        self.entries.swap(index - 1, index);
    }

    /// Swaps the entry at `index` with its successor. No-op at the last index
    /// and out of bounds.
    pub fn move_down(&mut self, index: usize) {
        if index + 1 >= self.entries.len() {
            return;
        }
        self.entries.swap(index, index + 1);
    }

    /// Validated cell edit: parses `text` and writes it into the entry's
    /// matrix. Rejects non-numeric and non-finite input, leaving the matrix
    /// unchanged. A stale id (entry already deleted) is a no-op, consistent
    /// with the out-of-bounds list operations.
    pub fn set_cell(
        &mut self,
        id: EntryId,
        row: usize,
        col: usize,
        text: &str,
    ) -> Result<(), EditError> {
        let v: f64 = text.trim().parse().map_err(|_| EditError::InvalidCellValue {
            text: text.to_owned(),
        })?;
        if !v.is_finite() {
            return Err(EditError::InvalidCellValue {
                text: text.to_owned(),
            });
        }

        if let Some(entry) = self.entry_mut(id) {
            entry.mat.set_cell(row, col, v);
        }
        Ok(())
    }

    pub fn entries(&self) -> &[TransformEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: EntryId) -> Option<&TransformEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut TransformEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn index_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Folds `base` through every entry in list order: the first entry is
    /// applied first, each later entry transforms the previous step's output.
    /// For entries [M1..Mn] and point p the result is `Mn * ... * M1 * p`.
    pub fn apply(&self, base: &Poly) -> Poly {
        let mut out = base.clone();
        for entry in &self.entries {
            out.transform(&entry.mat);
        }
        out
    }
}
