//! Ordered, duplicate-free list of numeric mod ids. Order is load priority.

use serde::Serialize;

use crate::error::SettingsError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModList {
    entries: Vec<String>,
}

impl ModList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` (surrounding whitespace ignored).
    pub fn add(&mut self, id: &str) -> Result<(), SettingsError> {
        let id = validate_id(id)?;
        if self.contains(id) {
            return Err(SettingsError::DuplicateModId(id.to_string()));
        }
        self.entries.push(id.to_string());
        log::debug!("mod {id} added at position {}", self.entries.len() - 1);
        Ok(())
    }

    /// Delete the entry at `index`, shifting later entries down.
    pub fn remove(&mut self, index: usize) -> Result<String, SettingsError> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    /// Swap the entry with its predecessor. Returns the entry's new index so
    /// the caller can keep it selected; the first entry stays put.
    pub fn move_up(&mut self, index: usize) -> Result<usize, SettingsError> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(0);
        }
        self.entries.swap(index, index - 1);
        Ok(index - 1)
    }

    /// Swap the entry with its successor; the last entry stays put.
    pub fn move_down(&mut self, index: usize) -> Result<usize, SettingsError> {
        self.check_index(index)?;
        if index + 1 == self.entries.len() {
            return Ok(index);
        }
        self.entries.swap(index, index + 1);
        Ok(index + 1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Comma-joined ids in load order, no trailing separator.
    pub fn to_csv(&self) -> String {
        self.entries.join(",")
    }

    /// Replace the list with the ids in `csv`. Segments are trimmed and
    /// empty ones dropped. Every id is validated again; on any failure the
    /// list is left as it was.
    pub fn from_csv(&mut self, csv: &str) -> Result<(), SettingsError> {
        let mut parsed = ModList::new();
        for segment in csv.split(',') {
            if segment.trim().is_empty() {
                continue;
            }
            parsed.add(segment)?;
        }
        *self = parsed;
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e == id.trim())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), SettingsError> {
        if index >= self.entries.len() {
            return Err(SettingsError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

fn validate_id(id: &str) -> Result<&str, SettingsError> {
    let id = id.trim();
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SettingsError::InvalidModId(id.to_string()));
    }
    Ok(id)
}
