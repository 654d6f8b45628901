use crate::data::{extract, records_for, Dataset, Extraction, OccupationRecord};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Selection – ordered set of chosen SOC codes
// ---------------------------------------------------------------------------

/// Codes in first-add order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    codes: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `code` unless already present. Returns whether it was added.
    pub fn add(&mut self, code: &str) -> bool {
        if self.contains(code) {
            return false;
        }
        self.codes.push(code.to_string());
        true
    }

    /// Drop `code` if present. Returns whether anything was removed.
    pub fn remove(&mut self, code: &str) -> bool {
        let before = self.codes.len();
        self.codes.retain(|c| c != code);
        self.codes.len() != before
    }

    /// Add `code` if absent, otherwise remove it.
    pub fn toggle(&mut self, code: &str) {
        if !self.remove(code) {
            self.add(code);
        }
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }

    pub fn list(&self) -> &[String] {
        &self.codes
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Session – one user's interaction state
// ---------------------------------------------------------------------------

/// Everything that belongs to a single interactive session. Passed
/// explicitly to whatever needs it; the shared [`Dataset`] stays outside.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub selection: Selection,
    pub query: String,
    /// Zero-based browse page.
    pub page: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// CDF/PDF series for the current selection.
    pub fn selected_series<'a>(&self, dataset: &'a Dataset) -> Result<Extraction<'a>> {
        extract(dataset, self.selection.list())
    }

    /// Records for the current selection, in selection order.
    pub fn selected_records<'a>(&self, dataset: &'a Dataset) -> Result<Vec<&'a OccupationRecord>> {
        records_for(dataset, self.selection.list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut sel = Selection::new();
        assert!(sel.add("15-1252"));
        let after_first = sel.list().to_vec();
        assert!(!sel.add("15-1252"));
        assert_eq!(sel.list(), after_first.as_slice());
    }

    #[test]
    fn add_then_remove_restores_empty() {
        let mut sel = Selection::new();
        sel.add("15-1252");
        assert!(sel.remove("15-1252"));
        assert_eq!(sel, Selection::new());
    }

    #[test]
    fn remove_absent_is_a_no_op() {
        let mut sel = Selection::new();
        sel.add("11-1011");
        assert!(!sel.remove("15-1252"));
        assert_eq!(sel.list(), ["11-1011"]);
    }

    #[test]
    fn list_keeps_first_add_order() {
        let mut sel = Selection::new();
        for code in ["53-3032", "11-1011", "53-3032", "15-1252"] {
            sel.add(code);
        }
        assert_eq!(sel.list(), ["53-3032", "11-1011", "15-1252"]);

        sel.toggle("11-1011");
        sel.toggle("43-9021");
        assert_eq!(sel.list(), ["53-3032", "15-1252", "43-9021"]);

        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn sessions_do_not_share_selections() {
        let mut a = Session::new();
        let b = Session::new();
        a.selection.add("15-1252");
        assert_eq!(a.selection.len(), 1);
        assert!(b.selection.is_empty());
    }
}
