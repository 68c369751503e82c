/*!
A module to keep track of the variables of a single formula.
*/

use std::fmt::Display;

use typed_index_collections::TiVec;

/// Newtype wrapper for a position in [`Variables`].
/// Positions are handed out in first-occurrence order and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableIndex(usize);

impl VariableIndex {
    pub fn as_index(&self) -> usize {
        self.0
    }
}

impl From<usize> for VariableIndex {
    fn from(index: usize) -> Self {
        VariableIndex(index)
    }
}

impl From<VariableIndex> for usize {
    fn from(index: VariableIndex) -> Self {
        index.0
    }
}

impl Display for VariableIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRecord {
    name: String,
    value: bool,
}

impl VariableRecord {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered set of the distinct variables of a formula.
///
/// The order is the order in which the parser met each name for the first time.
/// It decides both which counter bit drives a variable and the column order of the output.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    records: TiVec<VariableIndex, VariableRecord>,
}

impl Variables {
    pub fn new() -> Self {
        Variables {
            records: TiVec::new(),
        }
    }

    /// Returns the index of `name`, appending a new record set to `false` if it is not known yet.
    pub fn register(&mut self, name: &str) -> VariableIndex {
        if let Some(index) = self.find(name) {
            return index;
        }

        let index = self.records.push_and_get_key(VariableRecord {
            name: name.to_owned(),
            value: false,
        });
        trace!("Registered variable '{}' as {}", name, index);
        index
    }

    /// Looks up a variable by exact, case-sensitive name.
    pub fn find(&self, name: &str) -> Option<VariableIndex> {
        self.records
            .iter_enumerated()
            .find(|(_, record)| record.name == name)
            .map(|(index, _)| index)
    }

    /// Current value of `name`. Unknown names read as `false`.
    pub fn value_of(&self, name: &str) -> bool {
        self.find(name)
            .map(|index| self.records[index].value)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sets variable `j` to bit `j` of `bits`, the first registered variable being the lowest bit.
    ///
    /// # Panics
    ///
    /// Panics when there are more variables than bits in `bits`.
    pub fn set_from_bits(&mut self, bits: u64) {
        assert!(self.len() <= u64::BITS as usize);

        for (index, record) in self.records.iter_mut_enumerated() {
            record.value = (bits >> index.as_index()) & 1 == 1;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableRecord> + '_ {
        self.records.iter()
    }

    /// Snapshot of the current assignment in registry order.
    pub fn assignment(&self) -> Vec<(String, bool)> {
        self.records
            .iter()
            .map(|record| (record.name.clone(), record.value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_deduplicates_by_name() {
        let mut variables = Variables::new();
        let p = variables.register("p");
        let q = variables.register("q");

        assert_eq!(variables.register("p"), p);
        assert_eq!(variables.register("q"), q);
        assert_ne!(p, q);
        assert_eq!(variables.len(), 2);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut variables = Variables::new();
        variables.register("p");
        variables.register("P");

        assert_eq!(variables.len(), 2);
        assert_eq!(variables.find("p"), Some(VariableIndex::from(0)));
        assert_eq!(variables.find("P"), Some(VariableIndex::from(1)));
    }

    #[test]
    fn set_from_bits_drives_lowest_bit_first() {
        let mut variables = Variables::new();
        for name in &["a", "b", "c"] {
            variables.register(name);
        }

        variables.set_from_bits(0b001);
        assert_eq!(
            variables.assignment(),
            vec![
                ("a".to_owned(), true),
                ("b".to_owned(), false),
                ("c".to_owned(), false),
            ]
        );

        variables.set_from_bits(0b110);
        assert!(!variables.value_of("a"));
        assert!(variables.value_of("b"));
        assert!(variables.value_of("c"));
    }

    #[test]
    fn unknown_name_reads_false() {
        let mut variables = Variables::new();
        variables.register("p");
        variables.set_from_bits(1);

        assert!(variables.value_of("p"));
        assert!(!variables.value_of("q"));
    }
}
