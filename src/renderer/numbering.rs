use std::collections::HashMap;

/// Hierarchical header numbering ("2.1.3") with a displayed level range
pub(crate) struct HeaderNumbering {
    counters: HashMap<usize, usize>,
    min_level: usize,
    max_level: usize,
}

impl HeaderNumbering {
    pub(crate) fn new(min_level: usize, max_level: usize) -> Self {
        Self {
            counters: HashMap::new(),
            min_level,
            max_level,
        }
    }

    /// Advance the counter at `level`, reset every deeper counter, and
    /// return the number string to display, if any for this level range
    pub(crate) fn observe(&mut self, level: usize) -> Option<String> {
        *self.counters.entry(level).or_insert(0) += 1;
        for counter in self
            .counters
            .iter_mut()
            .filter_map(|(&l, c)| (l > level).then_some(c))
        {
            *counter = 0;
        }

        if level < self.min_level || level > self.max_level {
            return None;
        }

        let joined = (self.min_level..=level)
            .map(|l| self.counters.get(&l).copied().unwrap_or(0).to_string())
            .collect::<Vec<_>>()
            .join(".");

        if joined.is_empty() { None } else { Some(joined) }
    }
}
