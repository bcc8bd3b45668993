//! The competition roster.
//!
//! Entrants are a fixed, ordered list of display names decided at process
//! start. Everything else in the system refers to them by 0-based index, so
//! the roster must not change while ratings for it exist.

/// Default roster, matching the original deployment of the competition.
pub const DEFAULT_ENTRANTS: &[&str] = &[
    "Javier", "Lindsay", "Yesenia", "Bryan", "Viviana", "Bernie", "Rogelio", "Daniella",
    "Colleen", "Justin", "Paige", "Nic", "Martha",
];

/// Ordered list of entrant display names, fixed at process start.
#[derive(Debug, Clone)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Build a roster from a list of names. Names are trimmed; empty entries
    /// are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    /// Parse a comma-separated roster, e.g. from an environment variable.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Display name for an entrant index, if in bounds.
    pub fn name(&self, index: i64) -> Option<&str> {
        let index = usize::try_from(index).ok()?;
        self.names.get(index).map(String::as_str)
    }

    /// Whether the index refers to an entrant on this roster.
    pub fn contains(&self, index: i64) -> bool {
        self.name(index).is_some()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over `(index, name)` pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().enumerate().map(|(i, n)| (i, n.as_str()))
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRANTS.iter().copied())
    }
}
