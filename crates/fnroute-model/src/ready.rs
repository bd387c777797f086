use serde::{Deserialize, Serialize};

/// Candidate instance addresses reported by the directory for one function.
///
/// Addresses are IPs or hostnames, kept in the order the directory reported them.
/// An empty set means the function is not ready to receive traffic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadySet(Vec<String>);

impl ReadySet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(addresses.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn push(&mut self, address: impl Into<String>) {
        self.0.push(address.into());
    }
}

impl From<Vec<String>> for ReadySet {
    fn from(addresses: Vec<String>) -> Self {
        Self(addresses)
    }
}

impl FromIterator<String> for ReadySet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
