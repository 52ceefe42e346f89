use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Primary key of a row in the `projects` table.
///
/// Only positive keys are representable; lookups that find nothing return
/// `None` instead of a zero id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryId(i64);

/// Primary key of a row in the `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl RepositoryId {
    /// Non-positive values mean "not provided".
    #[must_use]
    pub fn new(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl UserId {
    /// Non-positive values mean "not provided".
    #[must_use]
    pub fn new(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for RepositoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{RepositoryId, UserId};

    #[test]
    fn non_positive_raw_ids_are_absent() {
        assert_eq!(RepositoryId::new(0), None);
        assert_eq!(RepositoryId::new(-4), None);
        assert_eq!(UserId::new(0), None);
        assert_eq!(UserId::new(i64::MIN), None);
    }

    #[test]
    fn positive_raw_ids_round_trip() {
        assert_eq!(RepositoryId::new(78_852).map(RepositoryId::get), Some(78_852));
        assert_eq!(UserId::new(2).map(|id| id.to_string()), Some("2".to_string()));
    }
}
