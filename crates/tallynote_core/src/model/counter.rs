//! Counter entity.

use super::value::BoundedCounter;
use std::fmt::{Display, Formatter};

const DEFAULT_COUNTER_ID: &str = "main";

/// Counter identifier. The app uses a single counter in practice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterId(String);

impl CounterId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CounterId {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTER_ID)
    }
}

impl Display for CounterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity-bearing wrapper around a [`BoundedCounter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    id: CounterId,
    value: BoundedCounter,
}

impl Counter {
    pub fn new(id: CounterId, value: BoundedCounter) -> Self {
        Self { id, value }
    }

    pub fn id(&self) -> &CounterId {
        &self.id
    }

    pub fn value(&self) -> BoundedCounter {
        self.value
    }

    pub fn increment(&self) -> Self {
        self.with_value(self.value.increment())
    }

    /// Returns a counter one lower, floored at zero.
    pub fn decrement(&self) -> Self {
        self.with_value(self.value.decrement())
    }

    pub fn reset(&self) -> Self {
        self.with_value(BoundedCounter::zero())
    }

    fn with_value(&self, value: BoundedCounter) -> Self {
        Self {
            id: self.id.clone(),
            value,
        }
    }
}
