//! Counter repository over a key-value store.

use super::dto::{counter_from_dto, CounterDto};
use super::{CounterRepository, LoadReport, COUNTER_STORAGE_KEY};
use crate::error::{CoreResult, Failure};
use crate::model::counter::{Counter, CounterId};
use crate::model::value::BoundedCounter;
use crate::store::KeyValueStore;
use log::{debug, error, info, warn};

/// Key-value backed implementation of [`CounterRepository`].
///
/// Only the value is persisted; the id is fixed per repository.
pub struct KvCounterRepository<S: KeyValueStore> {
    store: S,
    key: String,
    counter_id: CounterId,
}

impl<S: KeyValueStore> KvCounterRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: COUNTER_STORAGE_KEY.to_string(),
            counter_id: CounterId::default(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_counter_id(mut self, counter_id: CounterId) -> Self {
        self.counter_id = counter_id;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the counter; malformed or negative records recover to zero.
    pub fn load_with_report(&self) -> CoreResult<LoadReport<Counter>> {
        let zero = Counter::new(self.counter_id.clone(), BoundedCounter::zero());
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=counter_load module=repo status=ok state=missing");
                return Ok(LoadReport::clean(zero));
            }
            Err(err) => {
                error!(
                    "event=counter_load module=repo status=error error_code=storage_error error={err}"
                );
                return Err(Failure::storage(err.to_string()));
            }
        };

        let decoded = serde_json::from_str::<CounterDto>(&raw)
            .map_err(|err| Failure::corrupted(format!("counter record: {err}")))
            .and_then(|dto| counter_from_dto(dto, self.counter_id.clone()));

        match decoded {
            Ok(counter) => {
                debug!(
                    "event=counter_load module=repo status=ok value={}",
                    counter.value().number()
                );
                Ok(LoadReport::clean(counter))
            }
            Err(failure) => {
                warn!(
                    "event=counter_load module=repo status=recovered error_code={} error={failure}",
                    failure.code()
                );
                Ok(LoadReport {
                    value: zero,
                    recovered: vec![failure],
                })
            }
        }
    }
}

impl<S: KeyValueStore> CounterRepository for KvCounterRepository<S> {
    fn load_counter(&self) -> CoreResult<Counter> {
        self.load_with_report().map(|report| report.value)
    }

    fn save_counter(&self, counter: &Counter) -> CoreResult<()> {
        let serialized = serde_json::to_string(&CounterDto::from(counter))
            .map_err(|err| Failure::storage(format!("serialize counter: {err}")))?;
        self.store.set(&self.key, &serialized).map_err(|err| {
            error!(
                "event=counter_save module=repo status=error error_code=storage_error error={err}"
            );
            Failure::storage(err.to_string())
        })?;
        info!(
            "event=counter_save module=repo status=ok value={}",
            counter.value().number()
        );
        Ok(())
    }
}
