//! Counter use cases.

use super::traced;
use crate::error::CoreResult;
use crate::model::counter::Counter;
use crate::repo::CounterRepository;
use parking_lot::Mutex;

/// Adds one to the persisted counter.
pub struct IncrementCounter<'r, R: CounterRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: CounterRepository + ?Sized> IncrementCounter<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> CoreResult<Counter> {
        traced("increment_counter", apply(self.repo, Counter::increment))
    }
}

/// Subtracts one from the persisted counter; stays at zero when already zero.
pub struct DecrementCounter<'r, R: CounterRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: CounterRepository + ?Sized> DecrementCounter<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> CoreResult<Counter> {
        traced("decrement_counter", apply(self.repo, Counter::decrement))
    }
}

/// Sets the persisted counter back to zero.
pub struct ResetCounter<'r, R: CounterRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: CounterRepository + ?Sized> ResetCounter<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> CoreResult<Counter> {
        traced("reset_counter", apply(self.repo, Counter::reset))
    }
}

/// Reads the persisted counter.
pub struct GetCounter<'r, R: CounterRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: CounterRepository + ?Sized> GetCounter<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> CoreResult<Counter> {
        traced("get_counter", self.repo.load_counter())
    }
}

fn apply<R: CounterRepository + ?Sized>(
    repo: &R,
    step: impl FnOnce(&Counter) -> Counter,
) -> CoreResult<Counter> {
    let next = step(&repo.load_counter()?);
    repo.save_counter(&next)?;
    Ok(next)
}

/// Entry points for counter callers. Writes are serialized per instance.
pub struct CounterService<R: CounterRepository> {
    repo: R,
    write_lock: Mutex<()>,
}

impl<R: CounterRepository> CounterService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn increment_counter(&self) -> CoreResult<Counter> {
        let _guard = self.write_lock.lock();
        IncrementCounter::new(&self.repo).execute()
    }

    pub fn decrement_counter(&self) -> CoreResult<Counter> {
        let _guard = self.write_lock.lock();
        DecrementCounter::new(&self.repo).execute()
    }

    pub fn reset_counter(&self) -> CoreResult<Counter> {
        let _guard = self.write_lock.lock();
        ResetCounter::new(&self.repo).execute()
    }

    pub fn get_counter(&self) -> CoreResult<Counter> {
        GetCounter::new(&self.repo).execute()
    }
}
