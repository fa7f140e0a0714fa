//! All-or-nothing execution of a handler.
//!
//! `atomic` runs a handler against an [`UndoLog`] wrapped around the contract
//! storage. Writes go straight through, so reads inside the handler see them,
//! but the first prior value of every touched key is journaled. If the
//! handler fails, the journal is replayed and storage is exactly what it was
//! before the call.

use std::collections::HashSet;

use cosmwasm_std::{DepsMut, Order, Record, Storage};

/// Storage adapter that journals prior values of written keys.
pub struct UndoLog<'a> {
    inner: &'a mut dyn Storage,
    journal: Vec<(Vec<u8>, Option<Vec<u8>>)>,
    touched: HashSet<Vec<u8>>,
}

impl<'a> UndoLog<'a> {
    pub fn new(inner: &'a mut dyn Storage) -> Self {
        Self {
            inner,
            journal: vec![],
            touched: HashSet::new(),
        }
    }

    fn remember(&mut self, key: &[u8]) {
        if self.touched.insert(key.to_vec()) {
            let prior = self.inner.get(key);
            self.journal.push((key.to_vec(), prior));
        }
    }

    /// Number of distinct keys written so far.
    pub fn touched_keys(&self) -> usize {
        self.journal.len()
    }

    /// Restore every touched key to its value before the first write.
    pub fn rollback(self) {
        for (key, prior) in self.journal.into_iter().rev() {
            match prior {
                Some(value) => self.inner.set(&key, &value),
                None => self.inner.remove(&key),
            }
        }
    }
}

impl<'a> Storage for UndoLog<'a> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.inner.get(key)
    }

    fn range<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'b> {
        self.inner.range(start, end, order)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.remember(key);
        self.inner.set(key, value);
    }

    fn remove(&mut self, key: &[u8]) {
        self.remember(key);
        self.inner.remove(key);
    }
}

/// Run `handler` so that an `Err` leaves no trace in storage.
pub fn atomic<T, E>(deps: DepsMut, handler: impl FnOnce(DepsMut) -> Result<T, E>) -> Result<T, E> {
    let DepsMut {
        storage,
        api,
        querier,
    } = deps;
    let mut log = UndoLog::new(storage);

    let result = handler(DepsMut {
        storage: &mut log,
        api,
        querier,
    });

    if result.is_err() {
        log.rollback();
    }
    result
}
