use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

use bytes::Bytes;
use thiserror::Error as ThisError;

/// Errors surfaced by dataspace operations. The display strings are the
/// exact texts written to the wire.
#[derive(Debug, ThisError, PartialEq)]
pub enum StoreError {
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,
    #[error("ERR value is not an integer or out of range")]
    NotAnInteger,
}

/// A stored value. The tag only changes under the store's lock, and only
/// along the `String` <-> `Integer` conversion the INCR family performs.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(Bytes),
    Integer(i64),
    Hash(HashMap<Bytes, Bytes>),
    SortedSet(HashMap<Bytes, f64>),
    List(Vec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Hash(_) => "hash",
            Value::SortedSet(_) => "zset",
            Value::List(_) => "list",
        }
    }
}

/// The keyspace plus the expiration-metadata map. Expirations are recorded
/// only; nothing in the server evicts keys when they elapse.
#[derive(Debug, Default)]
pub struct State {
    entries: HashMap<Bytes, Value>,
    expirations: HashMap<Bytes, SystemTime>,
}

/// Shared handle to the dataspace. Cloned once per connection; every command
/// handler serializes through the single inner mutex.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<State>>,
}

impl Store {
    pub fn new() -> Store {
        Store::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.lock().unwrap()
    }
}

impl State {
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Replaces any prior value with a string payload. A prior expiration is
    /// dropped, and the replaced value's memory is released when it goes out
    /// of scope here.
    pub fn set(&mut self, key: Bytes, value: Bytes) {
        self.expirations.remove(&key);
        self.entries.insert(key, Value::String(value));
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<Value> {
        self.expirations.remove(key);
        self.entries.remove(key)
    }

    pub fn exists(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Bytes> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn flush(&mut self) {
        self.entries.clear();
        self.expirations.clear();
    }

    pub fn type_name(&self, key: &[u8]) -> Option<&'static str> {
        self.entries.get(key).map(Value::type_name)
    }

    /// Atomic read-modify-write for the INCR command family.
    ///
    /// An absent key stores `delta`. An `Integer` is added to with an
    /// overflow check. A `String` whose bytes parse as base-10 is converted:
    /// the tag is rewritten to `Integer` in place. On any error the stored
    /// value is left unchanged.
    pub fn incr_by(&mut self, key: &[u8], delta: i64) -> Result<i64, StoreError> {
        let current = match self.entries.get(key) {
            None => {
                self.entries
                    .insert(Bytes::copy_from_slice(key), Value::Integer(delta));
                return Ok(delta);
            }
            Some(Value::Integer(n)) => *n,
            Some(Value::String(bytes)) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or(StoreError::NotAnInteger)?,
            Some(_) => return Err(StoreError::WrongType),
        };

        let next = current.checked_add(delta).ok_or(StoreError::NotAnInteger)?;
        self.entries
            .insert(Bytes::copy_from_slice(key), Value::Integer(next));
        Ok(next)
    }

    /// Returns the hash at `key`, creating an empty one when the key is
    /// absent. A key holding any other tag errors without mutation.
    pub fn get_or_create_hash(
        &mut self,
        key: &[u8],
    ) -> Result<&mut HashMap<Bytes, Bytes>, StoreError> {
        let entry = self
            .entries
            .entry(Bytes::copy_from_slice(key))
            .or_insert_with(|| Value::Hash(HashMap::new()));

        match entry {
            Value::Hash(hash) => Ok(hash),
            _ => Err(StoreError::WrongType),
        }
    }

    pub fn get_hash(&self, key: &[u8]) -> Result<Option<&HashMap<Bytes, Bytes>>, StoreError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Value::Hash(hash)) => Ok(Some(hash)),
            Some(_) => Err(StoreError::WrongType),
        }
    }

    pub fn get_or_create_sorted_set(
        &mut self,
        key: &[u8],
    ) -> Result<&mut HashMap<Bytes, f64>, StoreError> {
        let entry = self
            .entries
            .entry(Bytes::copy_from_slice(key))
            .or_insert_with(|| Value::SortedSet(HashMap::new()));

        match entry {
            Value::SortedSet(set) => Ok(set),
            _ => Err(StoreError::WrongType),
        }
    }

    pub fn get_sorted_set(&self, key: &[u8]) -> Result<Option<&HashMap<Bytes, f64>>, StoreError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Value::SortedSet(set)) => Ok(Some(set)),
            Some(_) => Err(StoreError::WrongType),
        }
    }

    pub fn get_sorted_set_mut(
        &mut self,
        key: &[u8],
    ) -> Result<Option<&mut HashMap<Bytes, f64>>, StoreError> {
        match self.entries.get_mut(key) {
            None => Ok(None),
            Some(Value::SortedSet(set)) => Ok(Some(set)),
            Some(_) => Err(StoreError::WrongType),
        }
    }

    /// Records an expiration deadline for a present key. Returns false when
    /// the key is absent; the invariant is that the expiration map never
    /// holds keys missing from the keyspace.
    pub fn set_expiration(&mut self, key: &[u8], deadline: SystemTime) -> bool {
        if !self.entries.contains_key(key) {
            return false;
        }
        self.expirations
            .insert(Bytes::copy_from_slice(key), deadline);
        true
    }

    pub fn expiration(&self, key: &[u8]) -> Option<SystemTime> {
        self.expirations.get(key).copied()
    }

    /// Remaining time until the key's deadline; zero once the deadline has
    /// passed (the key itself is never evicted here).
    pub fn get_ttl(&self, key: &[u8]) -> Option<Duration> {
        let deadline = self.expirations.get(key)?;
        Some(
            deadline
                .duration_since(SystemTime::now())
                .unwrap_or(Duration::ZERO),
        )
    }

    pub fn remove_expiration(&mut self, key: &[u8]) -> bool {
        self.expirations.remove(key).is_some()
    }
}

/// Sorted-set iteration order: ascending score, ties broken by member bytes.
pub fn sorted_entries(set: &HashMap<Bytes, f64>) -> Vec<(Bytes, f64)> {
    let mut entries: Vec<(Bytes, f64)> = set
        .iter()
        .map(|(member, score)| (member.clone(), *score))
        .collect();
    entries.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    entries
}

/// Scores encode the way Redis prints doubles: integral values carry no
/// fractional part.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.is_finite() {
        format!("{}", score as i64)
    } else {
        format!("{}", score)
    }
}
