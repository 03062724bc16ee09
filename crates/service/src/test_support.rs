#![cfg(test)]
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use models::toy::Toy;
use models::user::{LoggedinUser, ToyOwner};

use crate::storage::{StoreError, ToyStore};

/// In-memory `ToyStore` that records every write and can be told to fail them.
#[derive(Default)]
pub struct MemoryStore {
    toys: Mutex<Vec<Toy>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn with_toys(toys: Vec<Toy>) -> Arc<Self> {
        Arc::new(Self { toys: Mutex::new(toys), ..Default::default() })
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// What the last successful write left behind.
    pub fn snapshot(&self) -> Vec<Toy> {
        self.toys.lock().unwrap().clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToyStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<Toy>, StoreError> {
        Ok(self.snapshot())
    }

    async fn save_all(&self, toys: &[Toy]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
        }
        *self.toys.lock().unwrap() = toys.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn user(id: &str, is_admin: bool) -> LoggedinUser {
    LoggedinUser { id: id.into(), fullname: format!("user {id}"), is_admin, score: Some(100.0), extra: Default::default() }
}

pub fn toy(id: &str, name: &str, price: f64, created_at: i64, owner_id: &str) -> Toy {
    Toy {
        id: id.into(),
        name: name.into(),
        price,
        in_stock: true,
        img_url: format!("https://robohash.org/{name}?set=set4"),
        labels: vec![],
        created_at,
        owner: ToyOwner {
            id: owner_id.into(),
            fullname: format!("user {owner_id}"),
            is_admin: false,
            extra: Default::default(),
        },
        extra: Default::default(),
    }
}
