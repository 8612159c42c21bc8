//! Storage backends.
//!
//! Both backends implement every store trait. The connection string picks
//! one: `memory://` for the in-process tables, anything else is handed
//! to PostgreSQL.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use crate::error::CoreResult;
use crate::feed::FeedStore;
use crate::page::PageStore;
use crate::user::UserStore;

pub use memory::MemoryStore;
pub use postgres::{PgStore, PoolSettings};

const MEMORY_SCHEME: &str = "memory:";

#[derive(Clone)]
pub enum Store {
    Memory(MemoryStore),
    Postgres(PgStore),
}

impl Store {
    /// Open the backend named by `url`.
    pub async fn connect(url: &str, pool: &PoolSettings) -> CoreResult<Self> {
        if url.starts_with(MEMORY_SCHEME) {
            Ok(Store::Memory(MemoryStore::new()))
        } else {
            Ok(Store::Postgres(PgStore::connect(url, pool).await?))
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Memory(_) => "memory",
            Store::Postgres(_) => "postgres",
        }
    }

    /// Bring the schema up to date. Nothing to do for the memory backend.
    pub async fn migrate(&self) -> CoreResult<()> {
        match self {
            Store::Memory(_) => Ok(()),
            Store::Postgres(pg) => pg.migrate().await,
        }
    }

    /// Round-trip to the backend to prove it is reachable.
    pub async fn ping(&self) -> CoreResult<()> {
        match self {
            Store::Memory(_) => Ok(()),
            Store::Postgres(pg) => pg.ping().await,
        }
    }

    pub fn pages(&self) -> Arc<dyn PageStore> {
        match self {
            Store::Memory(m) => Arc::new(m.clone()),
            Store::Postgres(pg) => Arc::new(pg.clone()),
        }
    }

    pub fn feed(&self) -> Arc<dyn FeedStore> {
        match self {
            Store::Memory(m) => Arc::new(m.clone()),
            Store::Postgres(pg) => Arc::new(pg.clone()),
        }
    }

    pub fn users(&self) -> Arc<dyn UserStore> {
        match self {
            Store::Memory(m) => Arc::new(m.clone()),
            Store::Postgres(pg) => Arc::new(pg.clone()),
        }
    }
}
