mod memory;
mod models;
mod postgres;
mod querier;

pub use self::{
    memory::{MemoryStore, MemoryStoreBuilder},
    postgres::{DBPool, migrate, new_db_pool},
    querier::{ArticleFilter, Querier},
};
