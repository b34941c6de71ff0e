// Adapters layer: concrete implementations for external systems (http, storage, export).

pub mod export;
pub mod http;
pub mod storage;
