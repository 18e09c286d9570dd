// Adapters layer: concrete implementations for external systems (storage, menu files).

pub mod menu_csv;
pub mod storage;
