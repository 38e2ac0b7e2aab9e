pub mod backend;

pub use backend::{HttpSnapshotProvider, SnapshotProvider};
