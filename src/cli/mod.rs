pub mod changes;
pub mod fund;
pub mod setup;
pub mod ui;
