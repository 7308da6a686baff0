pub mod manager;
pub mod report;
pub mod state;
pub mod watcher;
