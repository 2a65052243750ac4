pub mod history;
pub mod recorder;
