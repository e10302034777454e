//! Domain models for the Agri Advisory Platform

mod alert;
mod farmer;
mod weather;

pub use alert::*;
pub use farmer::*;
pub use weather::*;
