//! HTTP handlers for the agri advisory platform

pub mod alert;
pub mod chat;
pub mod farmer;
pub mod health;
pub mod pipeline;

pub use alert::{list_alerts, list_alerts_for_farmer};
pub use chat::{ask, history};
pub use farmer::{get_farmer, list_farmers, register_farmer};
pub use health::health_check;
pub use pipeline::run_pipeline;
