//! Business logic services for the agri advisory platform

pub mod alert;
pub mod chat;
pub mod farmer;
pub mod pipeline;
pub mod scheduler;

pub use alert::AlertService;
pub use chat::ChatService;
pub use farmer::FarmerService;
pub use pipeline::PipelineService;
