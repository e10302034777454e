//! External API integrations

pub mod generator;
pub mod weather;
pub mod whatsapp;

pub use generator::AdviceGenerator;
pub use weather::OpenWeatherClient;
pub use whatsapp::WhatsAppClient;
