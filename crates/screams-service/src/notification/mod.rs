//! Notification read-state operations.

pub mod service;

pub use service::NotificationService;
