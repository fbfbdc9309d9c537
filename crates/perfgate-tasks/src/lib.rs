//! Task-queue client for perfgate
//!
//! Schedules benchmark runs by creating HTTP-target tasks on a Cloud
//! Tasks-compatible queue. Each task POSTs `{"commit", "includes"}` as JSON to
//! the configured worker URL.

pub mod client;
pub mod config;
pub mod error;
pub mod request;

pub use client::{TaskQueue, TaskQueueClient};
pub use config::TaskQueueConfig;
pub use error::{Result, TaskError};
pub use request::{EnqueueRequest, TaskHandle};
