//! Clients - HTTP Clients for External APIs
//!
//! This module contains the HTTP clients for the spreadsheet backend
//! and for the generative text service.

pub mod gemini_client;
pub mod mock_data;
pub mod sheet_client;

// Re-export main types for convenience
pub use gemini_client::{GeminiClient, TextGenerator};
pub use sheet_client::{SheetAction, SheetClient, SheetError, WriteOutcome};
