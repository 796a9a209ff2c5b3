//! Predicted-Output Edit Benchmark
//!
//! Compares two ways of asking a chat completion endpoint to apply a small,
//! targeted edit to one or more source files:
//!
//! - `inline`: the file contents travel inside the user message text
//! - `hinted`: the file contents travel only through the `prediction`
//!   field, letting the service reuse the draft verbatim outside the
//!   edited spans
//!
//! The harness issues one call per strategy, strictly in sequence, records
//! wall-clock latency and reported usage for each, and writes both outputs
//! to disk so they can be diffed offline.
//!
//! # Flow
//!
//! ```text
//! Artifact Store → Request Builder (×2 strategies) → Completion Client
//!                                                          ↓
//!                                  Benchmark Runner (timing + usage)
//!                                                          ↓
//!                                                   Result Writer
//! ```

pub mod artifact;
pub mod bench;
pub mod client;
pub mod config;
pub mod request;
pub mod writer;

// Re-export key types
pub use artifact::{load_all, Artifact, ArtifactError};
pub use bench::{format_summary, run, BenchmarkRun, StrategyResult};
pub use client::{ClientConfig, ClientError, CompletionBackend, CompletionReply, HttpClient};
pub use config::BenchConfig;
pub use request::{
    build_hinted, build_inline, build_request, ChatMessage, CompletionRequest, Prediction,
    PredictionPart, Strategy,
};
pub use writer::{ResultWriter, WriteError};
