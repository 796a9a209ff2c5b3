//! Benchmark runner.
//!
//! Issues one completion call per strategy, strictly in sequence, and
//! brackets each call with a wall-clock timer. Request construction and
//! artifact loading happen outside the timed window; the timer covers only
//! the network round trip. The calls are never overlapped: concurrency
//! would conflate queuing effects with each strategy's intrinsic cost.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::artifact::Artifact;
use crate::client::{ClientResult, CompletionBackend};
use crate::request::{build_request, Strategy};

/// Outcome of one strategy's single completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Which request shape produced this result.
    pub strategy: Strategy,
    /// The model's full output text.
    pub output_text: String,
    /// Wall-clock seconds spent in the network call.
    pub elapsed_seconds: f64,
    /// Usage counters as reported by the service.
    pub usage: serde_json::Value,
}

/// Paired results for a single benchmark invocation.
///
/// Lives only for the duration of the process; only the output texts are
/// persisted, via the result writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRun {
    pub inline: StrategyResult,
    pub hinted: StrategyResult,
}

impl BenchmarkRun {
    /// Results in execution order.
    pub fn results(&self) -> [&StrategyResult; 2] {
        [&self.inline, &self.hinted]
    }
}

/// Run both strategies against the same artifact snapshot and instruction.
///
/// The inline call completes fully before the hinted call begins. A single
/// failure aborts the run; nothing is retried.
pub async fn run(
    backend: &dyn CompletionBackend,
    model: &str,
    artifacts: &[Artifact],
    instruction: &str,
) -> ClientResult<BenchmarkRun> {
    let inline = run_strategy(backend, Strategy::Inline, model, artifacts, instruction).await?;
    let hinted = run_strategy(backend, Strategy::Hinted, model, artifacts, instruction).await?;
    Ok(BenchmarkRun { inline, hinted })
}

async fn run_strategy(
    backend: &dyn CompletionBackend,
    strategy: Strategy,
    model: &str,
    artifacts: &[Artifact],
    instruction: &str,
) -> ClientResult<StrategyResult> {
    let request = build_request(strategy, model, artifacts, instruction);

    let start = Instant::now();
    let reply = backend.send(&request).await?;
    let elapsed_seconds = start.elapsed().as_secs_f64();

    info!(
        strategy = %strategy,
        elapsed_secs = elapsed_seconds,
        "Completion call finished"
    );

    Ok(StrategyResult {
        strategy,
        output_text: reply.output_text,
        elapsed_seconds,
        usage: reply.usage,
    })
}

/// Format a run as a human-readable latency/usage comparison.
pub fn format_summary(run: &BenchmarkRun) -> String {
    let mut report = String::new();

    report.push_str("# Predicted-Output Benchmark\n\n");
    report.push_str("| Strategy | Latency | Usage |\n");
    report.push_str("|----------|---------|-------|\n");
    for result in run.results() {
        report.push_str(&format!(
            "| {} | {:.3}s | {} |\n",
            result.strategy, result.elapsed_seconds, result.usage,
        ));
    }

    let delta = run.hinted.elapsed_seconds - run.inline.elapsed_seconds;
    report.push_str(&format!("\nHinted minus inline latency: {:+.3}s\n", delta));

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, CompletionReply};
    use crate::request::CompletionRequest;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Returns a fixed reply after a known delay.
    struct SlowBackend {
        delay: Duration,
    }

    #[async_trait]
    impl CompletionBackend for SlowBackend {
        async fn send(&self, _request: &CompletionRequest) -> ClientResult<CompletionReply> {
            tokio::time::sleep(self.delay).await;
            Ok(CompletionReply {
                output_text: "ok".to_string(),
                usage: serde_json::json!({"completion_tokens": 1}),
            })
        }
    }

    fn make_artifacts() -> Vec<Artifact> {
        vec![Artifact {
            id: "a.py".to_string(),
            content: "def f(): pass".to_string(),
        }]
    }

    #[tokio::test]
    async fn test_elapsed_brackets_the_backend_call() {
        let backend = SlowBackend {
            delay: Duration::from_millis(50),
        };
        let run = run(&backend, "m", &make_artifacts(), "edit").await.unwrap();

        assert!(run.inline.elapsed_seconds >= 0.05);
        assert!(run.hinted.elapsed_seconds >= 0.05);
    }

    #[tokio::test]
    async fn test_elapsed_is_strictly_positive() {
        let backend = SlowBackend {
            delay: Duration::ZERO,
        };
        let run = run(&backend, "m", &make_artifacts(), "edit").await.unwrap();

        assert!(run.inline.elapsed_seconds > 0.0);
        assert!(run.hinted.elapsed_seconds > 0.0);
    }

    #[tokio::test]
    async fn test_run_records_one_result_per_strategy() {
        let backend = SlowBackend {
            delay: Duration::ZERO,
        };
        let run = run(&backend, "m", &make_artifacts(), "edit").await.unwrap();

        assert_eq!(run.inline.strategy, Strategy::Inline);
        assert_eq!(run.hinted.strategy, Strategy::Hinted);
        assert_eq!(run.inline.output_text, "ok");
        assert_eq!(run.hinted.output_text, "ok");
    }

    #[tokio::test]
    async fn test_failure_aborts_the_run() {
        struct FailBackend;

        #[async_trait]
        impl CompletionBackend for FailBackend {
            async fn send(&self, _request: &CompletionRequest) -> ClientResult<CompletionReply> {
                Err(ClientError::Service("boom".to_string()))
            }
        }

        let result = run(&FailBackend, "m", &make_artifacts(), "edit").await;
        assert!(matches!(result, Err(ClientError::Service(_))));
    }

    #[test]
    fn test_format_summary() {
        let run = BenchmarkRun {
            inline: StrategyResult {
                strategy: Strategy::Inline,
                output_text: "a".to_string(),
                elapsed_seconds: 2.5,
                usage: serde_json::json!({"completion_tokens": 100}),
            },
            hinted: StrategyResult {
                strategy: Strategy::Hinted,
                output_text: "a".to_string(),
                elapsed_seconds: 1.25,
                usage: serde_json::json!({"completion_tokens": 40}),
            },
        };

        let report = format_summary(&run);
        assert!(report.contains("| inline | 2.500s |"));
        assert!(report.contains("| hinted | 1.250s |"));
        assert!(report.contains("Hinted minus inline latency: -1.250s"));
    }

    #[test]
    fn test_strategy_result_serialization() {
        let result = StrategyResult {
            strategy: Strategy::Hinted,
            output_text: "text".to_string(),
            elapsed_seconds: 0.5,
            usage: serde_json::Value::Null,
        };
        let json = serde_json::to_string(&result).unwrap();
        let restored: StrategyResult = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.strategy, Strategy::Hinted);
        assert_eq!(restored.elapsed_seconds, 0.5);
    }
}
