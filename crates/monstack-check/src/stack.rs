//! Starts and stops the stack through the container compose tool.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use monstack_core::error::{MonstackError, Result};

pub const DEFAULT_COMPOSE_CMD: &str = "docker-compose";

/// UIs reachable once the stack is up: (name, url, note).
pub const UI_ENDPOINTS: [(&str, &str, Option<&str>); 4] = [
    ("Grafana", "http://localhost:3000", Some("admin/admin")),
    ("Prometheus", "http://localhost:9090", None),
    ("App", "http://localhost:5000", None),
    ("Alertmanager", "http://localhost:9093", None),
];

pub struct StackRunner {
    dir: PathBuf,
    program: String,
    base_args: Vec<String>,
}

impl StackRunner {
    /// `compose_cmd` may carry arguments, e.g. `docker compose`.
    pub fn new(dir: impl Into<PathBuf>, compose_cmd: &str) -> Result<Self> {
        let mut parts = compose_cmd.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| MonstackError::BadRequest("compose command must not be empty".into()))?;
        Ok(Self { dir: dir.into(), program, base_args: parts.collect() })
    }

    pub async fn start(&self) -> Result<()> {
        self.compose(&["up", "-d"]).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.compose(&["down"]).await
    }

    async fn compose(&self, args: &[&str]) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(MonstackError::NotFound(format!(
                "stack directory {} not found",
                self.dir.display()
            )));
        }

        tracing::info!(
            program = %self.program,
            ?args,
            dir = %self.dir.display(),
            "running compose"
        );
        let status = Command::new(&self.program)
            .args(&self.base_args)
            .args(args)
            .current_dir(&self.dir)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| MonstackError::Io(format!("spawn {} failed: {e}", self.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(MonstackError::Internal(format!(
                "{} {} exited with {status}",
                self.program,
                args.join(" ")
            )))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_and_failure_follow_exit_status() {
        let dir = std::env::temp_dir();
        StackRunner::new(&dir, "true").unwrap().start().await.unwrap();

        let err = StackRunner::new(&dir, "false").unwrap().stop().await.unwrap_err();
        assert_eq!(err.code().as_str(), "INTERNAL");
        assert!(err.to_string().contains("false down"));
    }

    #[tokio::test]
    async fn missing_program_is_io() {
        let err = StackRunner::new(std::env::temp_dir(), "monstack-no-such-compose up")
            .unwrap()
            .start()
            .await
            .unwrap_err();
        assert_eq!(err.code().as_str(), "IO");
    }

    #[tokio::test]
    async fn missing_dir_is_not_found() {
        let runner = StackRunner::new("/definitely/not/here", "true").unwrap();
        let err = runner.start().await.unwrap_err();
        assert_eq!(err.code().as_str(), "NOT_FOUND");
    }

    #[test]
    fn empty_command_rejected() {
        assert!(StackRunner::new(".", "  ").is_err());
    }
}
