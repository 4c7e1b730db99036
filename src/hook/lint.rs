//! Run the configured linter on edited files
//!
//! Two steps per file, each bounded by the configured timeout:
//! `<program> check [--fix] <file>` then `<program> format <file>`.
//! Findings are relayed, never fatal. A missing program or a timeout is an
//! error so the orchestrator can tell it apart from findings.

use crate::config::schema::LintConfig;
use crate::config::Config;
use crate::error::{CtxsyncError, CtxsyncResult};
use crate::hook::outcome::{Outcome, SkipReason};
use crate::hook::payload::HookInput;
use crate::store::paths;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Output of one linter step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl StepOutput {
    fn mentions(&self, needle: &str) -> bool {
        self.stdout.contains(needle) || self.stderr.contains(needle)
    }
}

/// Results of linting one file
#[derive(Debug)]
pub struct LintReport {
    pub program: String,
    pub file: PathBuf,
    pub check: StepOutput,
    pub format: Option<StepOutput>,
    /// Error that stopped the format step; the check results still stand
    pub format_error: Option<CtxsyncError>,
}

impl LintReport {
    /// Split off the format step error, if any
    pub fn take_error(&mut self) -> Option<CtxsyncError> {
        self.format_error.take()
    }

    /// Diagnostic lines to relay to the orchestrator
    pub fn render(&self) -> String {
        let file = self.file.display();
        let mut lines = Vec::new();

        if self.check.success {
            lines.push(format!("[{} check] {} - OK", self.program, file));
        } else {
            lines.push(format!("[{} check] Issues in {}:", self.program, file));
            push_trimmed(&mut lines, &self.check.stdout);
            push_trimmed(&mut lines, &self.check.stderr);
        }

        if let Some(format) = &self.format {
            if !format.success {
                lines.push(format!("[{} format] Error: {}", self.program, format.stderr.trim_end()));
            } else if format.mentions("1 file reformatted") {
                lines.push(format!("[{} format] {} - Reformatted", self.program, file));
            } else {
                lines.push(format!("[{} format] {} - OK", self.program, file));
            }
        }

        lines.join("\n")
    }
}

fn push_trimmed(lines: &mut Vec<String>, text: &str) {
    let text = text.trim_end();
    if !text.is_empty() {
        lines.push(text.to_string());
    }
}

/// Linter invocation settings
#[derive(Debug, Clone)]
pub struct Linter {
    pub program: String,
    pub extensions: Vec<String>,
    pub timeout: Duration,
    pub fix: bool,
    pub format: bool,
}

impl Linter {
    pub fn from_config(config: &LintConfig) -> Self {
        Self {
            program: config.program.clone(),
            extensions: config.extensions.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            fix: config.fix,
            format: config.format,
        }
    }

    /// Whether `path` has one of the configured extensions
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|want| want.trim_start_matches('.') == ext)
            })
    }

    /// Run the check and format steps on `file`
    ///
    /// A failed check step is an error. A failed format step is recorded in
    /// the report so the check findings are not lost.
    pub async fn lint(&self, file: &Path) -> CtxsyncResult<LintReport> {
        let mut check_args = vec!["check"];
        if self.fix {
            check_args.push("--fix");
        }
        let check = self.run_step(&check_args, file).await?;

        let (format, format_error) = if self.format {
            match self.run_step(&["format"], file).await {
                Ok(output) => (Some(output), None),
                Err(e) => (None, Some(e)),
            }
        } else {
            (None, None)
        };

        Ok(LintReport {
            program: self.program.clone(),
            file: file.to_path_buf(),
            check,
            format,
            format_error,
        })
    }

    async fn run_step(&self, args: &[&str], file: &Path) -> CtxsyncResult<StepOutput> {
        let step = args.first().copied().unwrap_or_default();
        debug!("Running {} {} {}", self.program, args.join(" "), file.display());

        let child = Command::new(&self.program)
            .args(args)
            .arg(file)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match timeout(self.timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(CtxsyncError::LintToolMissing {
                    program: self.program.clone(),
                })
            }
            Ok(Err(e)) => {
                return Err(CtxsyncError::LintSpawn {
                    command: format!("{} {}", self.program, args.join(" ")),
                    source: e,
                })
            }
            Err(_) => {
                return Err(CtxsyncError::LintTimeout {
                    program: self.program.clone(),
                    step: step.to_string(),
                    file: file.to_path_buf(),
                    timeout: self.timeout,
                })
            }
        };

        Ok(StepOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Handle a tool-use payload
pub async fn handle(input: &HookInput, config: &Config) -> CtxsyncResult<Outcome<LintReport>> {
    if !config.lint.enabled {
        return Ok(SkipReason::Disabled.into());
    }

    let target = match input.file_path() {
        Ok(target) => target,
        Err(reason) => return Ok(reason.into()),
    };

    // Relative targets resolve against the project root when one is given
    let file = match input.project_root() {
        Ok(root) => paths::normalize(&root, target),
        Err(_) => match paths::absolutize(target) {
            Ok(file) => file,
            Err(_) => return Ok(SkipReason::NotARegularFile(target.to_path_buf()).into()),
        },
    };

    let linter = Linter::from_config(&config.lint);
    if !linter.accepts(&file) {
        return Ok(SkipReason::UnsupportedExtension(file).into());
    }
    if !file.is_file() {
        return Ok(SkipReason::NotARegularFile(file).into());
    }

    linter.lint(&file).await.map(Outcome::Applied)
}
