/*!
 * Subprocess plumbing shared by the external tool wrappers.
 */

use log::trace;
use std::ffi::OsStr;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::errors::ToolError;

/// Run `program` with `args` and collect its output.
///
/// With `timeout_secs` set the call is raced against a timer; otherwise it
/// blocks until the tool exits. A non-zero exit status is not an error here,
/// callers decide what failure means for their tool.
pub async fn run_tool<I, S>(tool: &str, program: &str, args: I, timeout_secs: Option<u64>) -> Result<Output, ToolError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args).kill_on_drop(true);
    trace!("Running {:?}", command);

    let future = command.output();

    let output = match timeout_secs {
        Some(seconds) => {
            tokio::select! {
                result = future => result,
                _ = tokio::time::sleep(Duration::from_secs(seconds)) => {
                    return Err(ToolError::TimedOut { tool: tool.to_string(), seconds });
                }
            }
        }
        None => future.await,
    };

    output.map_err(|e| ToolError::SpawnFailed {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// Turn a finished process into an error when it reported failure
pub fn ensure_success(tool: &str, output: &Output) -> Result<(), ToolError> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(ToolError::ExitFailure {
        tool: tool.to_string(),
        message: filter_ffmpeg_stderr(&stderr),
    })
}

/// Filter ffmpeg-family stderr down to meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "ffprobe version",
        "built with",
        "configuration:",
        "lib",
        "Input #",
        "Metadata:",
        "Duration:",
        "Chapter",
        "Stream #",
        "title",
        "BPS",
        "DURATION",
        "NUMBER_OF",
        "_STATISTICS",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !noise_prefixes.iter().any(|p| line.starts_with(p)))
        .collect();

    if meaningful.is_empty() {
        format!("exit status without diagnostics ({} bytes of stderr filtered)", stderr.len())
    } else {
        meaningful.join("\n")
    }
}
