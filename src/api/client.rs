use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::StatusCode;
use yansi::Paint;

use super::error::ApiError;
use crate::utils::build_query_string;

static SILENT: AtomicBool = AtomicBool::new(false);

/// Turn the curl-style request/response trace on stderr off or back on.
pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

pub fn is_silent() -> bool {
    SILENT.load(Ordering::Relaxed)
}

fn log_output(msg: String) {
    if !is_silent() {
        eprintln!("{}", msg);
    }
}

/// Shared HTTP client for one run.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ApiError> {
    let client = reqwest::Client::builder()
        .user_agent(format!("grocer/{}", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Print the request as an equivalent curl command. Header values are
/// printed as given, so callers pass secrets already masked.
pub fn log_request(method: &str, url: &str, params: &[(&str, String)], headers: &[(&str, &str)], form: &[(&str, String)]) {
    if is_silent() {
        return;
    }
    let mut url_for_log = url.to_string();
    if !params.is_empty() {
        url_for_log = format!("{}?{}", url_for_log, build_query_string(params));
    }

    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)));
    for (name, value) in headers {
        parts.push(format!(
            "{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new(format!("'{}: {}'", name, value)).fg(yansi::Color::Magenta)
        ));
    }
    if !form.is_empty() {
        parts.push(format!(
            "{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", build_query_string(form))).fg(yansi::Color::White)
        ));
    }
    log_output(format!("Request:\n{}", parts.join(" ")));
}

pub fn log_response(status: StatusCode, body: &str) {
    if is_silent() {
        return;
    }
    let line = format!("HTTP {}: {}", status, body);
    let painted = if status.is_success() {
        // Grayed out color (dimmed/dark gray)
        Paint::new(line).rgb(100, 100, 100).to_string()
    } else {
        Paint::new(line).fg(yansi::Color::Red).to_string()
    };
    log_output(format!("Response:\n{}", painted));
}

/// Mask all but the last four characters of a secret for logging.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}
