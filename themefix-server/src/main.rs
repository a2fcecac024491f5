//! Tool-invocation server exposing `audit` and `fix-all`.
//!
//! Transport is line-oriented JSON over stdin/stdout: one request object
//! per line, one response object per line. Requests carry no parameters;
//! the repository root is the process working directory. Requests are
//! handled strictly sequentially — the engine assumes a single invocation
//! against a checkout at a time.

use anyhow::Context;
use camino::Utf8PathBuf;
use serde::Deserialize;
use themefix_core::Engine;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
#[serde(tag = "tool")]
enum Request {
    #[serde(rename = "audit")]
    Audit,
    #[serde(rename = "fix-all")]
    FixAll,
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| error_json(&format!("serialize response: {e}")))
}

/// One request line in, one response line out.
fn handle_line(engine: &Engine, line: &str) -> String {
    match serde_json::from_str::<Request>(line) {
        Ok(Request::Audit) => to_json(&engine.audit()),
        Ok(Request::FixAll) => match engine.fix_all() {
            Ok(report) => to_json(&report),
            Err(e) => error_json(&format!("{e:#}")),
        },
        Err(e) => error_json(&format!("invalid request: {e}")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cwd = std::env::current_dir().context("resolve current directory")?;
    let root = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow::anyhow!("non-utf8 working directory: {}", p.display()))?;
    let engine = Engine::new(root);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    eprintln!("themefix server ready");

    while let Some(line) = lines.next_line().await.context("read request line")? {
        if line.trim().is_empty() {
            continue;
        }
        tracing::debug!(bytes = line.len(), "request received");
        let response = handle_line(&engine, &line);
        stdout.write_all(response.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{handle_line, Engine};
    use camino::Utf8PathBuf;
    use std::fs;

    fn temp_engine() -> (tempfile::TempDir, Engine) {
        let td = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8 tempdir");
        (td, Engine::new(root))
    }

    #[test]
    fn audit_request_returns_ok_and_problems() {
        let (_td, engine) = temp_engine();
        let response = handle_line(&engine, r#"{"tool":"audit"}"#);
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["ok"], serde_json::json!(false));
        assert_eq!(value["problems"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn fix_all_request_returns_notes() {
        let (td, engine) = temp_engine();
        let response = handle_line(&engine, r#"{"tool":"fix-all"}"#);
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert!(!value["notes"].as_array().unwrap().is_empty());
        assert!(td.path().join("snippets/jsonld-website.liquid").exists());
    }

    #[test]
    fn fix_all_failure_is_reported_as_error() {
        let (td, engine) = temp_engine();
        fs::create_dir_all(td.path().join("locales")).unwrap();
        fs::write(td.path().join("locales/en.default.json"), "{ broken").unwrap();

        let response = handle_line(&engine, r#"{"tool":"fix-all"}"#);
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert!(value["error"].as_str().unwrap().contains("locales"));
    }

    #[test]
    fn unknown_tool_is_an_invalid_request() {
        let (_td, engine) = temp_engine();
        let response = handle_line(&engine, r#"{"tool":"deploy"}"#);
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert!(value["error"].as_str().unwrap().contains("invalid request"));
    }

    #[test]
    fn garbage_line_is_an_invalid_request() {
        let (_td, engine) = temp_engine();
        let response = handle_line(&engine, "not json at all");
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert!(value["error"].is_string());
    }
}
