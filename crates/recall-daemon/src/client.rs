//! HTTP client helpers for talking to a running daemon.
//!
//! These back the `health` and `search` subcommands. Responses are
//! decoded as loose JSON so the CLI stays tolerant of additive server
//! changes.

use anyhow::{Context, Result};

/// Check the daemon's health endpoint and report the result.
pub async fn check_health(url: &str) -> Result<()> {
    let endpoint = format!("{}/health", url.trim_end_matches('/'));
    let response = reqwest::get(&endpoint)
        .await
        .with_context(|| format!("Failed to reach daemon at {}", endpoint))?;

    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .context("Daemon returned a non-JSON health response")?;

    if status.is_success() {
        println!(
            "Daemon is healthy at {} (status: {})",
            url,
            body["status"].as_str().unwrap_or("unknown")
        );
        Ok(())
    } else {
        anyhow::bail!("Daemon health check failed ({}): {}", status, body);
    }
}

/// Run a semantic search against the daemon and print the results.
pub async fn run_search(
    url: &str,
    query: &str,
    limit: usize,
    project: Option<&str>,
    kind: Option<&str>,
) -> Result<()> {
    let endpoint = format!("{}/api/search/semantic", url.trim_end_matches('/'));

    let mut params = vec![
        ("q".to_string(), query.to_string()),
        ("limit".to_string(), limit.to_string()),
    ];
    if let Some(project) = project {
        params.push(("project".to_string(), project.to_string()));
    }
    if let Some(kind) = kind {
        params.push(("type".to_string(), kind.to_string()));
    }

    let client = reqwest::Client::new();
    let response = client
        .get(&endpoint)
        .query(&params)
        .send()
        .await
        .with_context(|| format!("Failed to reach daemon at {}", endpoint))?;

    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .context("Daemon returned a non-JSON search response")?;

    if !status.is_success() {
        anyhow::bail!(
            "Search failed ({}): {}",
            status,
            body["error"].as_str().unwrap_or("unknown error")
        );
    }

    let count = body["count"].as_u64().unwrap_or(0);
    println!("{} result(s) for \"{}\"", count, query);

    if let Some(results) = body["results"].as_array() {
        for (i, result) in results.iter().enumerate() {
            let text = result["text"].as_str().unwrap_or("<no text>");
            let project = result["project"].as_str().unwrap_or("-");
            let timestamp = result["timestamp"].as_str().unwrap_or("-");
            println!("{}. [{}] {}", i + 1, project, text);
            println!("   id: {}  at: {}", result["id"].as_str().unwrap_or("?"), timestamp);
        }
    }

    Ok(())
}
