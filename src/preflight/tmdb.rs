//! TMDB API preflight check.

use super::CheckResult;
use crate::services::tmdb::TmdbClient;

/// Check every configured credential against the TMDB API.
pub async fn check(client: &TmdbClient) -> Vec<CheckResult> {
    let pool = client.credentials();
    if pool.is_empty() {
        return vec![CheckResult::fail(
            "TMDB API",
            "API key not configured",
            "Set TMDB_API_KEYS or add api_keys under [tmdb] in the config file",
        )];
    }

    let mut results = Vec::with_capacity(pool.len());
    for credential in pool.iter() {
        let name = format!("TMDB API {}", credential.masked());
        let result = match client.verify_credential(credential).await {
            Ok(true) => CheckResult::ok(&name, "connected"),
            Ok(false) => CheckResult::fail(
                &name,
                "invalid API key",
                "Remove or replace this key in your configuration",
            ),
            Err(_) => {
                CheckResult::fail(&name, "connection failed", "Check your network connection")
            }
        };
        results.push(result);
    }
    results
}
