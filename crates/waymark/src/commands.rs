//! Administrative commands: `route:cache`, `route:clear` and `route:list`.
//!
//! Each command returns a [`CommandOutcome`] so a binary can print the
//! message and exit with the status. Status 0 means success; 1 means the
//! operation failed or route caching is disabled in configuration.

use std::fmt::Write as _;
use std::process::ExitCode;

use tracing::error;
use waymark_cache::RouteCache;
use waymark_config::WaymarkConfig;
use waymark_router::{Route, RouteMatcher, Router};

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Process exit status.
    pub status: u8,
    /// Text for the operator.
    pub message: String,
}

impl CommandOutcome {
    /// A successful outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
        }
    }

    /// A failed outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: 1,
            message: message.into(),
        }
    }

    /// Returns true if the status is 0.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

impl From<CommandOutcome> for ExitCode {
    fn from(outcome: CommandOutcome) -> Self {
        Self::from(outcome.status)
    }
}

const CACHE_DISABLED: &str = "Route caching is disabled (set cache.enabled = true).";

/// Warms the route cache from a fully registered router.
pub fn warm(config: &WaymarkConfig, router: &Router) -> CommandOutcome {
    if !config.cache.enabled {
        return CommandOutcome::failure(CACHE_DISABLED);
    }

    let cache = RouteCache::new(&config.cache.path);
    match cache.warm(router) {
        Ok(report) => {
            let mut message = format!(
                "Routes cached successfully: {} cached, {} skipped, {} handlers.",
                report.cached,
                report.skipped.len(),
                report.handlers.len()
            );
            for skipped in &report.skipped {
                let _ = write!(message, "\n  skipped {skipped}");
            }
            CommandOutcome::success(message)
        }
        Err(e) => {
            error!(error = %e, "route cache warm failed");
            CommandOutcome::failure(format!("Failed to cache routes: {e}"))
        }
    }
}

/// Deletes the route cache. Succeeds when nothing was cached.
pub fn clear(config: &WaymarkConfig) -> CommandOutcome {
    if !config.cache.enabled {
        return CommandOutcome::failure(CACHE_DISABLED);
    }

    let cache = RouteCache::new(&config.cache.path);
    match cache.clear() {
        Ok(true) => CommandOutcome::success("Route cache cleared."),
        Ok(false) => CommandOutcome::success("Route cache was already clear."),
        Err(e) => {
            error!(error = %e, "route cache clear failed");
            CommandOutcome::failure(format!("Failed to clear route cache: {e}"))
        }
    }
}

/// Renders every route as a table.
pub fn list<M: RouteMatcher>(matcher: &M) -> CommandOutcome {
    let routes = matcher.routes();
    if routes.is_empty() {
        return CommandOutcome::success("No routes registered.");
    }
    CommandOutcome::success(render_table(routes))
}

const HEADERS: [&str; 5] = ["METHOD", "PATH", "NAME", "HANDLER", "MIDDLEWARE"];

fn render_table(routes: &[Route]) -> String {
    let rows: Vec<[String; 5]> = routes
        .iter()
        .map(|route| {
            [
                route.method().to_string(),
                route.path().to_string(),
                route.name().unwrap_or("-").to_string(),
                route.handler().to_string(),
                if route.middleware().is_empty() {
                    "-".to_string()
                } else {
                    route
                        .middleware()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                },
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.pop();
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{:<width$}", cell.as_ref(), width = width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_router::Handler;

    fn config_in(dir: &tempfile::TempDir) -> WaymarkConfig {
        let mut config = WaymarkConfig::default();
        config.cache.enabled = true;
        config.cache.path = dir.path().join("cache/routes.json");
        config
    }

    fn router() -> Router {
        let mut router = Router::new();
        router
            .get("/", Handler::class("HomeController"))
            .unwrap()
            .name("home")
            .unwrap();
        router
            .post("/users/{id}", Handler::action("UserController", "update"))
            .unwrap()
            .middleware(Handler::class("Auth"))
            .middleware(Handler::class("Csrf"));
        router.get("/health", Handler::closure(|| "ok")).unwrap();
        router
    }

    #[test]
    fn test_warm_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let outcome = warm(&config, &router());
        assert!(outcome.is_success());
        assert!(outcome.message.contains("2 cached, 1 skipped"));
        assert!(outcome
            .message
            .contains("skipped GET /health: Handler is a Closure"));
        assert!(config.cache.path.exists());

        let outcome = clear(&config);
        assert_eq!(outcome, CommandOutcome::success("Route cache cleared."));

        let outcome = clear(&config);
        assert_eq!(outcome.status, 0);
        assert!(!config.cache.path.exists());
    }

    #[test]
    fn test_disabled_cache_exits_one() {
        let config = WaymarkConfig::default();
        assert_eq!(warm(&config, &router()).status, 1);
        assert_eq!(clear(&config).status, 1);
    }

    #[test]
    fn test_list_table() {
        let outcome = list(&router());
        assert!(outcome.is_success());

        let lines: Vec<_> = outcome.message.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("METHOD"));
        assert!(lines[0].ends_with("MIDDLEWARE"));
        assert!(lines[1].starts_with("GET "));
        assert!(lines[1].contains("home"));
        assert!(lines[2].contains("UserController@update"));
        assert!(lines[2].ends_with("Auth, Csrf"));
        assert!(lines[3].contains("Closure"));
    }

    #[test]
    fn test_list_empty() {
        let outcome = list(&Router::new());
        assert_eq!(outcome.message, "No routes registered.");
    }

    #[test]
    fn test_exit_code_conversion() {
        let _: ExitCode = CommandOutcome::failure("boom").into();
        let _: ExitCode = CommandOutcome::success("ok").into();
    }
}
