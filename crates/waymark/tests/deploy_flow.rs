//! The build-then-serve lifecycle: warm in a build step, boot from the cache.

use http::Method;
use waymark::commands;
use waymark::prelude::*;

fn register(router: &mut Router) -> Result<(), RouterError> {
    router
        .get("/", Handler::class("HomeController"))?
        .name("home")?;
    router
        .get("/users/me", Handler::action("UserController", "me"))?;
    router
        .get("/users/{id:\\d+}", Handler::action("UserController", "show"))?
        .name("users.show")?
        .middleware(Handler::class("Authenticate"));
    router
        .get("/users/{id}/posts/{postId?}", Handler::action("PostController", "index"))?
        .name("users.posts")?;
    router.post("/hooks", Handler::closure(|| "ok"))?;
    Ok(())
}

fn production(dir: &tempfile::TempDir) -> WaymarkConfig {
    let mut config = WaymarkConfig::production();
    config.cache.path = dir.path().join("bootstrap/cache/routes.json");
    config
}

#[test]
fn test_cached_boot_matches_live_boot() {
    let dir = tempfile::tempdir().unwrap();
    let config = production(&dir);

    let mut build = Router::new();
    register(&mut build).unwrap();
    let outcome = commands::warm(&config, &build);
    assert_eq!(outcome.status, 0, "{}", outcome.message);

    let mut live_config = config.clone();
    live_config.cache.enabled = false;
    let live = boot(&live_config, register).unwrap();
    let cached = boot(&config, |_| unreachable!()).unwrap();
    assert!(cached.is_cached());

    let requests = [
        (Method::GET, "/"),
        (Method::GET, "/users/me"),
        (Method::GET, "/users/42"),
        (Method::GET, "/users/abc"),
        (Method::GET, "/users/abc/posts"),
        (Method::GET, "/users/abc/posts/9"),
        (Method::GET, "/missing"),
        (Method::DELETE, "/"),
    ];
    for (method, path) in &requests {
        let a = live.match_route(method, path);
        let b = cached.match_route(method, path);
        assert_eq!(
            a.route().map(Route::path),
            b.route().map(Route::path),
            "{method} {path}"
        );
        assert_eq!(a.params(), b.params(), "{method} {path}");
    }

    assert_eq!(
        cached.url("users.posts", &[("id", "1")]).unwrap(),
        live.url("users.posts", &[("id", "1")]).unwrap()
    );
    assert_eq!(cached.url("users.posts", &[("id", "1")]).unwrap(), "/users/1/posts");
}

#[test]
fn test_closure_route_only_exists_live() {
    let dir = tempfile::tempdir().unwrap();
    let config = production(&dir);

    let mut build = Router::new();
    register(&mut build).unwrap();
    let outcome = commands::warm(&config, &build);
    assert!(outcome.message.contains("POST /hooks: Handler is a Closure"));

    let mut cached = boot(&config, |_| unreachable!()).unwrap();
    assert!(!cached.match_route(&Method::POST, "/hooks").is_matched());
    assert_eq!(cached.registry().unwrap_err(), RouterError::ReadOnly);
}

#[test]
fn test_production_without_artifact_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = boot(&production(&dir), register).unwrap_err();
    assert!(matches!(err, WaymarkError::Cache(ref e) if e.is_not_found()));
}

#[test]
fn test_list_after_clear() {
    let dir = tempfile::tempdir().unwrap();
    let config = production(&dir);

    let mut build = Router::new();
    register(&mut build).unwrap();
    assert!(commands::warm(&config, &build).is_success());

    let cached = boot(&config, |_| unreachable!()).unwrap();
    let listing = commands::list(&cached).message;
    assert!(listing.contains("users.show"));
    assert!(listing.contains("Authenticate"));
    assert!(!listing.contains("/hooks"));

    assert!(commands::clear(&config).is_success());
    assert!(commands::clear(&config).is_success());
    assert!(!RouteCache::new(&config.cache.path).is_cached());
}
