//! End-to-end routing scenarios against the public API.

use http::Method;
use waymark_router::{Handler, RouteMatcher, Router, RouterError};

fn app_router() -> Router {
    let mut router = Router::new();
    router
        .get("/", Handler::class("HomeController"))
        .unwrap()
        .name("home")
        .unwrap();
    router
        .get("/users/{id}", Handler::action("UserController", "show"))
        .unwrap()
        .name("users.show")
        .unwrap();
    router
        .get(
            "/users/{id}/posts/{postId}",
            Handler::action("PostController", "show"),
        )
        .unwrap()
        .name("users.posts.show")
        .unwrap();
    router
        .get("/posts/{id?}", Handler::action("PostController", "index"))
        .unwrap()
        .name("posts")
        .unwrap();
    router
        .get("/orders/{id:\\d+}", Handler::action("OrderController", "show"))
        .unwrap();
    router
}

#[test]
fn test_nested_parameters() {
    let router = app_router();
    let m = router.match_route(&Method::GET, "/users/42/posts/7");
    assert!(m.is_matched());
    let pairs: Vec<_> = m.params().iter().collect();
    assert_eq!(pairs, vec![("id", "42"), ("postId", "7")]);
}

#[test]
fn test_missing_route_is_not_found() {
    let router = app_router();
    let m = router.match_route(&Method::GET, "/missing");
    assert!(!m.is_matched());
    assert!(m.route().is_none());
    assert!(m.params().is_empty());
}

#[test]
fn test_optional_parameter_omission() {
    let router = app_router();

    let m = router.match_route(&Method::GET, "/posts");
    assert!(m.is_matched());
    assert!(m.params().is_empty());

    let m = router.match_route(&Method::GET, "/posts/42");
    assert_eq!(m.param("id"), Some("42"));
}

#[test]
fn test_constrained_parameter_rejection() {
    let router = app_router();
    assert_eq!(
        router.match_route(&Method::GET, "/orders/42").param("id"),
        Some("42")
    );
    assert!(!router.match_route(&Method::GET, "/orders/abc").is_matched());
}

#[test]
fn test_static_precedence_in_either_order() {
    let mut dynamic_first = Router::new();
    dynamic_first.get("/users/{id}", Handler::class("Show")).unwrap();
    dynamic_first.get("/users/me", Handler::class("Me")).unwrap();

    let mut static_first = Router::new();
    static_first.get("/users/me", Handler::class("Me")).unwrap();
    static_first.get("/users/{id}", Handler::class("Show")).unwrap();

    for router in [dynamic_first, static_first] {
        let m = router.match_route(&Method::GET, "/users/me");
        assert_eq!(m.route().unwrap().handler().to_string(), "Me");
        assert!(m.route().unwrap().is_static());
    }
}

#[test]
fn test_url_generation() {
    let router = app_router();
    assert_eq!(router.url("home", &[]).unwrap(), "/");
    assert_eq!(router.url("users.show", &[("id", "5")]).unwrap(), "/users/5");
    assert_eq!(
        router
            .url("users.show", &[("id", "5"), ("tab", "posts")])
            .unwrap(),
        "/users/5?tab=posts"
    );
    assert_eq!(router.url("posts", &[]).unwrap(), "/posts");
    assert_eq!(router.url("posts", &[("id", "9")]).unwrap(), "/posts/9");
}

#[test]
fn test_url_errors() {
    let router = app_router();
    assert!(matches!(
        router.url("nope", &[]),
        Err(RouterError::UnknownNamedRoute { .. })
    ));
    assert_eq!(
        router.url("users.posts.show", &[("id", "1")]).unwrap_err(),
        RouterError::MissingUrlParameter {
            name: "users.posts.show".to_string(),
            param: "postId".to_string(),
        }
    );
}

#[test]
fn test_leading_optional_needs_following_literal() {
    let mut router = Router::new();
    router
        .get("/{locale?}/about", Handler::action("PageController", "about"))
        .unwrap()
        .name("about")
        .unwrap();
    router.get("/", Handler::class("HomeController")).unwrap();

    let m = router.match_route(&Method::GET, "/");
    assert_eq!(m.route().map(|r| r.path()), Some("/"));

    let m = router.match_route(&Method::GET, "/about");
    assert_eq!(m.route().map(|r| r.path()), Some("/{locale?}/about"));
    assert!(m.params().is_empty());

    let m = router.match_route(&Method::GET, "/en/about");
    assert_eq!(m.route().map(|r| r.path()), Some("/{locale?}/about"));
    assert_eq!(m.param("locale"), Some("en"));

    assert_eq!(router.url("about", &[]).unwrap(), "/about");
    assert_eq!(router.url("about", &[("locale", "fr")]).unwrap(), "/fr/about");
}

#[test]
fn test_leading_optional_route_does_not_claim_root() {
    let mut router = Router::new();
    router
        .get("/{locale?}/about", Handler::action("PageController", "about"))
        .unwrap();

    assert!(!router.match_route(&Method::GET, "/").is_matched());
    assert!(router.match_route(&Method::GET, "/about").is_matched());
}

#[test]
fn test_routes_listing_keeps_registration_order() {
    let router = app_router();
    let listing: Vec<_> = router
        .routes()
        .iter()
        .map(|r| (r.method().as_str(), r.path()))
        .collect();
    assert_eq!(
        listing,
        vec![
            ("GET", "/"),
            ("GET", "/users/{id}"),
            ("GET", "/users/{id}/posts/{postId}"),
            ("GET", "/posts/{id?}"),
            ("GET", "/orders/{id:\\d+}"),
        ]
    );
}

#[test]
fn test_matching_is_shareable_across_threads() {
    let router = std::sync::Arc::new(app_router());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let router = std::sync::Arc::clone(&router);
            std::thread::spawn(move || {
                let path = format!("/users/{i}");
                router
                    .match_route(&Method::GET, &path)
                    .param("id")
                    .map(ToString::to_string)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(i.to_string()));
    }
}
