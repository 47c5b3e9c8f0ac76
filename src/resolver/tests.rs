use super::{extract_parameters, Resolver};
use crate::registry::Route;
use std::sync::Arc;

fn resolver_with(routes: &[(&str, &str)]) -> Resolver {
    let mut resolver = Resolver::with_cache_capacity(16);
    for (method, spec) in routes {
        resolver.add_route(Route::new(method, spec).unwrap());
    }
    resolver
}

#[test]
fn test_method_is_case_insensitive() {
    let resolver = resolver_with(&[("get", "/pets")]);
    assert!(resolver.resolve("GET", "/pets").is_some());
    assert!(resolver.resolve("Get", "/pets").is_some());
    assert!(resolver.resolve("POST", "/pets").is_none());
}

#[test]
fn test_path_is_case_sensitive() {
    let resolver = resolver_with(&[("get", "/pets")]);
    assert!(resolver.resolve("get", "/Pets").is_none());
}

#[test]
fn test_first_match_in_registration_order_wins() {
    let resolver = resolver_with(&[("get", "/pets/:id"), ("get", "/pets/all")]);
    let route = resolver.resolve("get", "/pets/all").unwrap();
    assert_eq!(route.spec(), "/pets/:id");
}

#[test]
fn test_extract_parameters_positional() {
    let route = Route::new("get", "/a/:x/b/:y").unwrap();
    let params = extract_parameters(&route, "/a/1/b/2").unwrap();
    let names: Vec<&str> = params.iter().map(|(k, _)| k.as_ref()).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert_eq!(params[0].1, "1");
    assert_eq!(params[1].1, "2");
}

#[test]
fn test_extract_parameters_mismatch_is_loud() {
    let route = Route::new("get", "/a/:x").unwrap();
    assert!(extract_parameters(&route, "/b/1").is_err());
}

#[test]
fn test_miss_is_not_cached() {
    let mut resolver = resolver_with(&[]);
    assert!(resolver.resolve("get", "/pets").is_none());
    assert_eq!(resolver.cached_resolutions(), 0);
    resolver.add_route(Route::new("get", "/pets").unwrap());
    assert!(resolver.resolve("get", "/pets").is_some());
}
