//! Route templates for span names and metric labels.

/// Collapse concrete product ids so that labels stay low-cardinality.
///
/// Any second segment under `/products` becomes `{id}`, including ids that
/// are not valid UUIDs, since those are still routed to the item handlers.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.as_slice() {
        [] => "/".to_owned(),
        ["products"] => "/products".to_owned(),
        ["products", _id] => "/products/{id}".to_owned(),
        ["products", ..] => "/products/{unmatched}".to_owned(),
        [first, ..] if segments.len() > 2 => format!("/{first}/{{unmatched}}"),
        _ => format!("/{}", segments.join("/")),
    }
}

#[cfg(test)]
mod tests {
    use super::route_template;

    #[test]
    fn collection_and_static_routes_are_unchanged() {
        assert_eq!(route_template("/"), "/");
        assert_eq!(route_template("/products"), "/products");
        assert_eq!(route_template("/products/"), "/products");
        assert_eq!(route_template("/healthcheck"), "/healthcheck");
        assert_eq!(route_template("/api-doc/openapi.json"), "/api-doc/openapi.json");
    }

    #[test]
    fn list_and_create_share_the_collection_route() {
        for path in ["/products", "/products/", "products"] {
            assert_eq!(route_template(path), "/products", "path {path}");
        }
    }

    #[test]
    fn product_ids_are_collapsed() {
        assert_eq!(
            route_template("/products/0199f3a2-5b7e-7c3d-9e1f-2a3b4c5d6e7f"),
            "/products/{id}"
        );
        assert_eq!(route_template("/products/not-a-uuid"), "/products/{id}");
    }

    #[test]
    fn deep_paths_do_not_leak_segments() {
        assert_eq!(route_template("/products/a/b"), "/products/{unmatched}");
        assert_eq!(route_template("/x/y/z"), "/x/{unmatched}");
    }
}
