//! RFC 6901-style pointers over [`Node`] trees, used by the start-path
//! strategy to re-root a document before decoding.

use json_bind_node::Node;

/// Unescapes one pointer token component.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes one pointer token component.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parses a pointer into unescaped components. Relaxed: the leading `/` is
/// optional and the empty pointer names the root.
///
/// Examples:
/// - `"" -> []`
/// - `"/a~1b/~0k/0" -> ["a/b", "~k", "0"]`
/// - `"data/items" -> ["data", "items"]`
pub fn parse_pointer(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    let absolute = pointer.strip_prefix('/').unwrap_or(pointer);
    absolute.split('/').map(unescape_component).collect()
}

/// Walks `root` along the pointer: object components look up keys, array
/// components parse as indices. `None` when any step fails to resolve.
pub fn resolve<'n>(root: &'n Node, pointer: &str) -> Option<&'n Node> {
    let mut current = root;
    for component in parse_pointer(pointer) {
        current = match current {
            Node::Object(_) => current.get(&component)?,
            Node::Array(items) => items.get(component.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_matrix() {
        assert_eq!(parse_pointer(""), Vec::<String>::new());
        assert_eq!(parse_pointer("/"), vec![String::new()]);
        assert_eq!(
            parse_pointer("/a~0b/c~1d/1"),
            vec!["a~b".to_string(), "c/d".to_string(), "1".to_string()]
        );
        assert_eq!(escape_component("a/b~c"), "a~1b~0c");
        assert_eq!(unescape_component(&escape_component("a/b~c")), "a/b~c");
        assert_eq!(parse_pointer("foo/bar"), vec!["foo", "bar"]);
    }

    #[test]
    fn resolve_walks_objects_and_arrays() {
        let root = Node::Object(vec![(
            "data".to_owned(),
            Node::Array(vec![
                Node::Integer(10),
                Node::Object(vec![("x".to_owned(), Node::Bool(true))]),
            ]),
        )]);
        assert_eq!(resolve(&root, ""), Some(&root));
        assert_eq!(resolve(&root, "/data/0"), Some(&Node::Integer(10)));
        assert_eq!(resolve(&root, "data/1/x"), Some(&Node::Bool(true)));
        assert_eq!(resolve(&root, "/data/2"), None);
        assert_eq!(resolve(&root, "/missing"), None);
        assert_eq!(resolve(&root, "/data/not-an-index"), None);
        assert_eq!(resolve(&root, "/data/0/deeper"), None);
    }
}
