//! Common utilities for output formatters

use serde::Serialize;

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

/// Print any serializable value as YAML
pub fn print_yaml<T: Serialize + ?Sized>(data: &T) {
    match serde_yml::to_string(data) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => eprintln!("Error serializing to YAML: {}", e),
    }
}

/// Render a string map as `k=v` pairs for a table cell
pub fn join_pairs<'a>(pairs: impl IntoIterator<Item = (&'a String, &'a String)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Empty cells read better as a dash
pub fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_join_pairs_sorted() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), "2".to_string());
        map.insert("a".to_string(), "1".to_string());
        assert_eq!(join_pairs(&map), "a=1, b=2");
    }

    #[test]
    fn test_join_pairs_empty() {
        let map: BTreeMap<String, String> = BTreeMap::new();
        assert_eq!(join_pairs(&map), "");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("x"), "x");
    }
}
