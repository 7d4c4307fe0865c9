//! Common traits for Theta resources

/// Common trait for all Theta resources (deployments, templates, projects, organizations)
///
/// Gives list scans and table output one way to identify a record.
pub trait ThetaResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;
}

/// Find a resource by exact ID in a scanned list
pub fn find_by_id<T: ThetaResource>(items: Vec<T>, id: &str) -> Option<T> {
    items.into_iter().find(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        id: String,
        name: String,
    }

    impl ThetaResource for TestResource {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn resource(id: &str, name: &str) -> TestResource {
        TestResource {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_find_by_id_ignores_names() {
        let items = vec![resource("a", "b"), resource("b", "c")];
        let found = find_by_id(items, "b").unwrap();
        assert_eq!(found.name, "c");
    }

    #[test]
    fn test_find_by_id_is_case_sensitive() {
        let items = vec![resource("Abc", "x")];
        assert!(find_by_id(items, "abc").is_none());
    }
}
