//! Resource kind enum for the write commands

use clap::ValueEnum;

/// Resource kinds that can be created, updated or deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    /// Deployment (replaced on update)
    #[value(alias = "deployment", alias = "deployments")]
    Deploy,
    /// Endpoint (updated in place)
    #[value(alias = "endpoints")]
    Endpoint,
    /// Deployment template
    #[value(alias = "template", alias = "templates")]
    Tpl,
    /// Project
    #[value(alias = "project", alias = "projects")]
    Prj,
}

impl ResourceKind {
    /// Whether the kind is scoped to a project
    pub fn needs_project(&self) -> bool {
        !matches!(self, ResourceKind::Prj)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Deploy => write!(f, "deployment"),
            ResourceKind::Endpoint => write!(f, "endpoint"),
            ResourceKind::Tpl => write!(f, "template"),
            ResourceKind::Prj => write!(f, "project"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_display() {
        assert_eq!(ResourceKind::Deploy.to_string(), "deployment");
        assert_eq!(ResourceKind::Endpoint.to_string(), "endpoint");
        assert_eq!(ResourceKind::Tpl.to_string(), "template");
        assert_eq!(ResourceKind::Prj.to_string(), "project");
    }

    #[test]
    fn test_resource_kind_aliases() {
        assert_eq!(
            ResourceKind::from_str("deployment", false).unwrap(),
            ResourceKind::Deploy
        );
        assert_eq!(
            ResourceKind::from_str("template", false).unwrap(),
            ResourceKind::Tpl
        );
        assert!(ResourceKind::from_str("workspace", false).is_err());
    }

    #[test]
    fn test_needs_project() {
        assert!(ResourceKind::Deploy.needs_project());
        assert!(ResourceKind::Tpl.needs_project());
        assert!(!ResourceKind::Prj.needs_project());
    }
}
