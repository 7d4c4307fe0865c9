//! Deployment and endpoint output formatter

use comfy_table::{presets::NOTHING, Table};

use super::common::{join_pairs, or_dash, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::theta::Deployment;

/// Output deployments in the specified format
///
/// Endpoints are printed through their [`Deployment`] form. Basic-auth
/// passwords are never serialized.
pub fn output_deployments(deployments: &[Deployment], format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => output_table(deployments, no_header),
        OutputFormat::Json => print_json(deployments),
        OutputFormat::Yaml => print_yaml(deployments),
    }
}

fn output_table(deployments: &[Deployment], no_header: bool) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec![
            "ID", "Name", "Image", "Replicas", "Machine", "URL", "Env",
        ]);
    }

    for dep in deployments {
        let replicas = if dep.min_replicas == dep.max_replicas {
            dep.min_replicas.to_string()
        } else {
            format!("{}-{}", dep.min_replicas, dep.max_replicas)
        };
        let env_keys = dep.env_vars.keys().cloned().collect::<Vec<_>>().join(", ");
        table.add_row(vec![
            dep.id.clone(),
            dep.name.clone(),
            dep.container_image.clone(),
            replicas,
            or_dash(&dep.vm_id).to_string(),
            or_dash(&dep.url).to_string(),
            or_dash(&env_keys).to_string(),
        ]);
    }

    println!();
    println!("{table}");
    if !no_header {
        println!("\nTotal: {} deployments", deployments.len());
    }
}

/// One-line summary printed after a create or update
pub fn describe_deployment(dep: &Deployment) -> String {
    let mut line = format!("{} ({}) at {}", dep.name, dep.id, or_dash(&dep.url));
    if !dep.annotations.is_empty() {
        line.push_str(&format!(" [{}]", join_pairs(&dep.annotations)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theta::Secret;

    fn create_test_deployment() -> Deployment {
        Deployment {
            id: "abcd123".to_string(),
            suffix: "abcd123".to_string(),
            name: "llama".to_string(),
            container_image: "repo/llama:1".to_string(),
            min_replicas: 1,
            max_replicas: 3,
            auth_username: Some("admin".to_string()),
            auth_password: Some(Secret::new("hunter2")),
            url: "https://llama-abcd123.example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_output_table() {
        output_table(&[create_test_deployment()], false);
    }

    #[test]
    fn test_serialized_output_omits_password() {
        let deployments = vec![create_test_deployment()];
        let json = serde_json::to_string(&deployments).unwrap();
        let yaml = serde_yml::to_string(&deployments).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!yaml.contains("hunter2"));
        assert!(json.contains("\"auth_username\":\"admin\""));
    }

    #[test]
    fn test_describe_deployment() {
        let mut dep = create_test_deployment();
        dep.annotations.insert("team".to_string(), "ml".to_string());
        assert_eq!(
            describe_deployment(&dep),
            "llama (abcd123) at https://llama-abcd123.example.com [team=ml]"
        );
    }
}
