//! Organization output formatter

use comfy_table::{presets::NOTHING, Table};

use super::common::{or_dash, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::theta::Organization;

/// Output organizations in the specified format
pub fn output_organizations(orgs: &[Organization], format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => output_table(orgs, no_header),
        OutputFormat::Json => print_json(orgs),
        OutputFormat::Yaml => print_yaml(orgs),
    }
}

fn output_table(orgs: &[Organization], no_header: bool) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["ID", "Name", "Role", "Email", "Disabled", "Suspended"]);
    }

    for org in orgs {
        let disabled = if org.disabled { "Yes" } else { "No" };
        let suspended = if org.suspended { "Yes" } else { "No" };
        table.add_row(vec![
            org.id.as_str(),
            org.name.as_str(),
            or_dash(&org.user_role),
            or_dash(&org.email),
            disabled,
            suspended,
        ]);
    }

    println!();
    println!("{table}");
    if !no_header {
        println!("\nTotal: {} organizations", orgs.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_org() -> Organization {
        Organization {
            id: "org_1".to_string(),
            name: "Acme".to_string(),
            user_role: "admin".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_output_table_empty() {
        // Should not panic with empty input
        output_table(&[], false);
    }

    #[test]
    fn test_output_all_formats() {
        let orgs = vec![create_test_org()];
        output_organizations(&orgs, OutputFormat::Table, false);
        output_organizations(&orgs, OutputFormat::Json, false);
        output_organizations(&orgs, OutputFormat::Yaml, true);
    }

    #[test]
    fn test_yaml_carries_role() {
        let yaml = serde_yml::to_string(&vec![create_test_org()]).unwrap();
        assert!(yaml.contains("id: org_1"));
        assert!(yaml.contains("user_role: admin"));
    }
}
