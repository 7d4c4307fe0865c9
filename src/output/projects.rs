//! Project output formatter

use comfy_table::{presets::NOTHING, Table};

use super::common::{or_dash, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::theta::Project;

/// Output projects in the specified format
pub fn output_projects(projects: &[Project], format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => output_table(projects, no_header),
        OutputFormat::Json => print_json(projects),
        OutputFormat::Yaml => print_yaml(projects),
    }
}

fn output_table(projects: &[Project], no_header: bool) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["ID", "Name", "Org ID", "Users", "Created"]);
    }

    for prj in projects {
        table.add_row(vec![
            prj.id.clone(),
            prj.name.clone(),
            prj.org_id.clone(),
            prj.user_ids.len().to_string(),
            or_dash(prj.create_time.as_deref().unwrap_or_default()).to_string(),
        ]);
    }

    println!();
    println!("{table}");
    if !no_header {
        println!("\nTotal: {} projects", projects.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_table_empty() {
        output_table(&[], false);
    }

    #[test]
    fn test_output_projects() {
        let projects = vec![Project {
            id: "prj_1".to_string(),
            name: "ml".to_string(),
            org_id: "org_1".to_string(),
            user_ids: vec!["usr_1".to_string()],
            ..Default::default()
        }];
        // Should not panic
        output_projects(&projects, OutputFormat::Table, true);
        output_projects(&projects, OutputFormat::Json, false);
    }
}
