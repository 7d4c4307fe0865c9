//! Deployment template output formatter

use comfy_table::{presets::NOTHING, Table};

use super::common::{or_dash, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::theta::Template;

pub fn output_templates(templates: &[Template], format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => output_table(templates, no_header),
        OutputFormat::Json => print_json(templates),
        OutputFormat::Yaml => print_yaml(templates),
    }
}

fn output_table(templates: &[Template], no_header: bool) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["ID", "Name", "Image", "Port", "Category", "Tags"]);
    }

    for tpl in templates {
        let port = if tpl.container_port > 0 {
            tpl.container_port.to_string()
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            tpl.id.clone(),
            tpl.name.clone(),
            tpl.container_image.clone(),
            port,
            or_dash(&tpl.category).to_string(),
            tpl.tags.join(", "),
        ]);
    }

    println!();
    println!("{table}");
    if !no_header {
        println!("\nTotal: {} templates", templates.len());
    }
}
