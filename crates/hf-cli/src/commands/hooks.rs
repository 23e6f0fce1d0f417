use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use hf_modifiers::ModifierLoader;

pub fn run(file: &Path) -> Result<(), String> {
    let loader = ModifierLoader::default();
    let modifier = super::load_modifier(&loader, file)?;

    println!(
        "  {} [level {}, tooltip {}, priority {}]",
        file.display().to_string().bold(),
        modifier.level_display().type_name(),
        modifier.tooltip_display(),
        modifier.priority()
    );

    let map = modifier.hook_map();
    if map.is_empty() {
        println!("  {}", "No hooks registered.".dimmed());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Hook", "Policy", "Modules"]);

    for name in map.hook_names() {
        let policy = loader
            .hooks()
            .resolve(name)
            .map(|hook| format!("{:?}", hook.policy()).to_lowercase())
            .unwrap_or_else(|_| "?".to_string());
        let modules: Vec<_> = map.modules_for(name).iter().map(|m| m.loader_id()).collect();
        table.add_row(vec![name.to_string(), policy, modules.join(" -> ")]);
    }

    println!("{table}");
    Ok(())
}
