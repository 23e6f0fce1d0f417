use std::path::PathBuf;

use colored::Colorize;
use hf_modifiers::ModifierLoader;

pub fn run(paths: &[PathBuf]) -> Result<(), String> {
    let files = super::collect_json_files(paths)?;
    if files.is_empty() {
        return Err("no .json files found".into());
    }

    let loader = ModifierLoader::default();
    let mut definitions = Vec::new();
    let mut unreadable = 0;

    for file in &files {
        let definition =
            super::modifier_id(file).and_then(|id| super::read_json(file).map(|value| (id, value)));
        match definition {
            Ok(definition) => definitions.push(definition),
            Err(e) => {
                println!("  {} {e}", "FAIL".red().bold());
                unreadable += 1;
            }
        }
    }

    let report = loader.load_all(definitions);
    for (id, modifier) in &report.loaded {
        println!(
            "  {} {id} ({} modules, priority {})",
            "ok".green().bold(),
            modifier.modules().len(),
            modifier.priority()
        );
    }
    for (id, error) in &report.failed {
        println!("  {} {id}: {error}", "FAIL".red().bold());
    }

    let failed = report.failed.len() + unreadable;
    println!();
    println!("  {} loaded, {} failed", report.loaded.len(), failed);

    if failed > 0 {
        Err(format!("{failed} of {} definitions failed", files.len()))
    } else {
        Ok(())
    }
}
