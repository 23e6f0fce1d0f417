use std::path::Path;

use hf_modifiers::ModifierLoader;

pub fn run(file: &Path) -> Result<(), String> {
    let loader = ModifierLoader::default();
    let modifier = super::load_modifier(&loader, file)?;
    println!("{}", hex::encode(loader.write_bytes(&modifier)));
    Ok(())
}
