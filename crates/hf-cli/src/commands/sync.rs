use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use hf_materials::{FluidTable, MaterialLoader};
use hf_network::{Channel, UpdateMaterialsPacket};

pub fn run(file: &Path) -> Result<(), String> {
    let text = super::read_file(file)?;
    let fluids = FluidTable::with_defaults();
    let materials = MaterialLoader::new(&fluids)
        .parse_list(&text)
        .map_err(|e| format!("{}: {e}", file.display()))?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Material", "Craftable", "Fluid", "Shard"]);
    for material in &materials {
        let shard = if material.shard().is_empty() {
            "-".to_string()
        } else {
            format!("{} x{}", material.shard().item(), material.shard().count())
        };
        table.add_row(vec![
            material.id().to_string(),
            material.is_craftable().to_string(),
            material.fluid().id().to_string(),
            shard,
        ]);
    }

    let count = materials.len();
    let frame = Channel::default().encode(&UpdateMaterialsPacket::new(materials).into());

    println!("{table}");
    println!();
    println!("  {count} materials, {} byte frame", frame.len());
    println!("{}", hex::encode(&frame));
    Ok(())
}
