use hf_materials::{FluidTable, MaterialLoader};
use hf_modifiers::ModifierLoader;
use hf_network::{Channel, ClientboundPacket};
use serde_json::{Map, Value};
use tracing::warn;

pub fn run(input: &str, frame: bool) -> Result<(), String> {
    let bytes = hex::decode(input.trim()).map_err(|e| format!("invalid hex: {e}"))?;

    let json = if frame {
        decode_frame(&bytes)?
    } else {
        let loader = ModifierLoader::default();
        let modifier = loader.read_bytes(&bytes).map_err(|e| e.to_string())?;
        loader.serialize(&modifier)
    };

    let text = serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn decode_frame(bytes: &[u8]) -> Result<Value, String> {
    let channel = Channel::default();
    let packet = channel.decode(bytes).map_err(|e| e.to_string())?;

    let body = match &packet {
        ClientboundPacket::Materials(p) => {
            let fluids = FluidTable::with_defaults();
            let loader = MaterialLoader::new(&fluids);
            Value::Array(p.materials().iter().map(|m| loader.serialize(m)).collect())
        }
        ClientboundPacket::Modifiers(p) => {
            let loader = channel.env().modifiers();
            let mut map = Map::new();
            for (id, modifier) in p.modifiers() {
                if map.insert(id.to_string(), loader.serialize(modifier)).is_some() {
                    warn!(%id, "duplicate modifier id in frame, keeping the last");
                }
            }
            Value::Object(map)
        }
    };

    let mut json = Map::new();
    json.insert("packet".to_string(), Value::from(packet.name()));
    json.insert("body".to_string(), body);
    Ok(Value::Object(json))
}
