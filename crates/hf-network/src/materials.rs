//! Full material sync.
//!
//! ```text
//! i32 count
//! count x { string id; bool craftable; string fluidId; itemStack shard }
//! ```

use hf_core::{DecodeResult, PacketReader, PacketWriter};
use hf_materials::Material;
use tracing::debug;

use crate::packet::{CodecEnv, Packet, PacketContext};

/// Sends every material to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMaterialsPacket {
    materials: Vec<Material>,
}

impl UpdateMaterialsPacket {
    /// A packet carrying `materials` in order.
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    /// The carried materials.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Take the carried materials.
    pub fn into_materials(self) -> Vec<Material> {
        self.materials
    }
}

impl Packet for UpdateMaterialsPacket {
    const ID: i32 = 0;

    fn encode(&self, env: &CodecEnv, writer: &mut PacketWriter) {
        writer.write_i32(i32::try_from(self.materials.len()).unwrap_or(i32::MAX));
        for material in &self.materials {
            writer.write_id(material.id());
            writer.write_bool(material.is_craftable());
            writer.write_id(material.fluid().id());
            env.stacks().write(material.shard(), writer);
        }
    }

    fn decode(env: &CodecEnv, reader: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let count = reader.read_i32_len("material")?;
        let mut materials = Vec::with_capacity(count);
        for _ in 0..count {
            let id = reader.read_id()?;
            let craftable = reader.read_bool()?;
            let fluid_id = reader.read_id()?;
            let fluid = env.fluids().resolve(&fluid_id);
            let shard = env.stacks().read(reader)?;
            materials.push(Material::new(id, craftable, fluid, shard));
        }
        debug!(count, "decoded material sync");
        Ok(Self { materials })
    }

    fn apply(self, ctx: &PacketContext<'_>) {
        ctx.materials().update_materials_from_server(self.materials);
    }
}
