//! Full modifier sync.
//!
//! ```text
//! varint count
//! count x { string id; modifier }
//! ```

use hf_core::{DecodeResult, PacketReader, PacketWriter, ResourceId};
use hf_modifiers::ComposableModifier;
use tracing::debug;

use crate::packet::{CodecEnv, Packet, PacketContext};

/// Sends every modifier to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateModifiersPacket {
    modifiers: Vec<(ResourceId, ComposableModifier)>,
}

impl UpdateModifiersPacket {
    /// A packet carrying `modifiers` in order.
    pub fn new(modifiers: Vec<(ResourceId, ComposableModifier)>) -> Self {
        Self { modifiers }
    }

    /// The carried modifiers.
    pub fn modifiers(&self) -> &[(ResourceId, ComposableModifier)] {
        &self.modifiers
    }
}

impl Packet for UpdateModifiersPacket {
    const ID: i32 = 1;

    fn encode(&self, env: &CodecEnv, writer: &mut PacketWriter) {
        writer.write_var_len(self.modifiers.len());
        for (id, modifier) in &self.modifiers {
            writer.write_id(id);
            env.modifiers().write_modifier(modifier, writer);
        }
    }

    fn decode(env: &CodecEnv, reader: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let count = reader.read_var_len("modifier")?;
        let mut modifiers = Vec::with_capacity(count);
        for _ in 0..count {
            let id = reader.read_id()?;
            let modifier = env.modifiers().read_modifier(reader)?;
            modifiers.push((id, modifier));
        }
        debug!(count, "decoded modifier sync");
        Ok(Self { modifiers })
    }

    fn apply(self, ctx: &PacketContext<'_>) {
        ctx.modifiers().update_modifiers_from_server(self.modifiers);
    }
}
