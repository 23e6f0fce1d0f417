//! Framing for clientbound packets.
//!
//! A frame is a varint packet id followed by the packet body and nothing
//! else. Decoding is all-or-nothing: a frame that fails to decode is never
//! handed to a sink.

use bytes::Bytes;
use hf_core::{DecodeError, DecodeResult, PacketReader, PacketWriter};
use tracing::debug;

use crate::materials::UpdateMaterialsPacket;
use crate::modifiers::UpdateModifiersPacket;
use crate::packet::{CodecEnv, Packet, PacketContext};

/// Any packet the channel carries.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientboundPacket {
    /// Full material sync.
    Materials(UpdateMaterialsPacket),
    /// Full modifier sync.
    Modifiers(UpdateModifiersPacket),
}

impl ClientboundPacket {
    /// The packet's discriminator.
    pub fn id(&self) -> i32 {
        match self {
            Self::Materials(_) => UpdateMaterialsPacket::ID,
            Self::Modifiers(_) => UpdateModifiersPacket::ID,
        }
    }

    /// Short name for logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Materials(_) => "update_materials",
            Self::Modifiers(_) => "update_modifiers",
        }
    }

    /// Apply the packet and mark the context handled.
    pub fn handle(self, ctx: &mut PacketContext<'_>) {
        match self {
            Self::Materials(packet) => packet.handle(ctx),
            Self::Modifiers(packet) => packet.handle(ctx),
        }
    }
}

impl From<UpdateMaterialsPacket> for ClientboundPacket {
    fn from(packet: UpdateMaterialsPacket) -> Self {
        Self::Materials(packet)
    }
}

impl From<UpdateModifiersPacket> for ClientboundPacket {
    fn from(packet: UpdateModifiersPacket) -> Self {
        Self::Modifiers(packet)
    }
}

/// Encodes, decodes and dispatches framed packets.
#[derive(Clone, Default)]
pub struct Channel {
    env: CodecEnv,
}

impl Channel {
    /// A channel using `env`.
    pub fn new(env: CodecEnv) -> Self {
        Self { env }
    }

    /// The codec environment.
    pub fn env(&self) -> &CodecEnv {
        &self.env
    }

    /// Frame a packet.
    pub fn encode(&self, packet: &ClientboundPacket) -> Bytes {
        let mut writer = PacketWriter::new();
        writer.write_var_i32(packet.id());
        match packet {
            ClientboundPacket::Materials(p) => p.encode(&self.env, &mut writer),
            ClientboundPacket::Modifiers(p) => p.encode(&self.env, &mut writer),
        }
        writer.freeze()
    }

    /// Decode one whole frame.
    pub fn decode(&self, frame: &[u8]) -> DecodeResult<ClientboundPacket> {
        let mut reader = PacketReader::with_limits(frame, self.env.limits());
        let packet = match reader.read_var_i32()? {
            UpdateMaterialsPacket::ID => {
                UpdateMaterialsPacket::decode(&self.env, &mut reader)?.into()
            }
            UpdateModifiersPacket::ID => {
                UpdateModifiersPacket::decode(&self.env, &mut reader)?.into()
            }
            other => return Err(DecodeError::UnknownPacket(other)),
        };
        reader.finish()?;
        Ok(packet)
    }

    /// Decode a frame and hand it to the context's sinks.
    pub fn dispatch(&self, frame: &[u8], ctx: &mut PacketContext<'_>) -> DecodeResult<()> {
        let packet = self.decode(frame)?;
        debug!(packet = packet.name(), bytes = frame.len(), "dispatching packet");
        packet.handle(ctx);
        Ok(())
    }
}
