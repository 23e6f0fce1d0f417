//! Clientbound sync packets for Hookforge.
//!
//! Servers push the full material and modifier sets to clients as framed
//! packets on a [`Channel`]. Each packet has a positional binary body; see
//! the module docs of [`materials`] and [`modifiers`] for layouts.

/// Packet framing and dispatch.
pub mod channel;
/// Full material sync.
pub mod materials;
/// Full modifier sync.
pub mod modifiers;
/// The packet contract and its collaborators.
pub mod packet;

#[cfg(test)]
mod testing;

/// Re-export channel types.
pub use channel::{Channel, ClientboundPacket};
/// Re-export packets.
pub use materials::UpdateMaterialsPacket;
/// Re-export packets.
pub use modifiers::UpdateModifiersPacket;
/// Re-export the packet contract.
pub use packet::{CodecEnv, Packet, PacketContext};
