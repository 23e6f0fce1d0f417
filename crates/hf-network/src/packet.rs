//! The packet contract and what packets need to encode and handle.

use std::sync::Arc;

use hf_core::{DecodeResult, PacketReader, PacketWriter, WireLimits};
use hf_materials::{FluidRegistry, FluidTable, MaterialSink, PlainStackCodec, StackCodec};
use hf_modifiers::{ModifierLoader, ModifierSink};

/// Collaborators needed to move packet bodies on and off the wire.
#[derive(Clone)]
pub struct CodecEnv {
    fluids: Arc<dyn FluidRegistry>,
    stacks: Arc<dyn StackCodec>,
    modifiers: ModifierLoader,
    limits: WireLimits,
}

impl CodecEnv {
    /// Built-in fluids, plain stacks, the default modifier loader.
    pub fn new() -> Self {
        Self {
            fluids: Arc::new(FluidTable::with_defaults()),
            stacks: Arc::new(PlainStackCodec),
            modifiers: ModifierLoader::default(),
            limits: WireLimits::default(),
        }
    }

    /// Resolve fluids through `fluids`.
    pub fn with_fluids(mut self, fluids: Arc<dyn FluidRegistry>) -> Self {
        self.fluids = fluids;
        self
    }

    /// Encode item stacks with `stacks`.
    pub fn with_stack_codec(mut self, stacks: Arc<dyn StackCodec>) -> Self {
        self.stacks = stacks;
        self
    }

    /// Decode modifiers with `modifiers`.
    pub fn with_modifier_loader(mut self, modifiers: ModifierLoader) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Apply `limits` to every frame read.
    pub fn with_limits(mut self, limits: WireLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The fluid registry.
    pub fn fluids(&self) -> &dyn FluidRegistry {
        self.fluids.as_ref()
    }

    /// The item stack codec.
    pub fn stacks(&self) -> &dyn StackCodec {
        self.stacks.as_ref()
    }

    /// The modifier loader.
    pub fn modifiers(&self) -> &ModifierLoader {
        &self.modifiers
    }

    /// Limits applied while reading.
    pub fn limits(&self) -> WireLimits {
        self.limits
    }
}

impl Default for CodecEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Where handled packets deliver their contents.
pub struct PacketContext<'a> {
    materials: &'a dyn MaterialSink,
    modifiers: &'a dyn ModifierSink,
    handled: bool,
}

impl<'a> PacketContext<'a> {
    /// A context delivering to the given sinks.
    pub fn new(materials: &'a dyn MaterialSink, modifiers: &'a dyn ModifierSink) -> Self {
        Self {
            materials,
            modifiers,
            handled: false,
        }
    }

    /// The material sink.
    pub fn materials(&self) -> &'a dyn MaterialSink {
        self.materials
    }

    /// The modifier sink.
    pub fn modifiers(&self) -> &'a dyn ModifierSink {
        self.modifiers
    }

    /// Whether a packet has been handled in this context.
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Mark the packet as handled.
    pub fn set_handled(&mut self) {
        self.handled = true;
    }
}

/// A clientbound packet.
pub trait Packet: Sized {
    /// Discriminator written before the body.
    const ID: i32;

    /// Write the body.
    fn encode(&self, env: &CodecEnv, writer: &mut PacketWriter);

    /// Read the body.
    fn decode(env: &CodecEnv, reader: &mut PacketReader<'_>) -> DecodeResult<Self>;

    /// Deliver the contents to the context's sinks.
    fn apply(self, ctx: &PacketContext<'_>);

    /// Apply the packet and mark the context handled.
    fn handle(self, ctx: &mut PacketContext<'_>) {
        self.apply(ctx);
        ctx.set_handled();
    }
}
