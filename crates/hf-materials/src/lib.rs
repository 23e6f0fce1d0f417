//! Materials for Hookforge.
//!
//! A [`Material`] names a craftable substance, its fluid form, and the shard
//! item it breaks into. Servers author materials as JSON and push the full
//! set to clients, which keep them in a [`MaterialRegistry`].

/// Fluids and fluid lookup.
pub mod fluid;
/// The material model and its structured form.
pub mod material;
/// Client-side store of synced materials.
pub mod registry;
/// Item stacks and the stack codec.
pub mod stack;

/// Re-export fluid types.
pub use fluid::{Fluid, FluidRegistry, FluidTable};
/// Re-export material types.
pub use material::{Material, MaterialLoader};
/// Re-export registry types.
pub use registry::{MaterialRegistry, MaterialSink};
/// Re-export stack types.
pub use stack::{ItemStack, PlainStackCodec, StackCodec};
