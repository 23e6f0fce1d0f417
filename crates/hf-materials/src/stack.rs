//! Item stacks and their wire encoding.

use hf_core::{DecodeError, DecodeResult, PacketReader, PacketWriter, ResourceId};
use serde::{Deserialize, Serialize};

fn one() -> u8 {
    1
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StackJson {
    item: ResourceId,
    #[serde(default = "one")]
    count: u8,
}

impl From<StackJson> for ItemStack {
    fn from(raw: StackJson) -> Self {
        Self::new(raw.item, raw.count)
    }
}

/// An item and a count. Every stack with a count of zero is the same
/// empty stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StackJson")]
pub struct ItemStack {
    item: ResourceId,
    count: u8,
}

impl ItemStack {
    /// A stack of `count` of `item`; a zero count gives the empty stack.
    pub fn new(item: ResourceId, count: u8) -> Self {
        if count == 0 {
            return Self::empty();
        }
        Self { item, count }
    }

    /// The empty stack.
    pub fn empty() -> Self {
        Self {
            item: ResourceId::builtin("air"),
            count: 0,
        }
    }

    /// The item id.
    pub fn item(&self) -> &ResourceId {
        &self.item
    }

    /// How many items.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Returns true if the stack holds nothing.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty()
    }
}

/// Reads and writes item stacks inside packets.
///
/// Packets treat stacks as opaque and delegate to whichever codec the
/// channel was set up with.
pub trait StackCodec: Send + Sync {
    /// Write `stack`.
    fn write(&self, stack: &ItemStack, writer: &mut PacketWriter);

    /// Read one stack.
    fn read(&self, reader: &mut PacketReader<'_>) -> DecodeResult<ItemStack>;
}

/// `bool present; if present { string item; u8 count }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStackCodec;

impl StackCodec for PlainStackCodec {
    fn write(&self, stack: &ItemStack, writer: &mut PacketWriter) {
        if stack.is_empty() {
            writer.write_bool(false);
            return;
        }
        writer.write_bool(true);
        writer.write_id(&stack.item);
        writer.write_u8(stack.count);
    }

    fn read(&self, reader: &mut PacketReader<'_>) -> DecodeResult<ItemStack> {
        if !reader.read_bool()? {
            return Ok(ItemStack::empty());
        }
        let item = reader.read_id()?;
        match reader.read_u8()? {
            0 => Err(DecodeError::InvalidCount {
                what: "item stack",
                count: 0,
            }),
            count => Ok(ItemStack::new(item, count)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(item: &str, count: u8) -> ItemStack {
        ItemStack::new(ResourceId::parse(item).unwrap(), count)
    }

    #[test]
    fn empty_stack_is_one_byte() {
        let mut writer = PacketWriter::new();
        PlainStackCodec.write(&ItemStack::empty(), &mut writer);
        assert_eq!(writer.as_slice(), &[0]);
        let bytes = writer.freeze();
        let decoded = PlainStackCodec.read(&mut PacketReader::new(&bytes)).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn zero_count_is_the_empty_stack() {
        let zero = stack("wood_shard", 0);
        assert_eq!(zero, ItemStack::empty());

        let mut writer = PacketWriter::new();
        PlainStackCodec.write(&zero, &mut writer);
        assert_eq!(writer.as_slice(), &[0]);
        let bytes = writer.freeze();
        assert_eq!(
            PlainStackCodec.read(&mut PacketReader::new(&bytes)).unwrap(),
            zero
        );
    }

    #[test]
    fn present_stack_with_zero_count_rejected() {
        let bytes = [1, 3, b'a', b':', b'b', 0];
        assert_eq!(
            PlainStackCodec.read(&mut PacketReader::new(&bytes)),
            Err(DecodeError::InvalidCount {
                what: "item stack",
                count: 0
            })
        );
    }

    #[test]
    fn present_stack_layout() {
        let mut writer = PacketWriter::new();
        PlainStackCodec.write(&stack("a:b", 3), &mut writer);
        assert_eq!(writer.as_slice(), &[1, 3, b'a', b':', b'b', 3]);
        let bytes = writer.freeze();
        assert_eq!(
            PlainStackCodec.read(&mut PacketReader::new(&bytes)).unwrap(),
            stack("a:b", 3)
        );
    }

    #[test]
    fn truncated_stack() {
        let bytes = [1, 3, b'a', b':', b'b'];
        assert!(matches!(
            PlainStackCodec.read(&mut PacketReader::new(&bytes)),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn json_count_defaults_to_one() {
        let parsed: ItemStack =
            serde_json::from_value(serde_json::json!({ "item": "iron_shard" })).unwrap();
        assert_eq!(parsed, stack("hookforge:iron_shard", 1));
    }

    #[test]
    fn json_zero_count_is_empty() {
        let parsed: ItemStack =
            serde_json::from_value(serde_json::json!({ "item": "wood_shard", "count": 0 }))
                .unwrap();
        assert!(parsed.is_empty());
        assert_eq!(parsed, ItemStack::empty());
    }

    #[test]
    fn json_unknown_key_rejected() {
        let parsed: Result<ItemStack, _> =
            serde_json::from_value(serde_json::json!({ "item": "wood_shard", "cuont": 2 }));
        assert!(parsed.is_err());
    }
}
