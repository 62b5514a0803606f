use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for item IDs, O(1) comparison and hashing.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Process-wide sequence so generated IDs are never handed out twice,
/// even after the item that held one has been removed.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Opaque identifier of a placed moodboard item.
/// Internally a `Spur` index: 4 bytes, Copy, Eq, Hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Spur);

impl ItemId {
    /// Intern an existing identifier string (e.g. one echoed back by the browser).
    pub fn intern(s: &str) -> Self {
        ItemId(INTERNER.get_or_intern(s))
    }

    /// Look up an identifier without interning it.
    /// Returns `None` if the string was never issued as an ID.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(ItemId)
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh ID with a kind prefix (e.g. `image_4`, `text_5`).
    pub fn generate(prefix: &str) -> Self {
        let n = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ItemId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ItemId::intern("image_hero");
        let b = ItemId::intern("image_hero");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "image_hero");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ItemId::generate("image");
        let b = ItemId::generate("image");
        let c = ItemId::generate("text");
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(c.as_str().starts_with("text_"));
    }

    #[test]
    fn lookup_does_not_intern() {
        assert!(ItemId::lookup("never_issued_id_xyz").is_none());
        let id = ItemId::generate("image");
        assert_eq!(ItemId::lookup(id.as_str()), Some(id));
    }
}
