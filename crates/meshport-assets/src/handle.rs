use std::fmt;
use std::marker::PhantomData;

/// Slot index of an asset inside the store that issued it.
pub type AssetId = u32;

/// A typed handle referencing an asset held by an [`AssetServer`](crate::AssetServer).
///
/// Handles are plain indices: they stay valid for the lifetime of the server
/// that issued them and mean nothing to any other server.
pub struct AssetHandle<T> {
    id: AssetId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AssetHandle<T> {
    pub(crate) fn new(id: AssetId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// The slot index of this asset.
    pub fn id(&self) -> AssetId {
        self.id
    }

    pub(crate) fn index(&self) -> usize {
        self.id as usize
    }
}

impl<T> fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetHandle({})", self.id)
    }
}

impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for AssetHandle<T> {}

impl<T> std::hash::Hash for AssetHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_compare_by_id() {
        let a: AssetHandle<String> = AssetHandle::new(3);
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, AssetHandle::new(4));
        assert_eq!(format!("{:?}", a), "AssetHandle(3)");
    }
}
