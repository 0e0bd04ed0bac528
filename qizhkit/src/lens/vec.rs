//! `Vec<T>` lenses
use crate::lens::{Lens, LensCompose};
use crate::path::FieldPath;
use std::marker::PhantomData;

/// A lens that looks at a particular item in a vector.
///
/// It implements `Lens<Vec<T>,T>`. This lens is partial: `with` and `with_mut` panic
/// if the index is out of bounds, `try_with` and `try_with_mut` return `None`.
#[derive(Debug)]
pub struct VecLens<T> {
    index: usize,
    _phantom: PhantomData<fn() -> T>,
}

// #26925
impl<T> Clone for VecLens<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VecLens<T> {}

impl<T> VecLens<T> {
    pub fn new(index: usize) -> VecLens<T> {
        VecLens {
            index,
            _phantom: PhantomData,
        }
    }
}

impl<T> Lens<Vec<T>, T> for VecLens<T> {
    fn with<R, F: FnOnce(&T) -> R>(&self, data: &Vec<T>, f: F) -> R {
        f(&data[self.index])
    }

    fn with_mut<R, F: FnOnce(&mut T) -> R>(&self, data: &mut Vec<T>, f: F) -> R {
        f(&mut data[self.index])
    }

    fn try_with<R, F: FnOnce(&T) -> R>(&self, data: &Vec<T>, f: F) -> Option<R> {
        data.get(self.index).map(f)
    }

    fn try_with_mut<R, F: FnOnce(&mut T) -> R>(&self, data: &mut Vec<T>, f: F) -> Option<R> {
        data.get_mut(self.index).map(f)
    }

    fn path(&self) -> FieldPath {
        FieldPath::index(self.index)
    }
}

/// Indexing operations
pub trait LensIndexExt<A: ?Sized, B: ?Sized>: Lens<A, B> {
    type Output;
    type Lens: Lens<A, Self::Output>;
    fn index(self, i: usize) -> Self::Lens;
}

impl<A, T, K> LensIndexExt<A, Vec<T>> for K
where
    A: ?Sized,
    K: Lens<A, Vec<T>>,
{
    type Output = T;
    type Lens = LensCompose<K, VecLens<T>, Vec<T>>;

    fn index(self, i: usize) -> Self::Lens {
        LensCompose(self, VecLens::new(i), PhantomData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens::{IdentityLens, LensExt};

    #[test]
    fn in_bounds() {
        let mut items = vec![1, 2, 3];
        let second = VecLens::new(1);
        assert_eq!(second.get(&items), 2);
        second.set(&mut items, 20);
        assert_eq!(items, vec![1, 20, 3]);
        assert_eq!(second.path(), FieldPath::index(1));
    }

    #[test]
    fn out_of_bounds() {
        let mut items = vec![1, 2, 3];
        let tenth = VecLens::<i32>::new(10);
        assert_eq!(tenth.try_with(&items, |v| *v), None);
        assert_eq!(tenth.try_with_mut(&mut items, |v| *v = 0), None);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_panics() {
        let items = vec![1, 2, 3];
        VecLens::<i32>::new(3).with(&items, |_| ());
    }

    #[test]
    fn index_ext() {
        let items = vec!["a".to_string(), "b".to_string()];
        let first = LensIndexExt::<Vec<String>, Vec<String>>::index(IdentityLens, 0);
        assert_eq!(first.get(&items), "a");
        assert_eq!(first.path().to_string(), "[0]");
    }
}
