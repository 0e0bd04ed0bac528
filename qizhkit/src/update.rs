//! Reified edits.
//!
//! An [`Update`] describes a modification of a part of a value, addressed by a lens. Updates
//! can be applied to copies with [`Updatable::applying`](crate::Updatable::applying), or
//! recorded by a [`State`](crate::State).
use crate::error::UpdateError;
use crate::lens::Lens;
use crate::path::FieldPath;
use std::marker::PhantomData;

/// Represents an edit on a value of type T (i.e. a modification of part of the value).
pub trait Update<T: ?Sized> {
    fn apply(&self, data: &mut T) -> Result<(), UpdateError>;

    /// Path to the part of the value modified by this edit.
    fn path(&self) -> FieldPath;
}

impl<T: ?Sized, U: Update<T> + ?Sized> Update<T> for Box<U> {
    fn apply(&self, data: &mut T) -> Result<(), UpdateError> {
        (**self).apply(data)
    }

    fn path(&self) -> FieldPath {
        (**self).path()
    }
}

/// Replaces the target of a lens.
#[derive(Clone, Debug)]
pub struct Replace<K, T> {
    lens: K,
    value: T,
}

impl<K, T> Replace<K, T> {
    pub fn new(lens: K, value: T) -> Replace<K, T> {
        Replace { lens, value }
    }
}

impl<S, T, K> Update<S> for Replace<K, T>
where
    S: ?Sized,
    T: Clone,
    K: Lens<S, T>,
{
    fn apply(&self, data: &mut S) -> Result<(), UpdateError> {
        let value = self.value.clone();
        self.lens
            .try_with_mut(data, |v| *v = value)
            .ok_or_else(|| UpdateError::unreachable(self.lens.path()))
    }

    fn path(&self) -> FieldPath {
        self.lens.path()
    }
}

/// Append operation.
#[derive(Clone, Debug)]
pub struct Append<A, K> {
    lens: K,
    element: A,
}

impl<A, K> Append<A, K> {
    pub fn new(into: K, element: A) -> Append<A, K> {
        Append { lens: into, element }
    }
}

// Append to Vec<A>
impl<S: ?Sized, A: Clone, K: Lens<S, Vec<A>>> Update<S> for Append<A, K> {
    fn apply(&self, data: &mut S) -> Result<(), UpdateError> {
        let elem = self.element.clone();
        self.lens
            .try_with_mut(data, |v| v.push(elem))
            .ok_or_else(|| UpdateError::unreachable(self.lens.path()))
    }

    fn path(&self) -> FieldPath {
        self.lens.path()
    }
}

//--------------------------------------------------------------------------------------------------
/// Insert operation
#[derive(Clone, Debug)]
pub struct Insert<A, K> {
    lens: K,
    index: usize,
    element: A,
}

impl<A, K> Insert<A, K> {
    pub fn new(into: K, index: usize, element: A) -> Insert<A, K> {
        Insert {
            lens: into,
            index,
            element,
        }
    }
}

// Insert into Vec<A>
impl<S: ?Sized, A: Clone, K: Lens<S, Vec<A>>> Update<S> for Insert<A, K> {
    fn apply(&self, data: &mut S) -> Result<(), UpdateError> {
        let index = self.index;
        let elem = self.element.clone();
        self.lens
            .try_with_mut(data, |v| {
                if index > v.len() {
                    return Err(UpdateError::IndexOutOfBounds {
                        path: self.lens.path(),
                        index,
                        len: v.len(),
                    });
                }
                v.insert(index, elem);
                Ok(())
            })
            .ok_or_else(|| UpdateError::unreachable(self.lens.path()))?
    }

    fn path(&self) -> FieldPath {
        self.lens.path()
    }
}

//--------------------------------------------------------------------------------------------------
/// Remove operation
pub struct Remove<A, K> {
    lens: K,
    index: usize,
    _phantom: PhantomData<fn() -> A>,
}

impl<A, K> Remove<A, K> {
    pub fn new(from: K, index: usize) -> Remove<A, K> {
        Remove {
            lens: from,
            index,
            _phantom: PhantomData,
        }
    }
}

// #26925
impl<A, K: Clone> Clone for Remove<A, K> {
    fn clone(&self) -> Self {
        Remove::new(self.lens.clone(), self.index)
    }
}

impl<A, K: std::fmt::Debug> std::fmt::Debug for Remove<A, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Remove")
            .field("lens", &self.lens)
            .field("index", &self.index)
            .finish()
    }
}

// Remove from Vec<A>
impl<S: ?Sized, A, K: Lens<S, Vec<A>>> Update<S> for Remove<A, K> {
    fn apply(&self, data: &mut S) -> Result<(), UpdateError> {
        let index = self.index;
        self.lens
            .try_with_mut(data, |v| {
                if index >= v.len() {
                    return Err(UpdateError::IndexOutOfBounds {
                        path: self.lens.path(),
                        index,
                        len: v.len(),
                    });
                }
                v.remove(index);
                Ok(())
            })
            .ok_or_else(|| UpdateError::unreachable(self.lens.path()))?
    }

    fn path(&self) -> FieldPath {
        self.lens.path()
    }
}
