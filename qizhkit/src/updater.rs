use crate::error::UpdateError;
use crate::lens::{Lens, LensCompose};
use crate::path::FieldPath;
use crate::updatable::Updatable;
use std::fmt;
use std::marker::PhantomData;

/// Deferred update of one field of a value, returned by [`Updatable::updater`].
///
/// The updater borrows the source value and remembers the lens. Each terminal operation
/// consumes the updater and returns an updated copy of the source; the source itself is
/// never modified.
pub struct FieldUpdater<'a, S, L, T: ?Sized> {
    source: &'a S,
    lens: L,
    _phantom: PhantomData<fn(&T)>,
}

impl<'a, S, L, T> fmt::Debug for FieldUpdater<'a, S, L, T>
where
    S: fmt::Debug,
    L: Lens<S, T>,
    T: ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FieldUpdater")
            .field("source", self.source)
            .field("path", &self.lens.path())
            .finish()
    }
}

impl<'a, S, L, T> FieldUpdater<'a, S, L, T>
where
    S: Updatable,
    L: Lens<S, T>,
    T: ?Sized,
{
    pub fn new(source: &'a S, lens: L) -> FieldUpdater<'a, S, L, T> {
        FieldUpdater {
            source,
            lens,
            _phantom: PhantomData,
        }
    }

    /// Path of the field that this updater writes to.
    pub fn path(&self) -> FieldPath {
        self.lens.path()
    }

    /// Returns a copy of the source where the field has been modified in place by `mutate`.
    pub fn modify(self, mutate: impl FnOnce(&mut T)) -> S {
        let mut copy = self.source.clone();
        self.lens.with_mut(&mut copy, mutate);
        copy
    }

    /// Like `modify`, but fails if the lens addresses nothing in the source.
    pub fn try_modify(self, mutate: impl FnOnce(&mut T)) -> Result<S, UpdateError> {
        let mut copy = self.source.clone();
        self.lens
            .try_with_mut(&mut copy, mutate)
            .ok_or_else(|| UpdateError::unreachable(self.lens.path()))?;
        Ok(copy)
    }

    /// Narrows the updater to a part of the field.
    pub fn focus<K, C>(self, lens: K) -> FieldUpdater<'a, S, LensCompose<L, K, T>, C>
    where
        K: Lens<T, C>,
        C: ?Sized,
    {
        FieldUpdater::new(self.source, Lens::<S, T>::compose::<K, C>(self.lens, lens))
    }
}

impl<'a, S, L, T> FieldUpdater<'a, S, L, T>
where
    S: Updatable,
    L: Lens<S, T>,
{
    /// Returns a copy of the source with the field set to `value`.
    pub fn with(self, value: T) -> S {
        self.modify(|field| *field = value)
    }

    /// Returns a copy of the source with the field set to the result of `value`.
    ///
    /// `value` is only evaluated by this call.
    pub fn with_lazy(self, value: impl FnOnce() -> T) -> S {
        self.modify(|field| *field = value())
    }

    /// Like `with`, but fails if the lens addresses nothing in the source.
    pub fn try_with(self, value: T) -> Result<S, UpdateError> {
        self.try_modify(|field| *field = value)
    }

    /// Returns a copy of the source with the field set to `transform(current value)`.
    pub fn map(self, transform: impl FnOnce(&T) -> T) -> S {
        let value = self.lens.with(self.source, transform);
        self.with(value)
    }

    /// Returns a copy of the source with `element` appended to the field.
    pub fn push<E>(self, element: E) -> S
    where
        T: Extend<E>,
    {
        self.modify(|collection| collection.extend(Some(element)))
    }
}
