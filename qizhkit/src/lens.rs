//! Lenses: reified accessors for a part of a value.
//!
//! A lens over a type `A`, given a reference to a value of type `A`, provides access to a
//! value of type `B` stored within (and potentially deep within) it. `A` is called the _root type_
//! and `B` the _leaf type_. Lenses are a generic way to represent a sequence of field accesses
//! and indexing operations (e.g. `.settings.tags[2]`).
//!
//! The term is borrowed from functional lenses: a lens is equivalent to a pair of functions
//! `get(&A) -> B` and `set(&A, B) -> A`. See [`lens`] to build one from such a pair.
use crate::path::FieldPath;
use std::fmt;
use std::marker::PhantomData;

pub mod vec;
pub use vec::LensIndexExt;
pub use vec::VecLens;

/// Trait implemented by "lens" types, which act like a reified accessor for
/// some "child" part of type `B` of a "parent" value of type `A`.
//
// Accessors pass the target to a closure instead of returning a reference, because the target
// might only live for the duration of the call: lenses built from a pure `get`/`set` pair
// synthesize the target on the fly and write it back afterwards.
pub trait Lens<A: ?Sized, B: ?Sized> {
    // --- Accessors ---
    fn with<R, F: FnOnce(&B) -> R>(&self, data: &A, f: F) -> R;
    fn with_mut<R, F: FnOnce(&mut B) -> R>(&self, data: &mut A, f: F) -> R;

    /// Like `with`, but returns `None` if the target does not exist in `data`.
    ///
    /// Lenses that always address something don't need to override this.
    fn try_with<R, F: FnOnce(&B) -> R>(&self, data: &A, f: F) -> Option<R> {
        Some(self.with(data, f))
    }

    /// Like `with_mut`, but returns `None` if the target does not exist in `data`.
    fn try_with_mut<R, F: FnOnce(&mut B) -> R>(&self, data: &mut A, f: F) -> Option<R> {
        Some(self.with_mut(data, f))
    }

    /// Returns the path, within the parent value, to the part that the lens is looking at.
    fn path(&self) -> FieldPath;

    /// Lens composition.
    fn compose<K, C: ?Sized>(self, rhs: K) -> LensCompose<Self, K, B>
    where
        Self: Sized,
        K: Lens<B, C>,
    {
        LensCompose(self, rhs, PhantomData)
    }
}

pub trait LensExt<A: ?Sized, B>: Lens<A, B> {
    /// Returns a copy of the target.
    fn get(&self, data: &A) -> B
    where
        B: Clone,
    {
        self.with(data, |x| x.clone())
    }

    /// Replaces the target in place.
    fn set(&self, data: &mut A, value: B) {
        self.with_mut(data, |x| *x = value)
    }
}

impl<A: ?Sized, B, L: Lens<A, B>> LensExt<A, B> for L {}

impl<'a, A: ?Sized, B: ?Sized, L: Lens<A, B>> Lens<A, B> for &'a L {
    fn with<R, F: FnOnce(&B) -> R>(&self, data: &A, f: F) -> R {
        (**self).with(data, f)
    }

    fn with_mut<R, F: FnOnce(&mut B) -> R>(&self, data: &mut A, f: F) -> R {
        (**self).with_mut(data, f)
    }

    fn try_with<R, F: FnOnce(&B) -> R>(&self, data: &A, f: F) -> Option<R> {
        (**self).try_with(data, f)
    }

    fn try_with_mut<R, F: FnOnce(&mut B) -> R>(&self, data: &mut A, f: F) -> Option<R> {
        (**self).try_with_mut(data, f)
    }

    fn path(&self) -> FieldPath {
        (**self).path()
    }
}

/// Identity lens.
#[derive(Copy, Clone, Debug)]
pub struct IdentityLens;

impl<A: ?Sized> Lens<A, A> for IdentityLens {
    fn with<R, F: FnOnce(&A) -> R>(&self, data: &A, f: F) -> R {
        f(data)
    }

    fn with_mut<R, F: FnOnce(&mut A) -> R>(&self, data: &mut A, f: F) -> R {
        f(data)
    }

    fn path(&self) -> FieldPath {
        FieldPath::root()
    }
}

/// Lens composition: combines `Lens<U,V>` and `Lens<V,W>` to `Lens<U,W>`.
///
/// Equivalent to applying two lenses in succession.
#[derive(Debug)]
pub struct LensCompose<K, L, B: ?Sized>(pub K, pub L, pub PhantomData<B>);

// #26925
impl<K: Clone, L: Clone, B: ?Sized> Clone for LensCompose<K, L, B> {
    fn clone(&self) -> Self {
        LensCompose(self.0.clone(), self.1.clone(), PhantomData)
    }
}

impl<K: Copy, L: Copy, B: ?Sized> Copy for LensCompose<K, L, B> {}

impl<K, L, A: ?Sized, B: ?Sized, C: ?Sized> Lens<A, C> for LensCompose<K, L, B>
where
    K: Lens<A, B>,
    L: Lens<B, C>,
{
    fn with<R, F: FnOnce(&C) -> R>(&self, data: &A, f: F) -> R {
        self.0.with(data, |data| self.1.with(data, f))
    }

    fn with_mut<R, F: FnOnce(&mut C) -> R>(&self, data: &mut A, f: F) -> R {
        self.0.with_mut(data, |data| self.1.with_mut(data, f))
    }

    fn try_with<R, F: FnOnce(&C) -> R>(&self, data: &A, f: F) -> Option<R> {
        self.0.try_with(data, |data| self.1.try_with(data, f)).flatten()
    }

    fn try_with_mut<R, F: FnOnce(&mut C) -> R>(&self, data: &mut A, f: F) -> Option<R> {
        self.0
            .try_with_mut(data, |data| self.1.try_with_mut(data, f))
            .flatten()
    }

    fn path(&self) -> FieldPath {
        self.0.path().join(&self.1.path())
    }
}

/// Lens built from a pure `get`/`set` function pair.
///
/// The target is synthesized by `get` for each access; after a mutable access, the
/// (possibly modified) target is written back with `set`.
#[derive(Copy, Clone)]
pub struct FnLens<G, S> {
    name: Option<&'static str>,
    get: G,
    set: S,
}

/// Creates a lens from a `get` function returning the target, and a `set` function returning
/// a copy of the parent with the target replaced.
///
/// The lens has the root path unless it is given a name with [`FnLens::named`].
pub fn lens<A, B, G, S>(get: G, set: S) -> FnLens<G, S>
where
    G: Fn(&A) -> B,
    S: Fn(&A, B) -> A,
{
    FnLens { name: None, get, set }
}

impl<G, S> FnLens<G, S> {
    /// Sets the name of the field that this lens accesses, used as its path.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }
}

impl<G, S> fmt::Debug for FnLens<G, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FnLens").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<A, B, G, S> Lens<A, B> for FnLens<G, S>
where
    G: Fn(&A) -> B,
    S: Fn(&A, B) -> A,
{
    fn with<R, F: FnOnce(&B) -> R>(&self, data: &A, f: F) -> R {
        f(&(self.get)(data))
    }

    fn with_mut<R, F: FnOnce(&mut B) -> R>(&self, data: &mut A, f: F) -> R {
        let mut target = (self.get)(data);
        let result = f(&mut target);
        *data = (self.set)(data, target);
        result
    }

    fn path(&self) -> FieldPath {
        match self.name {
            Some(name) => FieldPath::field(name),
            None => FieldPath::root(),
        }
    }
}

/// Lens that borrows its target through a pair of accessor functions.
///
/// Usually created with the [`field_lens!`](crate::field_lens) macro.
pub struct RefLens<A: ?Sized, B: ?Sized> {
    name: &'static str,
    get: fn(&A) -> &B,
    get_mut: fn(&mut A) -> &mut B,
}

// #26925
impl<A: ?Sized, B: ?Sized> Clone for RefLens<A, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ?Sized, B: ?Sized> Copy for RefLens<A, B> {}

impl<A: ?Sized, B: ?Sized> fmt::Debug for RefLens<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RefLens({})", self.name)
    }
}

impl<A: ?Sized, B: ?Sized> RefLens<A, B> {
    pub const fn new(name: &'static str, get: fn(&A) -> &B, get_mut: fn(&mut A) -> &mut B) -> RefLens<A, B> {
        RefLens { name, get, get_mut }
    }
}

impl<A: ?Sized, B: ?Sized> Lens<A, B> for RefLens<A, B> {
    fn with<R, F: FnOnce(&B) -> R>(&self, data: &A, f: F) -> R {
        f((self.get)(data))
    }

    fn with_mut<R, F: FnOnce(&mut B) -> R>(&self, data: &mut A, f: F) -> R {
        f((self.get_mut)(data))
    }

    fn path(&self) -> FieldPath {
        FieldPath::field(self.name)
    }
}

/// Creates a [`RefLens`] accessing a field of a struct.
///
/// ```
/// use qizhkit::{field_lens, LensExt};
///
/// #[derive(Clone)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let y = field_lens!(Point => y);
/// assert_eq!(y.get(&Point { x: 1, y: 2 }), 2);
/// ```
#[macro_export]
macro_rules! field_lens {
    ($t:ty => $f:tt) => {
        $crate::RefLens::<$t, _>::new(stringify!($f), |data| &data.$f, |data| &mut data.$f)
    };
}
