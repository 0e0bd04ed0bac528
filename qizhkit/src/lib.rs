//! Copy-and-mutate helpers for value types.
//!
//! Types opt in to [`Updatable`] (usually with `#[derive(Updatable)]`) to get functional
//! updates addressed by [lenses](Lens): `value.updating_field(Type::field, x)`,
//! `value.updater(Type::field).modify(|f| ...)`, and so on. A [`State`] can own such a
//! value, record edits made to it and notify watchers.

mod error;
pub mod lens;
mod path;
mod state;
pub mod update;
mod updatable;
mod updater;

pub use crate::{
    error::UpdateError,
    lens::{lens, FnLens, IdentityLens, Lens, LensCompose, LensExt, LensIndexExt, RefLens, VecLens},
    path::{FieldPath, PathSegment},
    state::{Revision, RevisionNumber, State, Watcher, DEFAULT_HISTORY_LIMIT},
    update::Update,
    updatable::Updatable,
    updater::FieldUpdater,
};
#[cfg(feature = "derive")]
pub use qizhkit_macros::Updatable;
