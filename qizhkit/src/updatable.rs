//! Functional updates on value types.
use crate::error::UpdateError;
use crate::lens::Lens;
use crate::update::Update;
use crate::updater::FieldUpdater;

/// Capability adopted by value types to gain copy-and-mutate operations.
///
/// All operations take `&self` and return a new value: the receiver is never modified.
/// Fields are addressed with lenses, usually the constants generated by `#[derive(Updatable)]`
/// (e.g. `Settings::count`).
///
/// ```
/// use qizhkit::Updatable;
///
/// #[derive(Clone, Debug, Default, PartialEq, Updatable)]
/// struct Settings {
///     count: i32,
///     tags: Vec<String>,
/// }
///
/// let settings = Settings::default()
///     .updating_field(Settings::count, 5)
///     .updater(Settings::tags)
///     .modify(|tags| tags.push("a".to_string()));
///
/// assert_eq!(settings, Settings { count: 5, tags: vec!["a".to_string()] });
/// ```
pub trait Updatable: Clone {
    /// Returns a copy of this value modified by `transform`.
    fn updating(&self, transform: impl FnOnce(&mut Self)) -> Self {
        let mut copy = self.clone();
        transform(&mut copy);
        copy
    }

    /// Returns a copy of this value with the field addressed by `lens` replaced by `value`.
    fn updating_field<L, T>(&self, lens: L, value: T) -> Self
    where
        L: Lens<Self, T>,
    {
        let mut copy = self.clone();
        lens.with_mut(&mut copy, |field| *field = value);
        copy
    }

    /// Like `updating_field`, but fails instead of panicking if `lens` addresses nothing.
    fn try_updating_field<L, T>(&self, lens: L, value: T) -> Result<Self, UpdateError>
    where
        L: Lens<Self, T>,
    {
        let mut copy = self.clone();
        lens.try_with_mut(&mut copy, |field| *field = value)
            .ok_or_else(|| UpdateError::unreachable(lens.path()))?;
        Ok(copy)
    }

    /// Returns an updater for the field addressed by `lens`.
    ///
    /// Nothing is copied until one of the terminal operations of the updater is called.
    fn updater<L, T>(&self, lens: L) -> FieldUpdater<'_, Self, L, T>
    where
        L: Lens<Self, T>,
    {
        FieldUpdater::new(self, lens)
    }

    /// Returns a copy of this value with `element` appended to the collection addressed by `lens`.
    fn appending<L, C, E>(&self, lens: L, element: E) -> Self
    where
        L: Lens<Self, C>,
        C: Extend<E>,
    {
        let mut copy = self.clone();
        lens.with_mut(&mut copy, |collection| collection.extend(Some(element)));
        copy
    }

    /// Returns a copy of this value with `update` applied.
    ///
    /// On error, no value is produced.
    fn applying<U>(&self, update: &U) -> Result<Self, UpdateError>
    where
        U: Update<Self> + ?Sized,
    {
        let mut copy = self.clone();
        update.apply(&mut copy)?;
        Ok(copy)
    }

    /// Creates a blank value with `blank` and replaces one of its fields.
    fn updating_blank<L, T>(blank: impl FnOnce() -> Self, lens: L, value: T) -> Self
    where
        L: Lens<Self, T>,
    {
        let mut data = blank();
        lens.with_mut(&mut data, |field| *field = value);
        data
    }

    /// Creates a default value and replaces one of its fields.
    fn updating_default<L, T>(lens: L, value: T) -> Self
    where
        Self: Default,
        L: Lens<Self, T>,
    {
        Self::updating_blank(Self::default, lens, value)
    }
}

macro_rules! impl_updatable_simple {
    ($($t:ty),*) => {
        $(impl Updatable for $t {})*
    };
}

impl_updatable_simple!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String);

impl<T: Clone> Updatable for Vec<T> {}
impl<T: Clone> Updatable for Option<T> {}
impl<T: Clone, const N: usize> Updatable for [T; N] {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_lens;
    use crate::lens::LensIndexExt;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Window {
        title: String,
        size: (u32, u32),
        panes: Vec<String>,
    }

    impl Updatable for Window {}

    fn window() -> Window {
        Window {
            title: "main".to_string(),
            size: (800, 600),
            panes: vec!["left".to_string()],
        }
    }

    #[test]
    fn updating_runs_transform_once_on_a_copy() {
        let original = window();
        let mut calls = 0;
        let updated = original.updating(|w| {
            calls += 1;
            w.size.0 = 1024;
        });
        assert_eq!(calls, 1);
        assert_eq!(updated.size, (1024, 600));
        assert_eq!(original, window());
    }

    #[test]
    fn updating_field() {
        let original = window();
        let updated = original.updating_field(field_lens!(Window => title), "other".to_string());
        assert_eq!(updated.title, "other");
        assert_eq!(updated.size, original.size);
        assert_eq!(updated.panes, original.panes);
        assert_eq!(original, window());
    }

    #[test]
    fn appending() {
        let original = window();
        let updated = original.appending(field_lens!(Window => panes), "right".to_string());
        assert_eq!(updated.panes, vec!["left".to_string(), "right".to_string()]);
        let titled = original.appending(field_lens!(Window => title), '*');
        assert_eq!(titled.title, "main*");
        assert_eq!(original, window());
    }

    #[test]
    fn try_updating_field() {
        let original = window();
        let first_pane = field_lens!(Window => panes).index(0);
        let updated = original.try_updating_field(first_pane, "top".to_string()).unwrap();
        assert_eq!(updated.panes, vec!["top".to_string()]);

        let third_pane = field_lens!(Window => panes).index(2);
        assert_eq!(
            original.try_updating_field(third_pane, "bottom".to_string()),
            Err(UpdateError::Unreachable {
                path: third_pane.path()
            })
        );
        assert_eq!(third_pane.path().to_string(), "panes[2]");
    }

    #[test]
    fn blank_and_default() {
        let from_blank = Window::updating_blank(window, field_lens!(Window => size), (1, 1));
        assert_eq!(from_blank.title, "main");
        assert_eq!(from_blank.size, (1, 1));

        let from_default = Window::updating_default(field_lens!(Window => title), "new".to_string());
        assert_eq!(
            from_default,
            Window {
                title: "new".to_string(),
                ..Window::default()
            }
        );
    }

    #[test]
    fn foreign_types() {
        let items = vec![1, 2, 3];
        assert_eq!(items.updating(|v| v.reverse()), vec![3, 2, 1]);
        assert_eq!(5i32.updating(|n| *n += 1), 6);
        assert_eq!(Some(1).updating(|o| *o = None), None);
    }
}
