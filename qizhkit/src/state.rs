//! # State
//! A store that owns a value and records the edits made to it.
//!
//! Every effective edit produces a new _revision_, identified by a _revision number_. Only the
//! latest revision is available. It is possible to return to the value of a previous revision with
//! undo operations. Undoing does not remove revisions: instead, it creates new revisions that
//! revert the changes (like git revert).
//!
//! Watchers are notified of every new revision, along with the path of the part of the value
//! that has changed.
use crate::error::UpdateError;
use crate::lens::Lens;
use crate::path::FieldPath;
use crate::update::{Append, Replace, Update};
use crate::updatable::Updatable;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

/// Default number of revisions that can be undone.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Revision numbers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RevisionNumber(pub u64);

impl fmt::Display for RevisionNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A revision of the value in a state, as seen by watchers.
#[derive(Debug)]
pub struct Revision<'a, M> {
    pub number: RevisionNumber,
    /// Part of the value that changed since the previous revision.
    pub path: FieldPath,
    pub data: &'a M,
}

/// A view over a state.
pub trait Watcher<M> {
    /// Called by the state when something has changed.
    fn on_change(&self, revision: &Revision<M>);
}

struct WatcherEntry<M> {
    filter: FieldPath,
    watcher: Weak<dyn Watcher<M>>,
}

/// Snapshot of the value before an edit.
struct HistoryEntry<M> {
    data: M,
    path: FieldPath,
}

/// Wrapper for a value that keeps track of changes in the value.
pub struct State<M: Updatable + PartialEq> {
    data: RefCell<M>,
    revision: Cell<RevisionNumber>,
    undo_stack: RefCell<VecDeque<HistoryEntry<M>>>,
    redo_stack: RefCell<Vec<HistoryEntry<M>>>,
    history_limit: usize,
    watchers: RefCell<Vec<WatcherEntry<M>>>,
    /// Set while an edit is applied or watchers are notified.
    busy: Cell<bool>,
}

/// Marks a state busy until dropped, restoring the previous flag even on unwind.
struct BusyGuard<'a> {
    busy: &'a Cell<bool>,
    previous: bool,
}

impl<'a> BusyGuard<'a> {
    fn new(busy: &'a Cell<bool>) -> BusyGuard<'a> {
        let previous = busy.replace(true);
        BusyGuard { busy, previous }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.set(self.previous);
    }
}

impl<M: Updatable + PartialEq> State<M> {
    /// Creates a new state wrapping an existing value.
    pub fn new(data: M) -> State<M> {
        State {
            data: RefCell::new(data),
            revision: Cell::new(RevisionNumber(0)),
            undo_stack: RefCell::new(VecDeque::new()),
            redo_stack: RefCell::new(Vec::new()),
            history_limit: DEFAULT_HISTORY_LIMIT,
            watchers: RefCell::new(Vec::new()),
            busy: Cell::new(false),
        }
    }

    /// Sets the maximum number of revisions that can be undone. Zero disables undo.
    pub fn with_history_limit(mut self, limit: usize) -> State<M> {
        self.history_limit = limit;
        let undo_stack = self.undo_stack.get_mut();
        while undo_stack.len() > limit {
            undo_stack.pop_front();
        }
        self
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Returns the current revision number.
    pub fn revision(&self) -> RevisionNumber {
        self.revision.get()
    }

    pub fn with<R, F: FnOnce(&M) -> R>(&self, f: F) -> R {
        let data = self.data.borrow();
        f(&*data)
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> M {
        self.data.borrow().clone()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.borrow().is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.borrow().is_empty()
    }

    /// Applies an edit to the value.
    ///
    /// Returns the number of the new revision, or `None` if the edit left the value unchanged
    /// (in which case no revision is created and watchers are not notified).
    pub fn update(&self, u: impl Update<M>) -> Result<Option<RevisionNumber>, UpdateError> {
        self.check_reentrancy()?;
        let path = u.path();
        let updated = {
            let _busy = BusyGuard::new(&self.busy);
            self.data.borrow().applying(&u)?
        };
        Ok(self.commit(updated, path))
    }

    /// Replaces the target of `lens`.
    pub fn set<T, K>(&self, lens: K, value: T) -> Result<Option<RevisionNumber>, UpdateError>
    where
        T: Clone,
        K: Lens<M, T>,
    {
        self.update(Replace::new(lens, value))
    }

    /// Appends an element to the vector targeted by `lens`.
    pub fn append<A, K>(&self, lens: K, element: A) -> Result<Option<RevisionNumber>, UpdateError>
    where
        A: Clone,
        K: Lens<M, Vec<A>>,
    {
        self.update(Append::new(lens, element))
    }

    /// Modifies the whole value with a closure.
    pub fn modify(&self, f: impl FnOnce(&mut M)) -> Result<Option<RevisionNumber>, UpdateError> {
        self.check_reentrancy()?;
        let updated = {
            let _busy = BusyGuard::new(&self.busy);
            self.data.borrow().updating(f)
        };
        Ok(self.commit(updated, FieldPath::root()))
    }

    /// Reverts the last edit. Returns the number of the new revision, or `None` if there was
    /// nothing to undo.
    ///
    /// The new revision is reported to watchers with the root path.
    pub fn undo(&self) -> Result<Option<RevisionNumber>, UpdateError> {
        self.check_reentrancy()?;
        let Some(entry) = self.undo_stack.borrow_mut().pop_back() else {
            return Ok(None);
        };
        let current = self.data.replace(entry.data);
        self.redo_stack.borrow_mut().push(HistoryEntry {
            data: current,
            path: entry.path.clone(),
        });
        let number = self.next_revision();
        debug!("undo `{}` -> {}", entry.path, number);
        self.notify(number, FieldPath::root());
        Ok(Some(number))
    }

    /// Re-applies the last undone edit.
    pub fn redo(&self) -> Result<Option<RevisionNumber>, UpdateError> {
        self.check_reentrancy()?;
        let Some(entry) = self.redo_stack.borrow_mut().pop() else {
            return Ok(None);
        };
        let current = self.data.replace(entry.data);
        self.push_undo(HistoryEntry {
            data: current,
            path: entry.path.clone(),
        });
        let number = self.next_revision();
        debug!("redo `{}` -> {}", entry.path, number);
        self.notify(number, FieldPath::root());
        Ok(Some(number))
    }

    /// Adds a watcher that will be called back immediately and whenever the state changes.
    pub fn add_watcher<W: Watcher<M> + 'static>(&self, w: &Rc<W>) {
        self.watch(FieldPath::root(), w)
    }

    /// Adds a watcher that will be called back immediately, and whenever a part of the value
    /// overlapping with `path` changes.
    pub fn watch<W: Watcher<M> + 'static>(&self, path: FieldPath, w: &Rc<W>) {
        {
            let _busy = BusyGuard::new(&self.busy);
            let data = self.data.borrow();
            w.on_change(&Revision {
                number: self.revision.get(),
                path: FieldPath::root(),
                data: &*data,
            });
        }
        let w: Rc<dyn Watcher<M>> = w.clone();
        self.watchers.borrow_mut().push(WatcherEntry {
            filter: path,
            watcher: Rc::downgrade(&w),
        })
    }

    fn check_reentrancy(&self) -> Result<(), UpdateError> {
        if self.busy.get() {
            warn!("state update rejected: an update or notification is in progress");
            return Err(UpdateError::Reentrant);
        }
        Ok(())
    }

    fn next_revision(&self) -> RevisionNumber {
        let number = RevisionNumber(self.revision.get().0 + 1);
        self.revision.set(number);
        number
    }

    fn push_undo(&self, entry: HistoryEntry<M>) {
        if self.history_limit == 0 {
            return;
        }
        let mut undo_stack = self.undo_stack.borrow_mut();
        if undo_stack.len() == self.history_limit {
            undo_stack.pop_front();
        }
        undo_stack.push_back(entry);
    }

    fn commit(&self, updated: M, path: FieldPath) -> Option<RevisionNumber> {
        if *self.data.borrow() == updated {
            debug!("update of `{}` had no effect", path);
            return None;
        }
        let previous = self.data.replace(updated);
        self.push_undo(HistoryEntry {
            data: previous,
            path: path.clone(),
        });
        self.redo_stack.borrow_mut().clear();
        let number = self.next_revision();
        trace!("state update `{}` -> {}", path, number);
        self.notify(number, path);
        Some(number)
    }

    fn notify(&self, number: RevisionNumber, path: FieldPath) {
        // drop expired watchers and collect the live ones before calling them, so that watchers
        // may add other watchers
        let watchers: Vec<_> = {
            let mut entries = self.watchers.borrow_mut();
            entries.retain(|entry| entry.watcher.strong_count() > 0);
            entries
                .iter()
                .filter(|entry| entry.filter.overlaps(&path))
                .filter_map(|entry| entry.watcher.upgrade())
                .collect()
        };

        let _busy = BusyGuard::new(&self.busy);
        let data = self.data.borrow();
        let revision = Revision {
            number,
            path,
            data: &*data,
        };
        for w in watchers {
            w.on_change(&revision);
        }
    }
}

impl<M: Updatable + PartialEq + fmt::Debug> fmt::Debug for State<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("State")
            .field("data", &*self.data.borrow())
            .field("revision", &self.revision.get())
            .field("undo", &self.undo_stack.borrow().len())
            .field("redo", &self.redo_stack.borrow().len())
            .field("watchers", &self.watchers.borrow().len())
            .finish_non_exhaustive()
    }
}
