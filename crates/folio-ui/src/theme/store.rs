use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::persist::ThemeFile;
use super::ThemePreference;

/// Handle returned by [`ThemeStore::subscribe`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SubscriptionId(u64);

/// Observable holder of the process-wide theme preference.
///
/// Shared as `Rc<dyn ThemeStore>` and injected into every component that
/// reads the theme; all methods take `&self`.
pub trait ThemeStore {
    fn get(&self) -> ThemePreference;

    /// Stores `pref` and notifies subscribers, even when unchanged.
    ///
    /// A `set` made from inside a listener is delivered to every subscriber
    /// once the current notification pass has finished.
    fn set(&self, pref: ThemePreference);

    fn subscribe(&self, listener: Box<dyn FnMut(ThemePreference)>) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

type Listener = Box<dyn FnMut(ThemePreference)>;

#[derive(Default)]
struct Inner {
    pref: ThemePreference,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
    file: Option<ThemeFile>,
    /// A notification pass is running; `listeners` is taken out meanwhile.
    dispatching: bool,
    /// Unsubscribed during the current pass.
    removed: Vec<SubscriptionId>,
    /// Values set by listeners, delivered after the current pass.
    pending: VecDeque<ThemePreference>,
}

/// In-memory [`ThemeStore`], optionally mirrored to a JSON file.
///
/// Clones share the same state.
#[derive(Clone, Default)]
pub struct SharedThemeStore {
    inner: Rc<RefCell<Inner>>,
}

impl SharedThemeStore {
    pub fn new(initial: ThemePreference) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner { pref: initial, ..Inner::default() })),
        }
    }

    /// Store backed by `file`: starts from its content (or `fallback` when it
    /// is missing or unreadable) and saves on every `set`.
    pub fn with_file(file: ThemeFile, fallback: ThemePreference) -> Self {
        let initial = file.load_or(fallback);
        let store = Self::new(initial);
        store.inner.borrow_mut().file = Some(file);
        store
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// One notification pass; listeners run outside the borrow so they may
    /// read, write and (un)subscribe.
    fn dispatch(&self, pref: ThemePreference) {
        let mut listeners = std::mem::take(&mut self.inner.borrow_mut().listeners);

        for (id, listener) in listeners.iter_mut() {
            if self.inner.borrow().removed.contains(id) {
                continue;
            }
            listener(pref);
        }

        let mut inner = self.inner.borrow_mut();
        // Subscriptions added by a listener land after the existing ones.
        listeners.append(&mut inner.listeners);
        let removed = std::mem::take(&mut inner.removed);
        listeners.retain(|(id, _)| !removed.contains(id));
        inner.listeners = listeners;
    }
}

impl ThemeStore for SharedThemeStore {
    fn get(&self) -> ThemePreference {
        self.inner.borrow().pref
    }

    fn set(&self, pref: ThemePreference) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.pref = pref;
            if let Some(file) = &inner.file {
                if let Err(e) = file.save(pref) {
                    log::warn!("theme: {e}");
                }
            }
            if inner.dispatching {
                inner.pending.push_back(pref);
                return;
            }
            inner.dispatching = true;
        }
        log::debug!("theme preference set to {pref}");

        let mut next = Some(pref);
        while let Some(pref) = next {
            self.dispatch(pref);
            next = self.inner.borrow_mut().pending.pop_front();
        }
        self.inner.borrow_mut().dispatching = false;
    }

    fn subscribe(&self, listener: Box<dyn FnMut(ThemePreference)>) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.inner.borrow_mut();
        inner.listeners.retain(|(sid, _)| *sid != id);
        if inner.dispatching {
            inner.removed.push(id);
        }
    }
}
