//! Seams between the hero and whatever hosts it.
//!
//! The hero never talks to a window or an event loop directly. It sees a
//! container that reports its size and can hold a rendering surface, a
//! scheduler for its repeating frame task and a source of resize
//! notifications. [`FrameLoop`] and [`ResizeListeners`] are the in-process
//! registries the site uses for the last two.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Size of a rendering surface in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// Used per axis when a container reports zero at mount.
    pub const FALLBACK: SurfaceSize = SurfaceSize { width: 800, height: 600 };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Replaces each zero axis with the matching axis of `fallback`.
    pub fn or_fallback(self, fallback: SurfaceSize) -> Self {
        Self {
            width: if self.width == 0 { fallback.width } else { self.width },
            height: if self.height == 0 { fallback.height } else { self.height },
        }
    }

    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Identifies a rendering surface attached to a container.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// A process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameTaskId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Shared flag that stops a repeating frame task. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// The element the hero draws into.
pub trait HeroContainer {
    /// Current client size; either axis may be zero before layout.
    fn client_size(&self) -> SurfaceSize;
    fn append_surface(&mut self, surface: SurfaceId);
    fn contains_surface(&self, surface: SurfaceId) -> bool;
    fn remove_surface(&mut self, surface: SurfaceId);
}

/// Runs a task once per displayed frame until its token is cancelled.
pub trait FrameScheduler {
    fn schedule_repeating(&mut self, token: CancellationToken) -> FrameTaskId;
    fn cancel(&mut self, task: FrameTaskId);
}

/// Delivers window resize notifications to registered listeners.
pub trait ResizeSource {
    fn add_listener(&mut self) -> ListenerId;
    fn remove_listener(&mut self, listener: ListenerId);
}

/// Everything the hero needs from its host at mount and unmount.
pub struct HostCtx<'a> {
    pub container: Option<&'a mut dyn HeroContainer>,
    pub frames: &'a mut dyn FrameScheduler,
    pub resize: &'a mut dyn ResizeSource,
}

#[derive(Debug)]
struct FrameTask {
    id: FrameTaskId,
    token: CancellationToken,
}

/// Registry of repeating frame tasks.
#[derive(Debug, Default)]
pub struct FrameLoop {
    tasks: Vec<FrameTask>,
    next_id: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of tasks whose token is still live, dropping cancelled ones.
    pub fn live_tasks(&mut self) -> Vec<FrameTaskId> {
        self.tasks.retain(|t| !t.token.is_cancelled());
        self.tasks.iter().map(|t| t.id).collect()
    }

    pub fn has_live(&self) -> bool {
        self.tasks.iter().any(|t| !t.token.is_cancelled())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl FrameScheduler for FrameLoop {
    fn schedule_repeating(&mut self, token: CancellationToken) -> FrameTaskId {
        self.next_id += 1;
        let id = FrameTaskId(self.next_id);
        self.tasks.push(FrameTask { id, token });
        log::debug!("frame loop: scheduled task {}", id.0);
        id
    }

    fn cancel(&mut self, task: FrameTaskId) {
        if let Some(t) = self.tasks.iter().find(|t| t.id == task) {
            t.token.cancel();
        }
        self.tasks.retain(|t| t.id != task);
    }
}

/// Registry of resize listeners.
#[derive(Debug, Default)]
pub struct ResizeListeners {
    ids: Vec<ListenerId>,
    next_id: u64,
}

impl ResizeListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ListenerId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl ResizeSource for ResizeListeners {
    fn add_listener(&mut self) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.ids.push(id);
        id
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.ids.retain(|&id| id != listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_axes_fall_back_independently() {
        let f = SurfaceSize::FALLBACK;
        assert_eq!(SurfaceSize::new(0, 0).or_fallback(f), SurfaceSize::new(800, 600));
        assert_eq!(SurfaceSize::new(1024, 0).or_fallback(f), SurfaceSize::new(1024, 600));
        assert_eq!(SurfaceSize::new(0, 300).or_fallback(f), SurfaceSize::new(800, 300));
        assert_eq!(SurfaceSize::new(5, 7).or_fallback(f), SurfaceSize::new(5, 7));
    }

    #[test]
    fn token_clones_share_state() {
        let a = CancellationToken::new();
        let b = a.clone();
        assert!(!b.is_cancelled());
        a.cancel();
        assert!(b.is_cancelled());
    }

    #[test]
    fn frame_loop_drops_cancelled_tasks() {
        let mut frames = FrameLoop::new();
        let t1 = CancellationToken::new();
        let t2 = CancellationToken::new();
        let id1 = frames.schedule_repeating(t1.clone());
        let id2 = frames.schedule_repeating(t2);
        assert_eq!(frames.live_tasks(), vec![id1, id2]);

        t1.cancel();
        assert_eq!(frames.live_tasks(), vec![id2]);

        frames.cancel(id2);
        assert!(!frames.has_live());
        assert!(frames.is_empty());
    }

    #[test]
    fn cancel_through_scheduler_flips_the_token() {
        let mut frames = FrameLoop::new();
        let token = CancellationToken::new();
        let id = frames.schedule_repeating(token.clone());
        frames.cancel(id);
        assert!(token.is_cancelled());
    }

    #[test]
    fn listeners_register_and_remove() {
        let mut listeners = ResizeListeners::new();
        let a = listeners.add_listener();
        let b = listeners.add_listener();
        assert_ne!(a, b);
        listeners.remove_listener(a);
        assert_eq!(listeners.ids(), &[b]);
        listeners.remove_listener(a);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn surface_ids_are_unique() {
        assert_ne!(SurfaceId::next(), SurfaceId::next());
    }
}
