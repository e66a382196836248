//! Lifecycle of the hero scene: mount, per-frame update, resize, teardown.

use std::time::{Duration, Instant};

use glam::Mat4;

use crate::clock::ElapsedClock;
use crate::displacement::DisplacementParams;
use crate::geometry::{HERO_DETAIL, HERO_RADIUS, IcosphereMesh};
use crate::host::{
    CancellationToken, FrameTaskId, HeroContainer, HostCtx, ListenerId, SurfaceId, SurfaceSize,
};
use crate::projection::{MeshTransform, Projection, view_matrix};
use crate::props::HeroProps;

/// Per-frame inputs of the wireframe pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameUniforms {
    /// `projection * view`.
    pub view_proj: Mat4,
    pub model: Mat4,
    /// Elapsed seconds since mount.
    pub time: f32,
    pub displacement: DisplacementParams,
}

/// GPU objects owned by a mounted hero: surface, mesh buffers, shader program.
pub trait GpuResources {
    fn surface_id(&self) -> SurfaceId;
    fn set_surface_size(&mut self, size: SurfaceSize);
    /// Frees everything. Called exactly once per allocation.
    fn release(self);
}

/// Creates and draws hero resources.
pub trait HeroBackend {
    type Resources: GpuResources;

    fn allocate(&mut self, mesh: &IcosphereMesh, size: SurfaceSize) -> Self::Resources;
    fn draw(&mut self, resources: &mut Self::Resources, uniforms: &FrameUniforms);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HeroPhase {
    Uninitialized,
    Running,
    TornDown,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    Mounted,
    /// No container was supplied; nothing was created.
    NoContainer,
    /// The hero was already mounted or torn down.
    Ignored,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    Skipped,
}

struct Running<R> {
    resources: R,
    surface: SurfaceId,
    mount_size: SurfaceSize,
    size: SurfaceSize,
    projection: Projection,
    transform: MeshTransform,
    clock: ElapsedClock,
    token: CancellationToken,
    task: FrameTaskId,
    listener: ListenerId,
}

enum State<R> {
    Uninitialized,
    Running(Box<Running<R>>),
    TornDown,
}

/// The cinematic hero.
///
/// Scene state and GPU resources exist only between [`mount`](Self::mount)
/// and [`unmount`](Self::unmount). Dropping a running hero cancels its frame
/// task and releases its resources; the host should still call `unmount` so
/// the listener and surface are detached.
pub struct Hero<R: GpuResources> {
    props: HeroProps,
    displacement: DisplacementParams,
    detail: u32,
    state: State<R>,
}

impl<R: GpuResources> Hero<R> {
    pub fn new(props: HeroProps) -> Self {
        Self {
            props,
            displacement: DisplacementParams::default(),
            detail: HERO_DETAIL,
            state: State::Uninitialized,
        }
    }

    /// Overrides the sphere subdivision level used at mount.
    pub fn with_detail(mut self, detail: u32) -> Self {
        self.detail = detail;
        self
    }

    pub fn props(&self) -> &HeroProps {
        &self.props
    }

    pub fn phase(&self) -> HeroPhase {
        match self.state {
            State::Uninitialized => HeroPhase::Uninitialized,
            State::Running(_) => HeroPhase::Running,
            State::TornDown => HeroPhase::TornDown,
        }
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.running().map(|r| &r.projection)
    }

    pub fn transform(&self) -> Option<&MeshTransform> {
        self.running().map(|r| &r.transform)
    }

    pub fn surface_size(&self) -> Option<SurfaceSize> {
        self.running().map(|r| r.size)
    }

    pub fn surface_id(&self) -> Option<SurfaceId> {
        self.running().map(|r| r.surface)
    }

    /// Last elapsed time handed to the shader.
    pub fn elapsed(&self) -> Option<Duration> {
        self.running().map(|r| r.clock.last())
    }

    /// Token of the running frame task; a clone of it is held by the scheduler.
    pub fn frame_token(&self) -> Option<&CancellationToken> {
        self.running().map(|r| &r.token)
    }

    fn running(&self) -> Option<&Running<R>> {
        match &self.state {
            State::Running(r) => Some(r),
            _ => None,
        }
    }

    /// Attaches a surface to the container and starts the frame task.
    pub fn mount<B>(&mut self, host: HostCtx<'_>, backend: &mut B, now: Instant) -> MountOutcome
    where
        B: HeroBackend<Resources = R>,
    {
        if !matches!(self.state, State::Uninitialized) {
            return MountOutcome::Ignored;
        }
        let Some(container) = host.container else {
            log::debug!("hero: no container, skipping mount");
            return MountOutcome::NoContainer;
        };

        let reported = container.client_size();
        let size = reported.or_fallback(SurfaceSize::FALLBACK);
        if size != reported {
            log::debug!(
                "hero: container reported {}x{}, using {}x{}",
                reported.width,
                reported.height,
                size.width,
                size.height
            );
        }

        let projection = Projection::new(size.aspect());
        let mesh = IcosphereMesh::build(HERO_RADIUS, self.detail);
        let resources = backend.allocate(&mesh, size);
        let surface = resources.surface_id();
        container.append_surface(surface);

        let listener = host.resize.add_listener();
        let token = CancellationToken::new();
        let task = host.frames.schedule_repeating(token.clone());

        log::debug!(
            "hero: mounted {}x{} ({} vertices, {} lines)",
            size.width,
            size.height,
            mesh.vertices.len(),
            mesh.line_count()
        );

        self.state = State::Running(Box::new(Running {
            resources,
            surface,
            mount_size: size,
            size,
            projection,
            transform: MeshTransform::default(),
            clock: ElapsedClock::start(now),
            token,
            task,
            listener,
        }));
        MountOutcome::Mounted
    }

    /// Advances time and rotation and draws one frame.
    pub fn frame<B>(&mut self, backend: &mut B, now: Instant) -> FrameOutcome
    where
        B: HeroBackend<Resources = R>,
    {
        let State::Running(run) = &mut self.state else {
            return FrameOutcome::Skipped;
        };
        if run.token.is_cancelled() {
            return FrameOutcome::Skipped;
        }

        let time = run.clock.elapsed_secs(now);
        run.transform.advance();

        let uniforms = FrameUniforms {
            view_proj: run.projection.matrix() * view_matrix(),
            model: run.transform.matrix(),
            time,
            displacement: self.displacement,
        };
        backend.draw(&mut run.resources, &uniforms);
        FrameOutcome::Rendered
    }

    /// Re-reads the container size and updates surface and aspect.
    /// Zero axes keep the size captured at mount.
    pub fn resize(&mut self, container: &dyn HeroContainer) -> Option<SurfaceSize> {
        let State::Running(run) = &mut self.state else {
            return None;
        };
        let size = container.client_size().or_fallback(run.mount_size);
        run.resources.set_surface_size(size);
        run.projection.set_aspect(size.aspect());
        run.size = size;
        Some(size)
    }

    /// Stops the frame task, detaches and releases everything. Safe to call
    /// more than once.
    pub fn unmount(&mut self, host: HostCtx<'_>) {
        match std::mem::replace(&mut self.state, State::TornDown) {
            State::Running(run) => {
                let run = *run;
                run.token.cancel();
                host.frames.cancel(run.task);
                host.resize.remove_listener(run.listener);
                if let Some(container) = host.container {
                    if container.contains_surface(run.surface) {
                        container.remove_surface(run.surface);
                    }
                }
                run.resources.release();
                log::debug!("hero: unmounted");
            }
            State::Uninitialized | State::TornDown => {}
        }
    }
}

impl<R: GpuResources> Drop for Hero<R> {
    fn drop(&mut self) {
        if let State::Running(run) = std::mem::replace(&mut self.state, State::TornDown) {
            let run = *run;
            run.token.cancel();
            run.resources.release();
            log::debug!("hero: dropped while running, resources released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FrameLoop, ResizeListeners};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct SpyContainer {
        size: SurfaceSize,
        surfaces: Vec<SurfaceId>,
        removed: usize,
    }

    impl SpyContainer {
        fn sized(width: u32, height: u32) -> Self {
            Self { size: SurfaceSize::new(width, height), ..Self::default() }
        }
    }

    impl HeroContainer for SpyContainer {
        fn client_size(&self) -> SurfaceSize {
            self.size
        }

        fn append_surface(&mut self, surface: SurfaceId) {
            self.surfaces.push(surface);
        }

        fn contains_surface(&self, surface: SurfaceId) -> bool {
            self.surfaces.contains(&surface)
        }

        fn remove_surface(&mut self, surface: SurfaceId) {
            self.removed += 1;
            self.surfaces.retain(|&s| s != surface);
        }
    }

    #[derive(Default, Clone)]
    struct Counters {
        allocated: Rc<Cell<usize>>,
        released: Rc<Cell<usize>>,
        last_size: Rc<Cell<Option<SurfaceSize>>>,
    }

    struct SpyResources {
        id: SurfaceId,
        counters: Counters,
    }

    impl GpuResources for SpyResources {
        fn surface_id(&self) -> SurfaceId {
            self.id
        }

        fn set_surface_size(&mut self, size: SurfaceSize) {
            self.counters.last_size.set(Some(size));
        }

        fn release(self) {
            self.counters.released.set(self.counters.released.get() + 1);
        }
    }

    #[derive(Default)]
    struct SpyBackend {
        counters: Counters,
        draws: Vec<FrameUniforms>,
    }

    impl HeroBackend for SpyBackend {
        type Resources = SpyResources;

        fn allocate(&mut self, _mesh: &IcosphereMesh, size: SurfaceSize) -> SpyResources {
            self.counters.allocated.set(self.counters.allocated.get() + 1);
            self.counters.last_size.set(Some(size));
            SpyResources { id: SurfaceId::next(), counters: self.counters.clone() }
        }

        fn draw(&mut self, _resources: &mut SpyResources, uniforms: &FrameUniforms) {
            self.draws.push(*uniforms);
        }
    }

    struct Host {
        container: SpyContainer,
        frames: FrameLoop,
        resize: ResizeListeners,
    }

    impl Host {
        fn new(width: u32, height: u32) -> Self {
            Self {
                container: SpyContainer::sized(width, height),
                frames: FrameLoop::new(),
                resize: ResizeListeners::new(),
            }
        }

        fn ctx(&mut self) -> HostCtx<'_> {
            HostCtx {
                container: Some(&mut self.container),
                frames: &mut self.frames,
                resize: &mut self.resize,
            }
        }

        fn ctx_without_container(&mut self) -> HostCtx<'_> {
            HostCtx { container: None, frames: &mut self.frames, resize: &mut self.resize }
        }
    }

    fn hero() -> Hero<SpyResources> {
        Hero::new(HeroProps::default()).with_detail(1)
    }

    #[test]
    fn mount_then_unmount_is_resource_neutral() {
        let mut host = Host::new(1280, 720);
        let mut backend = SpyBackend::default();
        let mut hero = hero();

        assert_eq!(hero.mount(host.ctx(), &mut backend, Instant::now()), MountOutcome::Mounted);
        assert_eq!(hero.phase(), HeroPhase::Running);
        assert!(host.frames.has_live());
        assert_eq!(host.resize.len(), 1);
        assert_eq!(host.container.surfaces.len(), 1);

        hero.unmount(host.ctx());
        assert_eq!(hero.phase(), HeroPhase::TornDown);
        assert!(!host.frames.has_live());
        assert!(host.resize.is_empty());
        assert!(host.container.surfaces.is_empty());
        assert_eq!(backend.counters.allocated.get(), 1);
        assert_eq!(backend.counters.released.get(), 1);
    }

    #[test]
    fn zero_size_container_gets_fallback_surface() {
        let mut host = Host::new(0, 0);
        let mut backend = SpyBackend::default();
        let mut hero = hero();
        hero.mount(host.ctx(), &mut backend, Instant::now());

        assert_eq!(hero.surface_size(), Some(SurfaceSize::new(800, 600)));
        assert_eq!(backend.counters.last_size.get(), Some(SurfaceSize::new(800, 600)));
        let aspect = hero.projection().map(|p| p.aspect);
        assert_eq!(aspect, Some(800.0 / 600.0));
    }

    #[test]
    fn missing_container_does_nothing() {
        let mut host = Host::new(640, 480);
        let mut backend = SpyBackend::default();
        let mut hero = hero();

        let outcome = hero.mount(host.ctx_without_container(), &mut backend, Instant::now());
        assert_eq!(outcome, MountOutcome::NoContainer);
        assert_eq!(hero.phase(), HeroPhase::Uninitialized);
        assert!(host.frames.is_empty());
        assert!(host.resize.is_empty());
        assert_eq!(backend.counters.allocated.get(), 0);
    }

    #[test]
    fn resize_updates_aspect_without_restarting_clock() {
        let mut host = Host::new(800, 600);
        let mut backend = SpyBackend::default();
        let mut hero = hero();
        let t0 = Instant::now();
        hero.mount(host.ctx(), &mut backend, t0);
        hero.frame(&mut backend, t0 + Duration::from_secs(2));

        host.container.size = SurfaceSize::new(1600, 400);
        assert_eq!(hero.resize(&host.container), Some(SurfaceSize::new(1600, 400)));
        assert_eq!(hero.projection().map(|p| p.aspect), Some(4.0));
        assert_eq!(backend.counters.last_size.get(), Some(SurfaceSize::new(1600, 400)));
        assert_eq!(hero.phase(), HeroPhase::Running);
        assert_eq!(hero.elapsed(), Some(Duration::from_secs(2)));

        hero.frame(&mut backend, t0 + Duration::from_secs(3));
        assert_eq!(backend.draws.last().map(|u| u.time), Some(3.0));
    }

    #[test]
    fn resize_with_zero_axis_keeps_mount_size() {
        let mut host = Host::new(1000, 500);
        let mut backend = SpyBackend::default();
        let mut hero = hero();
        hero.mount(host.ctx(), &mut backend, Instant::now());

        host.container.size = SurfaceSize::new(0, 250);
        assert_eq!(hero.resize(&host.container), Some(SurfaceSize::new(1000, 250)));
    }

    #[test]
    fn each_frame_spins_by_fixed_amounts() {
        let mut host = Host::new(800, 600);
        let mut backend = SpyBackend::default();
        let mut hero = hero();
        let t0 = Instant::now();
        hero.mount(host.ctx(), &mut backend, t0);

        let mut prev = hero.transform().copied().map(|t| t.rotation);
        for i in 1..=5u64 {
            assert_eq!(
                hero.frame(&mut backend, t0 + Duration::from_millis(16 * i)),
                FrameOutcome::Rendered
            );
            let rot = hero.transform().map(|t| t.rotation);
            if let (Some(before), Some(after)) = (prev, rot) {
                assert!((after.y - before.y - 0.0025).abs() < 1e-6);
                assert!((after.x - before.x - 0.0012).abs() < 1e-6);
            }
            prev = rot;
        }
        let times: Vec<f32> = backend.draws.iter().map(|u| u.time).collect();
        assert!(times.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn unmount_twice_releases_once() {
        let mut host = Host::new(800, 600);
        let mut backend = SpyBackend::default();
        let mut hero = hero();
        hero.mount(host.ctx(), &mut backend, Instant::now());

        hero.unmount(host.ctx());
        hero.unmount(host.ctx());
        drop(hero);
        assert_eq!(backend.counters.released.get(), 1);
        assert_eq!(host.container.removed, 1);
    }

    #[test]
    fn frame_after_unmount_is_a_no_op() {
        let mut host = Host::new(800, 600);
        let mut backend = SpyBackend::default();
        let mut hero = hero();
        let t0 = Instant::now();
        hero.mount(host.ctx(), &mut backend, t0);
        hero.unmount(host.ctx());

        assert_eq!(hero.frame(&mut backend, t0 + Duration::from_secs(1)), FrameOutcome::Skipped);
        assert!(backend.draws.is_empty());
        assert_eq!(hero.resize(&host.container), None);
    }

    #[test]
    fn cancelled_token_skips_pending_frame() {
        let mut host = Host::new(800, 600);
        let mut backend = SpyBackend::default();
        let mut hero = hero();
        hero.mount(host.ctx(), &mut backend, Instant::now());

        if let Some(token) = hero.frame_token() {
            token.cancel();
        }
        assert_eq!(hero.frame(&mut backend, Instant::now()), FrameOutcome::Skipped);
    }

    #[test]
    fn container_that_dropped_the_surface_is_not_detached() {
        let mut host = Host::new(800, 600);
        let mut backend = SpyBackend::default();
        let mut hero = hero();
        hero.mount(host.ctx(), &mut backend, Instant::now());

        host.container.surfaces.clear();
        hero.unmount(host.ctx());
        assert_eq!(host.container.removed, 0);
        assert_eq!(backend.counters.released.get(), 1);
    }

    #[test]
    fn unmount_before_mount_tears_down_without_side_effects() {
        let mut host = Host::new(800, 600);
        let mut backend = SpyBackend::default();
        let mut hero = hero();
        hero.unmount(host.ctx());
        assert_eq!(hero.phase(), HeroPhase::TornDown);
        assert_eq!(hero.mount(host.ctx(), &mut backend, Instant::now()), MountOutcome::Ignored);
        assert_eq!(backend.counters.allocated.get(), 0);
    }

    #[test]
    fn drop_while_running_releases() {
        let mut host = Host::new(800, 600);
        let mut backend = SpyBackend::default();
        let mut hero = hero();
        hero.mount(host.ctx(), &mut backend, Instant::now());
        drop(hero);
        assert_eq!(backend.counters.released.get(), 1);
        assert!(!host.frames.has_live());
    }

    #[test]
    fn uniforms_place_mesh_with_camera() {
        let mut host = Host::new(800, 600);
        let mut backend = SpyBackend::default();
        let mut hero = hero();
        let t0 = Instant::now();
        hero.mount(host.ctx(), &mut backend, t0);
        hero.frame(&mut backend, t0);

        let u = backend.draws[0];
        let expected = Projection::new(800.0 / 600.0).matrix() * view_matrix();
        assert!(u.view_proj.abs_diff_eq(expected, 1e-6));
        assert_eq!(u.model.w_axis.x, 0.6);
        assert_eq!(u.time, 0.0);
    }
}
