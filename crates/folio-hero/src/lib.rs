//! Cinematic hero for the resume page.
//!
//! A wireframe icosphere whose vertices are pushed along their normals by
//! layered trig noise, lit with a diffuse and a rim term and spun a little
//! every frame. [`Hero`] owns the scene between mount and unmount and talks to
//! its host only through the traits in [`host`]; [`gpu::WgpuBackend`] draws it
//! with wgpu. [`backdrop`] and [`overlay`] supply the 2D layers around it.

pub mod backdrop;
pub mod clock;
pub mod displacement;
pub mod geometry;
pub mod gpu;
pub mod hero;
pub mod host;
pub mod overlay;
pub mod projection;
pub mod props;
pub mod shading;

pub use hero::{FrameOutcome, FrameUniforms, GpuResources, Hero, HeroBackend, HeroPhase, MountOutcome};
pub use host::{
    CancellationToken, FrameLoop, FrameScheduler, HeroContainer, HostCtx, ResizeListeners,
    ResizeSource, SurfaceId, SurfaceSize,
};
pub use props::HeroProps;
