//! Cameras map view-plane points to primary rays.

use crate::{renderer, RenderConfig, World};
use lumen_core::CameraDesc;
use lumen_math::{approx_eq, Point2, Ray, Vec3};

/// Capabilities shared by all cameras.
pub trait CameraModel {
    /// Position every primary ray starts from.
    fn eye(&self) -> Vec3;

    /// Unit direction through the view-plane point `p`, in pixel units
    /// relative to the image centre.
    fn ray_direction(&self, p: Point2) -> Vec3;

    /// Primary ray through the view-plane point `p`.
    fn primary_ray(&self, p: Point2) -> Ray {
        Ray::new(self.eye(), self.ray_direction(p))
    }
}

/// Orthonormal camera frame built from an eye, a look-at point and an up
/// vector. `w` points from the look-at point back towards the eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 500.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        }
    }
}

impl CameraFrame {
    /// Rebuild `u`, `v`, `w` from the eye, look-at point and up vector.
    ///
    /// Looking straight up or down makes `up x w` vanish, so those two
    /// cases get fixed frames. Any other degenerate setup keeps the previous
    /// frame.
    pub fn compute_uvw(&mut self) {
        let vertical = approx_eq(self.eye.x, self.look_at.x) && approx_eq(self.eye.z, self.look_at.z);

        if vertical && self.eye.y > self.look_at.y {
            // Looking down
            self.u = Vec3::Z;
            self.v = Vec3::X;
            self.w = Vec3::Y;
            return;
        }
        if vertical && self.eye.y < self.look_at.y {
            // Looking up
            self.u = Vec3::X;
            self.v = Vec3::Z;
            self.w = -Vec3::Y;
            return;
        }

        let w = (self.eye - self.look_at).normalize_or_zero();
        let u = self.up.cross(w).normalize_or_zero();
        if w == Vec3::ZERO || u == Vec3::ZERO {
            log::warn!(
                "Degenerate camera frame (eye {:?}, look_at {:?}, up {:?}); keeping previous basis",
                self.eye,
                self.look_at,
                self.up
            );
            return;
        }

        self.w = w;
        self.u = u;
        self.v = w.cross(u);
    }
}

/// A pinhole camera: every ray passes through the eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pinhole {
    frame: CameraFrame,
    /// Distance from the eye to the view plane
    distance: f32,
    zoom: f32,
}

impl Default for Pinhole {
    fn default() -> Self {
        Self {
            frame: CameraFrame::default(),
            distance: 750.0,
            zoom: 1.0,
        }
    }
}

impl Pinhole {
    /// Create a pinhole camera with the default frame and view distance.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_eye(&mut self, eye: Vec3) {
        self.frame.eye = eye;
    }

    pub fn set_look_at(&mut self, look_at: Vec3) {
        self.frame.look_at = look_at;
    }

    pub fn set_up_vector(&mut self, up: Vec3) {
        self.frame.up = up;
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    /// Rebuild the camera frame. Call after changing eye, look-at or up.
    pub fn compute_uvw(&mut self) {
        self.frame.compute_uvw();
    }

    pub fn frame(&self) -> &CameraFrame {
        &self.frame
    }
}

impl CameraModel for Pinhole {
    fn eye(&self) -> Vec3 {
        self.frame.eye
    }

    fn ray_direction(&self, p: Point2) -> Vec3 {
        let frame = &self.frame;
        let dir = p.x * frame.u + p.y * frame.v - (self.distance * self.zoom) * frame.w;
        dir.normalize()
    }
}

/// Every kind of camera the renderer supports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Camera {
    Pinhole(Pinhole),
}

impl Camera {
    /// Build a camera from its description, with its frame computed.
    pub fn from_description(desc: &CameraDesc) -> Self {
        match *desc {
            CameraDesc::Pinhole {
                eye,
                look_at,
                up,
                distance,
                zoom,
            } => {
                let mut pinhole = Pinhole::new();
                pinhole.set_eye(Vec3::from(eye));
                pinhole.set_look_at(Vec3::from(look_at));
                pinhole.set_up_vector(Vec3::from(up));
                pinhole.set_distance(distance);
                pinhole.set_zoom(zoom);
                pinhole.compute_uvw();
                Camera::Pinhole(pinhole)
            }
        }
    }

    /// Render `world` through this camera into `world.image`.
    pub fn render_scene(&self, world: &mut World, config: &RenderConfig) {
        renderer::render_scene(self, world, config);
    }
}

impl CameraModel for Camera {
    fn eye(&self) -> Vec3 {
        match self {
            Camera::Pinhole(pinhole) => pinhole.eye(),
        }
    }

    fn ray_direction(&self, p: Point2) -> Vec3 {
        match self {
            Camera::Pinhole(pinhole) => pinhole.ray_direction(p),
        }
    }
}

impl From<Pinhole> for Camera {
    fn from(pinhole: Pinhole) -> Self {
        Camera::Pinhole(pinhole)
    }
}
