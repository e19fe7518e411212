use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector2, Vector3};

use super::controller::{KEY_SPEED_DONE, KEY_SPEED_FOCUS};
use crate::config::CameraConfig;

const KEY_CAMERA_MOVE_UP: Key = Key::W;
const KEY_CAMERA_MOVE_DOWN: Key = Key::S;
const KEY_CAMERA_MOVE_LEFT: Key = Key::A;
const KEY_CAMERA_MOVE_RIGHT: Key = Key::D;
const KEY_CAMERA_ZOOM_IN: Key = Key::Equals;
const KEY_CAMERA_ZOOM_OUT: Key = Key::Minus;

const KEY_ANGLE_STEP: f32 = 0.1;
const KEY_ZOOM_STEP: f32 = 1.2;

// Click-and-drag orbit camera. Left drag changes pitch and yaw around the
// target, right drag slides the target around, and scrolling zooms. The
// distance to the target is clamped between the configured limits, and y is
// always up.
pub struct OrbitCamera {
    // -- position --
    theta: f32,  // azimuthal angle, measured from +z towards +x
    phi: f32,    // polar angle, measured from +y
    radius: f32, // distance from target
    target: Point3<f32>,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
    // -- other --
    last_cursor_pos: Vector2<f32>,
    keys_enabled: bool,
    // -- knobs to fiddle with --
    theta_step: f32,
    phi_step: f32,
    pan_step: f32,
    scroll_ratio: f32,
    phi_limit: f32,
    radius_limits: (f32, f32),
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        let [x, y, z] = config.start_position;
        let eye = Vector3::new(x, y, z);
        let radius = eye.norm();
        let (theta, phi) = if radius > 0.0 {
            (x.atan2(z), (y / radius).acos())
        } else {
            (0.0, PI / 2.0)
        };

        let mut camera = OrbitCamera {
            theta,
            phi,
            radius,
            target: Point3::origin(),
            width,
            height,
            fovy: config.fov_degrees.to_radians(),
            znear: config.near,
            zfar: config.far,
            last_cursor_pos: Vector2::zeros(),
            keys_enabled: true,
            theta_step: 0.005,
            phi_step: 0.005,
            pan_step: 0.001,
            scroll_ratio: 1.1,
            phi_limit: 0.001,
            radius_limits: (config.min_distance, config.max_distance),
        };
        // Clamp everything into range the same way user input would
        camera.rotate(0.0, 0.0);
        camera.zoom(1.0);
        camera
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(self.aspect(), self.fovy, self.znear, self.zfar)
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    /// Turn off keyboard controls, e.g. while the user is typing somewhere.
    pub fn set_keys_enabled(&mut self, enabled: bool) {
        self.keys_enabled = enabled;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        self.theta = (self.theta + dtheta) % (2.0 * PI);
        self.phi = nalgebra::clamp(self.phi + dphi, self.phi_limit, PI - self.phi_limit);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.radius = nalgebra::clamp(
            self.radius * factor,
            self.radius_limits.0,
            self.radius_limits.1,
        );
    }

    /// Slides the target within the view plane. `dx` and `dy` are in
    /// screen-sized units, scaled by the distance to the target.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let inverse_view = self.view_transform().inverse();
        let right = inverse_view.transform_vector(&Vector3::x());
        let up = inverse_view.transform_vector(&Vector3::y());
        let scale = self.radius * self.pan_step;
        self.target += (-dx * right + dy * up) * scale;
    }

    // Events reach the camera before the controller, so the speed input's
    // focus keys are tracked here as well.
    fn handle_key(&mut self, key: Key) {
        match key {
            KEY_SPEED_FOCUS => self.keys_enabled = !self.keys_enabled,
            KEY_SPEED_DONE => self.keys_enabled = true,
            _ if !self.keys_enabled => {}
            KEY_CAMERA_MOVE_UP => self.rotate(0.0, -KEY_ANGLE_STEP),
            KEY_CAMERA_MOVE_DOWN => self.rotate(0.0, KEY_ANGLE_STEP),
            KEY_CAMERA_MOVE_LEFT => self.rotate(-KEY_ANGLE_STEP, 0.0),
            KEY_CAMERA_MOVE_RIGHT => self.rotate(KEY_ANGLE_STEP, 0.0),
            KEY_CAMERA_ZOOM_IN => self.zoom(KEY_ZOOM_STEP.recip()),
            KEY_CAMERA_ZOOM_OUT => self.zoom(KEY_ZOOM_STEP),
            _ => {}
        }
    }
}

impl Camera for OrbitCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);
                let dpos = curr_pos - self.last_cursor_pos;

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    // Rotate the opposite direction as the mouse moves (drag right == camera glides
                    // left)
                    self.rotate(-dpos.x * self.theta_step, -dpos.y * self.phi_step);
                } else if canvas.get_mouse_button(MouseButton::Button2) == Action::Press {
                    self.pan(dpos.x, dpos.y);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off < 0.0 {
                    self.zoom(self.scroll_ratio);
                } else if off > 0.0 {
                    self.zoom(self.scroll_ratio.recip())
                }
            }
            WindowEvent::FramebufferSize(w, h) => self.set_viewport(w, h),
            WindowEvent::Key(key, Action::Press, _) => self.handle_key(key),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.target
            + self.radius
                * Vector3::new(
                    self.phi.sin() * self.theta.sin(),
                    self.phi.cos(),
                    self.phi.sin() * self.theta.cos(),
                )
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye(), &self.target, &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        // The projection is always invertible since near > 0 and fovy is in (0, pi)
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(&CameraConfig::default(), 800, 600)
    }

    #[test]
    fn test_starts_at_configured_eye() {
        let camera = camera();
        let eye = camera.eye();
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(eye.y, 100.0, epsilon = 1e-3);
        assert_relative_eq!(eye.z, 400.0, epsilon = 1e-3);
    }

    #[test]
    fn test_start_is_clamped() {
        let config = CameraConfig {
            start_position: [0.0, 0.0, 50.0],
            ..CameraConfig::default()
        };
        let camera = OrbitCamera::new(&config, 800, 600);
        assert_relative_eq!(camera.distance(), 100.0);
    }

    #[test]
    fn test_zoom_limits() {
        let mut camera = camera();
        for _ in 0..100 {
            camera.zoom(0.5);
        }
        assert_relative_eq!(camera.distance(), 100.0);
        for _ in 0..100 {
            camera.zoom(2.0);
        }
        assert_relative_eq!(camera.distance(), 1000.0);
    }

    #[test]
    fn test_pitch_never_flips() {
        let mut camera = camera();
        camera.rotate(0.0, 100.0);
        assert!(camera.eye().y < 0.0);
        assert!(camera.phi < PI);
        camera.rotate(0.0, -100.0);
        assert!(camera.eye().y > 0.0);
        assert!(camera.phi > 0.0);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = camera();
        assert_relative_eq!(camera.aspect(), 800.0 / 600.0);
        camera.set_viewport(1920, 1080);
        assert_relative_eq!(camera.aspect(), 1920.0 / 1080.0);
        assert_relative_eq!(camera.projection().aspect(), 1920.0 / 1080.0, max_relative = 1e-5);
        camera.set_viewport(100, 0);
        assert_relative_eq!(camera.aspect(), 1.0);
    }

    #[test]
    fn test_keys_ignored_while_typing() {
        let mut camera = camera();
        let start = camera.eye();
        let start_distance = camera.distance();

        // Focus and a camera key arriving in one batch
        camera.handle_key(KEY_SPEED_FOCUS);
        camera.handle_key(KEY_CAMERA_MOVE_LEFT);
        camera.handle_key(KEY_CAMERA_ZOOM_IN);
        assert_eq!(camera.eye(), start);

        camera.handle_key(KEY_SPEED_DONE);
        camera.handle_key(KEY_CAMERA_ZOOM_IN);
        assert!(camera.distance() < start_distance);
        assert!(camera.eye() != start);

        // Tab toggles back out, same as the controller does
        camera.handle_key(KEY_SPEED_FOCUS);
        camera.handle_key(KEY_SPEED_FOCUS);
        let before = camera.eye();
        camera.handle_key(KEY_CAMERA_MOVE_UP);
        assert!(camera.eye() != before);
    }

    #[test]
    fn test_pan_keeps_distance() {
        let mut camera = camera();
        let before = camera.distance();
        camera.pan(30.0, -10.0);
        assert!(camera.target() != Point3::origin());
        assert_relative_eq!((camera.eye() - camera.target()).norm(), before, max_relative = 1e-4);
    }
}
