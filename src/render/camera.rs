use nalgebra::*;

/// OpenGL 的 z 是 [-1, 1], wgpu/metal/dx 是 [0, 1]
pub fn opengl_to_wgpu_matrix() -> Matrix4<f32> {
    #[rustfmt::skip]
    let m = Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    );
    m
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub view_matrix: Matrix4<f32>,
    pub proj_matrix: Matrix4<f32>,

    pub aspect: f32,
    /// 角度制
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,

    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            view_matrix: Matrix4::identity(),
            proj_matrix: Matrix4::identity(),

            // 原点朝 +z 看, 方块都摆在 z > 0 那边
            position: Point3::origin(),
            direction: Vector3::new(0.0, 0.0, 1.0),
            up: Vector3::new(0.0, 1.0, 0.0),

            aspect: 16.0 / 9.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 256.0,
        };
        camera.calculate();
        camera
    }
}

impl Camera {
    pub fn calculate_view(&mut self) {
        let target = self.position + self.direction;
        let view = Isometry3::look_at_rh(&self.position, &target, &self.up);
        self.view_matrix = view.to_homogeneous();
    }

    pub fn calculate_proj(&mut self) {
        let proj = Perspective3::new(self.aspect, self.fovy.to_radians(), self.znear, self.zfar);
        self.proj_matrix = opengl_to_wgpu_matrix() * proj.into_inner();
    }

    pub fn calculate(&mut self) {
        self.calculate_view();
        self.calculate_proj();
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        self.proj_matrix * self.view_matrix
    }
}
