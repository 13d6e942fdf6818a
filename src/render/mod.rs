//! 给外部渲染器看的只读数据. 这里不碰 GPU, 只算矩阵.

use nalgebra::*;

use crate::logic::AnimatedObject;

pub mod camera;
pub use camera::*;

/// 挂在相机上的点光源
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub range: f32,
    pub brightness: f32,
    pub specular_intensity: f32,
    pub color: [f32; 4],
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            range: 22.0,
            brightness: 1.0,
            specular_intensity: 10.0,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Everything a renderer needs to draw one object this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub name: String,
    pub model: String,
    pub material: String,
    pub position: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
    pub scale: f32,
}

impl DrawItem {
    /// translation * rotation * uniform scale
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Similarity3::from_parts(
            Translation3::from(self.position.coords),
            self.orientation,
            self.scale,
        )
        .to_homogeneous()
    }
}

impl From<&AnimatedObject> for DrawItem {
    fn from(o: &AnimatedObject) -> Self {
        DrawItem {
            name: o.name.clone(),
            model: o.model.clone(),
            material: o.material.clone(),
            position: o.position(),
            orientation: o.orientation(),
            scale: o.scale(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderView {
    pub camera: Camera,
    pub light: PointLight,
    pub items: Vec<DrawItem>,
}
