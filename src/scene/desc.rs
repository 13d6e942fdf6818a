//! Initial values for a scene, as plain serde records.
//!
//! Missing fields fall back to their defaults, and a description with no
//! `objects` key gets the seven stone cubes.

use anyhow::*;
use nalgebra::*;
use serde::{Deserialize, Serialize};

use crate::{
    logic::{AngularVelocity, AnimatedObject},
    render::{Camera, PointLight},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectDesc {
    pub name: String,
    pub position: [f32; 3],
    pub scale: f32,
    /// 度/秒, 绕局部 X, 绕局部 Y
    pub angular_velocity: [f32; 2],
    pub model: String,
    pub material: String,
}

impl Default for ObjectDesc {
    fn default() -> Self {
        Self {
            name: AnimatedObject::DEFAULT_NAME.to_owned(),
            position: [0.0; 3],
            scale: 1.0,
            angular_velocity: [0.0; 2],
            model: AnimatedObject::DEFAULT_MODEL.to_owned(),
            material: AnimatedObject::DEFAULT_MATERIAL.to_owned(),
        }
    }
}

impl ObjectDesc {
    pub fn cube(position: [f32; 3], scale: f32, angular_velocity: [f32; 2]) -> Self {
        Self {
            position,
            scale,
            angular_velocity,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.scale.is_finite() && self.scale > 0.0,
            "object {:?}: scale must be positive, got {}",
            self.name,
            self.scale
        );
        ensure!(
            self.position.iter().all(|v| v.is_finite()),
            "object {:?}: position {:?} is not finite",
            self.name,
            self.position
        );
        ensure!(
            AngularVelocity::from(self.angular_velocity).is_finite(),
            "object {:?}: angular velocity {:?} is not finite",
            self.name,
            self.angular_velocity
        );
        Ok(())
    }

    pub fn build(&self) -> Result<AnimatedObject> {
        self.validate()?;
        let mut o = AnimatedObject::new(
            Point3::from(self.position),
            self.scale,
            self.angular_velocity.into(),
        );
        o.name = self.name.clone();
        o.model = self.model.clone();
        o.material = self.material.clone();
        Ok(o)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    pub position: [f32; 3],
    pub direction: [f32; 3],
    pub up: [f32; 3],
    /// 角度制
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    pub aspect: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        let c = Camera::default();
        Self {
            position: c.position.coords.into(),
            direction: c.direction.into(),
            up: c.up.into(),
            fovy: c.fovy,
            znear: c.znear,
            zfar: c.zfar,
            aspect: c.aspect,
        }
    }
}

impl CameraDesc {
    pub fn build(&self) -> Result<Camera> {
        ensure!(
            self.znear > 0.0 && self.zfar > self.znear,
            "camera clip range {}..{} is invalid",
            self.znear,
            self.zfar
        );
        ensure!(
            self.fovy > 0.0 && self.fovy < 180.0,
            "camera fovy {} out of range",
            self.fovy
        );
        ensure!(self.aspect > 0.0, "camera aspect {} must be positive", self.aspect);
        let direction = Vector3::from(self.direction);
        ensure!(direction.norm() > 0.0, "camera direction is zero");

        let mut camera = Camera {
            position: Point3::from(self.position),
            direction,
            up: Vector3::from(self.up),
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
            aspect: self.aspect,
            ..Default::default()
        };
        camera.calculate();
        Ok(camera)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightDesc {
    pub range: f32,
    pub brightness: f32,
    pub specular_intensity: f32,
    pub color: [f32; 4],
}

impl Default for LightDesc {
    fn default() -> Self {
        let l = PointLight::default();
        Self {
            range: l.range,
            brightness: l.brightness,
            specular_intensity: l.specular_intensity,
            color: l.color,
        }
    }
}

impl From<&LightDesc> for PointLight {
    fn from(d: &LightDesc) -> Self {
        PointLight {
            range: d.range,
            brightness: d.brightness,
            specular_intensity: d.specular_intensity,
            color: d.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDesc {
    pub objects: Vec<ObjectDesc>,
    pub camera: CameraDesc,
    pub light: LightDesc,
}

impl Default for SceneDesc {
    fn default() -> Self {
        Self {
            objects: seven_cubes(),
            camera: Default::default(),
            light: Default::default(),
        }
    }
}

impl SceneDesc {
    pub fn from_json(s: &str) -> Result<Self> {
        let desc: SceneDesc = serde_json::from_str(s).context("parse scene description")?;
        Ok(desc)
    }
}

/// 一个大的远景方块, 六个小的围着镜头前面.
/// 转速没有规律, 只是为了看起来每个都不一样.
pub fn seven_cubes() -> Vec<ObjectDesc> {
    vec![
        ObjectDesc::cube([0.0, 0.0, 32.0], 20.0, [8.0, 16.0]),
        ObjectDesc::cube([0.0, 1.0, 5.0], 0.85, [12.0, 9.0]),
        ObjectDesc::cube([2.0, 1.0, 5.0], 0.70, [20.0, 3.0]),
        ObjectDesc::cube([2.0, -1.0, 5.0], 0.25, [17.0, -11.0]),
        ObjectDesc::cube([-2.0, 1.0, 5.0], 1.0, [-5.0, 7.0]),
        ObjectDesc::cube([-2.0, -1.0, 5.0], 0.55, [-10.0, -2.0]),
        ObjectDesc::cube([0.0, -1.0, 5.0], 0.40, [19.0, -16.0]),
    ]
}
