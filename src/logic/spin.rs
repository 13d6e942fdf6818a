use std::{error::Error, fmt};

use nalgebra::*;

/// 角速度, 单位是 度/秒. x 绕局部 X 轴, y 绕局部 Y 轴.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularVelocity {
    pub x: f32,
    pub y: f32,
}

impl AngularVelocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f32; 2]> for AngularVelocity {
    fn from(value: [f32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

/// One rotating body.
///
/// Placement (`position`, `scale`) and `angular_velocity` are fixed at
/// construction. Only `orientation` changes, and only through
/// [`RotationAnimator::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedObject {
    pub name: String,
    pub model: String,
    pub material: String,
    position: Point3<f32>,
    scale: f32,
    orientation: UnitQuaternion<f32>,
    angular_velocity: AngularVelocity,
}

impl AnimatedObject {
    pub const DEFAULT_NAME: &'static str = "Box";
    pub const DEFAULT_MODEL: &'static str = "Models/Box.mdl";
    pub const DEFAULT_MATERIAL: &'static str = "Materials/Stone.xml";

    pub fn new(position: Point3<f32>, scale: f32, angular_velocity: AngularVelocity) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_owned(),
            model: Self::DEFAULT_MODEL.to_owned(),
            material: Self::DEFAULT_MATERIAL.to_owned(),
            position,
            scale,
            orientation: UnitQuaternion::identity(),
            angular_velocity,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }
    pub fn scale(&self) -> f32 {
        self.scale
    }
    pub fn orientation(&self) -> UnitQuaternion<f32> {
        self.orientation
    }
    pub fn angular_velocity(&self) -> AngularVelocity {
        self.angular_velocity
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimateError {
    /// 负数, NaN 或者无穷大的时间步长
    InvalidTimeStep(f32),
}

impl fmt::Display for AnimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimateError::InvalidTimeStep(dt) => {
                write!(f, "invalid time step: {dt} (must be finite and >= 0)")
            }
        }
    }
}

impl Error for AnimateError {}

/// Advances every object's orientation by `angular_velocity * dt`.
///
/// The animator itself holds no state, everything lives in the objects.
#[derive(Debug, Default, Clone, Copy)]
pub struct RotationAnimator;

impl RotationAnimator {
    /// 一步的增量旋转: `Ry(ωy·dt) * Rx(ωx·dt)`.
    /// 作用在向量上时先绕 X 再绕 Y, 和引擎里 Euler 构造 (Y*X*Z, Z=0) 一致.
    pub fn step_rotation(angular_velocity: AngularVelocity, delta_time: f32) -> UnitQuaternion<f32> {
        let rx = UnitQuaternion::from_axis_angle(
            &Vector3::x_axis(),
            (angular_velocity.x * delta_time).to_radians(),
        );
        let ry = UnitQuaternion::from_axis_angle(
            &Vector3::y_axis(),
            (angular_velocity.y * delta_time).to_radians(),
        );
        ry * rx
    }

    pub fn tick(&self, objects: &mut [AnimatedObject], delta_time: f32) -> Result<(), AnimateError> {
        // 先检查再改, 出错时一个都不动
        if !delta_time.is_finite() || delta_time < 0.0 {
            return Err(AnimateError::InvalidTimeStep(delta_time));
        }
        if delta_time == 0.0 {
            return Ok(());
        }
        for o in objects.iter_mut() {
            let delta = Self::step_rotation(o.angular_velocity, delta_time);
            // 局部空间, 右乘
            o.orientation = o.orientation * delta;
            o.orientation.renormalize();
        }
        Ok(())
    }
}
