use anyhow::*;
use log::debug;

use crate::{
    logic::{AnimateError, AnimatedObject, RotationAnimator},
    render::{Camera, DrawItem, PointLight, RenderView},
};

pub mod desc;
pub use desc::*;

pub struct Scene {
    objects: Vec<AnimatedObject>,
    animator: RotationAnimator,
    pub camera: Camera,
    pub light: PointLight,
}

impl Scene {
    pub fn init(desc: &SceneDesc) -> Result<Self> {
        let mut objects = Vec::with_capacity(desc.objects.len());
        for (i, d) in desc.objects.iter().enumerate() {
            let o = d.build().with_context(|| format!("scene object #{i}"))?;
            debug!(
                "object #{i} {:?}: pos {:?} scale {} spin {:?}",
                o.name,
                d.position,
                o.scale(),
                d.angular_velocity
            );
            objects.push(o);
        }
        let camera = desc.camera.build()?;
        let light = PointLight::from(&desc.light);
        Ok(Scene {
            objects,
            animator: RotationAnimator,
            camera,
            light,
        })
    }

    pub fn objects(&self) -> &[AnimatedObject] {
        &self.objects
    }

    pub fn tick(&mut self, delta_time: f32) -> Result<(), AnimateError> {
        self.animator.tick(&mut self.objects, delta_time)
    }

    pub fn draw_items(&self) -> Vec<DrawItem> {
        self.objects.iter().map(DrawItem::from).collect()
    }

    pub fn view(&self) -> RenderView {
        RenderView {
            camera: self.camera.clone(),
            light: self.light.clone(),
            items: self.draw_items(),
        }
    }
}
