//! Headless host: stands in for the engine's frame loop.
//!
//! Each frame the host may feed input, then [`App::update`] handles quit
//! requests, ticks the scene once with the frame's `dt` and keeps FPS stats.

use std::{
    fs,
    ops::ControlFlow,
    path::Path,
    thread,
    time::{Duration, Instant},
};

use anyhow::*;
use log::{info, trace};
use serde::{Deserialize, Serialize};

use crate::{
    render::RenderView,
    scene::{Scene, SceneDesc},
    utils::builder_set_fn,
};

pub mod clock;
pub mod input;
pub use clock::*;
pub use input::*;

pub const QUIT_BUTTON: &str = "Button Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    FrameLimit,
    TimeLimit,
    Escape,
    QuitButton,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// `None` 时用真实时间
    pub fixed_step: Option<f32>,
    pub max_frames: Option<u64>,
    /// 模拟时间, 不是墙上时间
    pub max_seconds: Option<f32>,
    /// 只在真实时间模式下截断, 固定步长原样使用
    pub max_frame_time: f32,
    pub fps_interval: f32,
    /// 只在真实时间模式下 sleep
    pub target_fps: Option<f32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fixed_step: None,
            max_frames: None,
            max_seconds: Some(10.0),
            max_frame_time: 0.25,
            fps_interval: 2.0,
            target_fps: Some(60.0),
        }
    }
}

impl RunConfig {
    builder_set_fn!(set_fixed_step, fixed_step, f32);
    builder_set_fn!(set_max_frames, max_frames, u64);
    builder_set_fn!(set_max_seconds, max_seconds, f32);
    builder_set_fn!(set_target_fps, target_fps, f32);

    pub fn validate(&self) -> Result<()> {
        if let Some(step) = self.fixed_step {
            ensure!(
                step.is_finite() && step > 0.0,
                "fixed_step must be positive, got {step}"
            );
        }
        if let Some(max) = self.max_seconds {
            ensure!(
                max.is_finite() && max >= 0.0,
                "max_seconds must be finite and >= 0, got {max}"
            );
        }
        if let Some(fps) = self.target_fps {
            ensure!(fps.is_finite() && fps > 0.0, "target_fps must be positive, got {fps}");
            ensure!(
                Duration::try_from_secs_f32(1.0 / fps).is_ok(),
                "target_fps {fps} is too small"
            );
        }
        ensure!(
            self.max_frame_time.is_finite() && self.max_frame_time > 0.0,
            "max_frame_time must be positive, got {}",
            self.max_frame_time
        );
        ensure!(
            self.fps_interval > 0.0,
            "fps_interval must be positive, got {}",
            self.fps_interval
        );
        Ok(())
    }

    /// 真实时间模式下每帧至少花多长时间, 固定步长或者没设 `target_fps` 时是 `None`
    pub fn frame_budget(&self) -> Result<Option<Duration>> {
        match (self.fixed_step, self.target_fps) {
            (None, Some(fps)) => {
                let budget = Duration::try_from_secs_f32(1.0 / fps)
                    .with_context(|| format!("target_fps {fps} is too small"))?;
                Ok(Some(budget))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub run: RunConfig,
    pub scene: SceneDesc,
}

impl AppConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(s)?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parse config {}", path.display()))
    }
}

pub struct App {
    scene: Scene,
    input: Input,
    fps: FpsCounter,
    last_fps: Option<FpsReport>,
    frames: u64,
    elapsed: f32,
}

impl App {
    pub fn new(scene: Scene, fps_interval: f32) -> Self {
        App {
            scene,
            input: Input::default(),
            fps: FpsCounter::new(fps_interval),
            last_fps: None,
            frames: 0,
            elapsed: 0.0,
        }
    }

    /// One frame. Quit input wins over the scene update.
    pub fn update(&mut self, dt: f32) -> Result<ControlFlow<StopReason>> {
        if self.input.is_just_pressed(Key::Escape) {
            return Ok(ControlFlow::Break(StopReason::Escape));
        }
        if self.input.was_clicked(QUIT_BUTTON) {
            return Ok(ControlFlow::Break(StopReason::QuitButton));
        }

        trace!("frame {} dt {dt:.4}", self.frames);
        self.scene
            .tick(dt)
            .with_context(|| format!("frame {}", self.frames))?;
        self.frames += 1;
        self.elapsed += dt;

        if let Some(report) = self.fps.record(dt) {
            info!("{report}");
            self.last_fps = Some(report);
        }
        self.input.clear_every_frame();
        Ok(ControlFlow::Continue(()))
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn view(&self) -> RenderView {
        self.scene.view()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn last_fps(&self) -> Option<FpsReport> {
        self.last_fps
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub seconds: f32,
    pub reason: StopReason,
}

pub fn run(config: &AppConfig) -> Result<RunSummary> {
    run_with(config, |_| {})
}

/// 和 [`run`] 一样, 但每帧开头先调 `on_frame`, 宿主在这里喂输入或者取画面.
pub fn run_with(config: &AppConfig, mut on_frame: impl FnMut(&mut App)) -> Result<RunSummary> {
    let run = &config.run;
    run.validate()?;
    let scene = Scene::init(&config.scene)?;
    info!(
        "scene ready: {} objects, {}",
        scene.objects().len(),
        match run.fixed_step {
            Some(step) => format!("fixed step {step}s"),
            None => "realtime".to_owned(),
        }
    );

    let mut app = App::new(scene, run.fps_interval);
    let mut clock = match run.fixed_step {
        Some(step) => FrameClock::fixed(step),
        None => FrameClock::realtime(run.max_frame_time),
    };
    let frame_budget = run.frame_budget()?;

    let reason = loop {
        if run.max_frames.is_some_and(|max| app.frames() >= max) {
            break StopReason::FrameLimit;
        }
        if run.max_seconds.is_some_and(|max| app.elapsed() >= max) {
            break StopReason::TimeLimit;
        }

        let frame_start = Instant::now();
        on_frame(&mut app);
        let dt = clock.next_delta();
        if let ControlFlow::Break(reason) = app.update(dt)? {
            break reason;
        }

        if let Some(budget) = frame_budget {
            let spent = frame_start.elapsed();
            if spent < budget {
                thread::sleep(budget - spent);
            }
        }
    };

    let summary = RunSummary {
        frames: app.frames(),
        seconds: app.elapsed(),
        reason,
    };
    info!(
        "stopped after {} frames ({:.2}s simulated): {:?}",
        summary.frames, summary.seconds, summary.reason
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(step: f32) -> AppConfig {
        let mut config = AppConfig::default();
        config.run.set_fixed_step(step);
        config
    }

    #[test]
    fn stops_at_frame_limit() {
        let mut config = fixed(0.25);
        config.run.set_max_frames(5);
        let summary = run(&config).unwrap();
        assert_eq!(summary.reason, StopReason::FrameLimit);
        assert_eq!(summary.frames, 5);
        assert_eq!(summary.seconds, 1.25);
    }

    #[test]
    fn stops_at_time_limit() {
        let mut config = fixed(0.25);
        config.run.set_max_seconds(2.0);
        let summary = run(&config).unwrap();
        assert_eq!(summary.reason, StopReason::TimeLimit);
        assert_eq!(summary.frames, 8);
    }

    #[test]
    fn escape_quits_before_tick() {
        let mut config = fixed(0.25);
        config.run.set_max_frames(100);
        let summary = run_with(&config, |app| {
            if app.frames() == 3 {
                app.input_mut().record_pressed(Key::Escape);
            }
        })
        .unwrap();
        assert_eq!(summary.reason, StopReason::Escape);
        assert_eq!(summary.frames, 3);
    }

    #[test]
    fn quit_button_quits() {
        let config = fixed(0.25);
        let summary = run_with(&config, |app| app.input_mut().record_click(QUIT_BUTTON)).unwrap();
        assert_eq!(summary.reason, StopReason::QuitButton);
        assert_eq!(summary.frames, 0);
    }

    #[test]
    fn other_clicks_are_ignored() {
        let mut config = fixed(0.25);
        config.run.set_max_frames(2);
        let summary = run_with(&config, |app| app.input_mut().record_click("Button Other")).unwrap();
        assert_eq!(summary.reason, StopReason::FrameLimit);
    }

    #[test]
    fn fps_reported_after_interval() {
        let scene = Scene::init(&SceneDesc::default()).unwrap();
        let mut app = App::new(scene, 2.0);
        for _ in 0..7 {
            app.update(0.25).unwrap();
        }
        assert!(app.last_fps().is_none());
        app.update(0.25).unwrap();
        let report = app.last_fps().unwrap();
        assert_eq!(report.frames, 8);
    }

    #[test]
    fn other_keys_do_not_quit() {
        let scene = Scene::init(&SceneDesc::default()).unwrap();
        let mut app = App::new(scene, 2.0);
        app.input_mut().record_pressed(Key::Space);
        assert_eq!(app.update(0.1).unwrap(), ControlFlow::Continue(()));
        app.input_mut().record_pressed(Key::Space);
        assert_eq!(app.update(0.1).unwrap(), ControlFlow::Continue(()));
        assert_eq!(app.frames(), 2);
    }

    #[test]
    fn negative_dt_is_an_error() {
        let scene = Scene::init(&SceneDesc::default()).unwrap();
        let mut app = App::new(scene, 2.0);
        let err = app.update(-1.0).unwrap_err();
        assert!(format!("{err:#}").contains("invalid time step"));
        assert_eq!(app.frames(), 0);
    }

    #[test]
    fn config_validation() {
        let mut config = RunConfig::default();
        config.validate().unwrap();
        config.set_fixed_step(0.0);
        assert!(config.validate().is_err());

        let config = RunConfig {
            fps_interval: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn max_seconds_must_be_finite_and_non_negative() {
        let mut config = RunConfig::default();
        config.set_max_seconds(-5.0);
        assert!(config.validate().is_err());
        config.set_max_seconds(f32::NAN);
        assert!(config.validate().is_err());
        config.set_max_seconds(0.0);
        config.validate().unwrap();

        let config = AppConfig::from_json(r#"{ "run": { "fixed_step": 0.1, "max_seconds": -5.0 } }"#)
            .unwrap();
        assert!(run(&config).is_err());
    }

    #[test]
    fn tiny_target_fps_is_an_error_not_a_panic() {
        let config =
            AppConfig::from_json(r#"{ "run": { "target_fps": 1e-39, "max_frames": 1 } }"#).unwrap();
        assert!(config.run.validate().is_err());
        let err = run(&config).unwrap_err();
        assert!(format!("{err:#}").contains("target_fps"));

        let mut ok = RunConfig::default();
        ok.set_target_fps(30.0);
        assert_eq!(
            ok.frame_budget().unwrap(),
            Some(Duration::from_secs_f32(1.0 / 30.0))
        );
        ok.set_fixed_step(0.1);
        assert_eq!(ok.frame_budget().unwrap(), None);
    }

    #[test]
    fn fixed_step_above_frame_cap_is_used_as_is() {
        let mut config = fixed(1.0);
        config.run.set_max_frames(3);
        assert!(config.run.max_frame_time < 1.0);
        let summary = run(&config).unwrap();
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.seconds, 3.0);
    }

    #[test]
    fn config_from_json() {
        let config = AppConfig::from_json(
            r#"{ "run": { "fixed_step": 0.5, "max_frames": 4 },
                 "scene": { "objects": [ { "scale": 2.0, "angular_velocity": [0, 90] } ] } }"#,
        )
        .unwrap();
        assert_eq!(config.run.fixed_step, Some(0.5));
        assert_eq!(config.run.max_seconds, Some(10.0));
        assert_eq!(config.scene.objects.len(), 1);

        let summary = run(&config).unwrap();
        assert_eq!(summary.frames, 4);
        assert_eq!(summary.seconds, 2.0);
    }

    #[test]
    fn missing_config_file_names_path() {
        let err = AppConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
