use std::{fmt, time::Instant};

use log::warn;

/// Source of per-frame `dt`, in seconds.
#[derive(Debug)]
pub enum FrameClock {
    /// 每帧固定步长, 结果可复现, 不截断
    Fixed(f32),
    /// 真实时间, 超过 `max_frame_time` 的帧会被截断
    Realtime { last: Instant, max_frame_time: f32 },
}

impl FrameClock {
    pub fn fixed(step: f32) -> Self {
        FrameClock::Fixed(step)
    }

    pub fn realtime(max_frame_time: f32) -> Self {
        FrameClock::Realtime {
            last: Instant::now(),
            max_frame_time,
        }
    }

    /// 上一帧到现在的秒数, 不会是负数
    pub fn next_delta(&mut self) -> f32 {
        match self {
            FrameClock::Fixed(step) => *step,
            FrameClock::Realtime {
                last,
                max_frame_time,
            } => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(*last).as_secs_f32();
                *last = now;
                clamp_frame_time(dt, *max_frame_time)
            }
        }
    }
}

/// 卡顿一下不要让方块一次转好几圈
pub fn clamp_frame_time(dt: f32, max_frame_time: f32) -> f32 {
    if dt > max_frame_time {
        warn!("frame took {dt:.3}s, clamped to {max_frame_time:.3}s");
        max_frame_time
    } else {
        dt.max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsReport {
    pub frames: u32,
    pub seconds: f32,
}

impl FpsReport {
    pub fn fps(&self) -> f32 {
        if self.seconds > 0.0 {
            self.frames as f32 / self.seconds
        } else {
            0.0
        }
    }
}

impl fmt::Display for FpsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames in {:.3} seconds = {:.2} fps",
            self.frames,
            self.seconds,
            self.fps()
        )
    }
}

/// Counts frames and reports once `interval` seconds have accumulated.
#[derive(Debug)]
pub struct FpsCounter {
    interval: f32,
    frames: u32,
    time: f32,
}

impl FpsCounter {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            frames: 0,
            time: 0.0,
        }
    }

    pub fn record(&mut self, dt: f32) -> Option<FpsReport> {
        self.frames += 1;
        self.time += dt;
        if self.time >= self.interval {
            let report = FpsReport {
                frames: self.frames,
                seconds: self.time,
            };
            self.frames = 0;
            self.time = 0.0;
            Some(report)
        } else {
            None
        }
    }
}
