use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Three shaded spheres over a reflective floor
    Spheres,
    /// Snowman on a glossy floor with spot lights
    Snowman,
    /// Facing mirrors with a transparent ball between them
    Mirrors,
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "whitted")]
#[command(about = "A recursive Whitted-style ray tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "spheres")]
    pub scene: SceneChoice,

    /// Image width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Rays per pixel on a regular grid (rounded down to a square number)
    #[arg(long, short = 'a', default_value = "1")]
    pub anti_aliasing: u32,

    /// Adaptive supersampling depth; 0 disables it
    #[arg(long, default_value = "0")]
    pub adaptive: u32,

    /// Threads: 0 sequential, -1 rayon buckets, -2 automatic, N workers
    #[arg(long, short = 't', default_value = "-2", allow_negative_numbers = true)]
    pub threads: i32,

    /// Seconds between progress reports; 0 disables them
    #[arg(long, default_value = "0")]
    pub progress: f64,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    pub output: String,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
