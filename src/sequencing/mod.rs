pub mod pattern;
pub mod scheduler;
pub mod tempo;

pub use pattern::{demo_pattern, PatternStore, Steps, TrackPattern};
pub use scheduler::{
    ScheduledStep, Scheduler, SoundTrigger, Transport, DEFAULT_LOOKAHEAD, DEFAULT_SCHEDULE_AHEAD,
};
pub use tempo::{seconds_per_step, Tempo};
