//! Tick-driven pointer gesture recognition.
//!
//! Feed one batch of [`RawSample`]s per frame into a [`GestureEngine`]; it
//! tracks each contact in a fixed pointer slot and runs tap, long-press,
//! slide and pinch detectors over them, publishing [`GestureEvent`]s on its
//! [`EventBus`].

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event_bus;
pub mod hit_test;
pub mod input;
pub mod types;

pub use clock::{GestureClock, ManualClock, MonotonicClock};
pub use config::{GestureConfig, DEFAULT_CONFIG};
pub use engine::{GestureEngine, LongPressPhase, SourceId, TapPhase};
pub use error::{ConfigError, EngineError};
pub use event_bus::{
    EventBus, GestureEvent, GestureKind, GestureListener, ListenerId, LoggingListener,
};
pub use hit_test::{HitTester, NoHitTesting};
pub use input::{MouseSource, RawSample, RawTransition};
pub use types::{ContactType, ObjectRef, Pointer, PointerId, ScreenPoint, TouchPhase};
