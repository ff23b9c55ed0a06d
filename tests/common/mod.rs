//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use decorkit::conf::Conf;
use decorkit::traits::ObjectInstrumenter;

/// A callable target: takes an integer, returns an integer.
pub type Func = Arc<dyn Fn(i64) -> i64 + Send + Sync>;

pub fn func(f: impl Fn(i64) -> i64 + Send + Sync + 'static) -> Func {
    Arc::new(f)
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot instrument opaque callable")]
pub struct Opaque;

/// Wraps callables so that negative arguments are clamped to zero, counting
/// every call and remembering the confs it saw.
#[derive(Default)]
pub struct ClampingInstrumenter {
    calls: AtomicUsize,
    seen: parking_lot::Mutex<Vec<Conf>>,
    reject: bool,
}

impl ClampingInstrumenter {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<Conf> {
        self.seen.lock().clone()
    }
}

impl ObjectInstrumenter for ClampingInstrumenter {
    type Target = Func;
    type Error = Opaque;

    fn instrument(&self, target: Func, conf: &Conf) -> Result<Func, Opaque> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(conf.clone());
        if self.reject {
            return Err(Opaque);
        }
        Ok(Arc::new(move |x: i64| target(x.max(0))))
    }
}
