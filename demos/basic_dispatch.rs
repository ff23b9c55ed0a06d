//! Configure once, instrument many callables.
//!
//! Run with: `cargo run --example basic_dispatch`

use std::sync::Arc;

use decorkit::prelude::*;

type Handler = Arc<dyn Fn(i32) -> i32 + Send + Sync>;

#[derive(Debug, thiserror::Error)]
#[error("sampling strategies are not supported by this instrumenter")]
struct Rejected;

/// Wraps handlers so that negative input panics with a readable message.
struct NonNegative;

impl ObjectInstrumenter for NonNegative {
    type Target = Handler;
    type Error = Rejected;

    fn instrument(&self, target: Handler, conf: &Conf) -> Result<Handler, Rejected> {
        if conf.strategy().is_reserved() {
            return Err(Rejected);
        }
        if conf.is_debug() {
            println!("wrapping handler under strategy {}", conf.strategy());
        }
        Ok(Arc::new(move |x: i32| {
            assert!(x >= 0, "argument {x} violates non-negative hint");
            target(x)
        }))
    }
}

fn main() -> Result<(), DispatchError<Rejected>> {
    let dispatcher = Dispatcher::new(NonNegative);

    let checked = dispatcher.configure(&ConfBuilder::new().is_debug(true).build());
    let square = checked.apply(Arc::new(|x: i32| x * x)).map_err(DispatchError::Instrument)?;
    println!("square(7) = {}", square(7));

    let unchecked = dispatcher.configure(&Conf::with_strategy(Strategy::NoCheck));
    let negate: Handler = Arc::new(|x: i32| -x);
    let same = unchecked.apply(Arc::clone(&negate)).map_err(DispatchError::Instrument)?;
    println!("negate(-3) = {} (unchanged: {})", same(-3), Arc::ptr_eq(&negate, &same));

    // A strategy name is not a configuration.
    if let Err(err) = dispatcher.dispatch(Mode::Configure, Some(&"O1")) {
        println!("rejected: {err}");
    }

    let sampled = dispatcher.configure(&Conf::with_strategy(Strategy::LogSample));
    if let Err(err) = sampled.apply(Arc::new(|x: i32| x)) {
        println!("rejected: {err}");
    }

    println!("cache: {:?}", dispatcher.cache_metrics());
    Ok(())
}
