//! Reducer-driven state store
//!
//! The reducer reports whether the state changed (so the surface must
//! re-render) plus declarative [`Effect`](crate::effect::Effect)s that the
//! [`Widget`](crate::widget::Widget) driver performs afterwards.

use tracing::{debug, Level};

/// One-line log form of an action
pub trait ActionSummary {
    fn summary(&self) -> String;
}

/// What a reducer call produced
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult<E> {
    pub changed: bool,
    pub effects: Vec<E>,
}

impl<E> DispatchResult<E> {
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: Vec::new(),
        }
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: Vec::new(),
        }
    }

    /// Work to do with the state left as it is.
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    pub fn changed_with(effect: E) -> Self {
        Self::changed_with_many(vec![effect])
    }

    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }
}

pub type Reducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// Owns the state; every mutation goes through the reducer and is traced
pub struct Store<S, A, E> {
    state: S,
    reducer: Reducer<S, A, E>,
}

impl<S, A, E> Store<S, A, E>
where
    A: ActionSummary,
{
    pub fn new(state: S, reducer: Reducer<S, A, E>) -> Self {
        Self { state, reducer }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        // The action is consumed by the reducer, so summarise it first
        let summary = tracing::enabled!(Level::DEBUG).then(|| action.summary());
        let result = (self.reducer)(&mut self.state, action);
        if let Some(summary) = summary {
            debug!(
                action = %summary,
                changed = result.changed,
                effects = result.effects.len(),
                "Action reduced"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Tally {
        Add(u32),
        Peek,
    }

    impl ActionSummary for Tally {
        fn summary(&self) -> String {
            match self {
                Tally::Add(n) => format!("Add({n})"),
                Tally::Peek => "Peek".into(),
            }
        }
    }

    fn tally(total: &mut u32, action: Tally) -> DispatchResult<&'static str> {
        match action {
            Tally::Add(0) => DispatchResult::unchanged(),
            Tally::Add(n) => {
                *total += n;
                DispatchResult::changed_with("save")
            }
            Tally::Peek => DispatchResult::effect("log"),
        }
    }

    #[test]
    fn test_store_routes_through_reducer() {
        let mut store = Store::new(0, tally);

        let result = store.dispatch(Tally::Add(3));
        assert_eq!(result, DispatchResult::changed_with("save"));
        assert_eq!(*store.state(), 3);

        assert_eq!(store.dispatch(Tally::Add(0)), DispatchResult::unchanged());

        let result = store.dispatch(Tally::Peek);
        assert!(!result.changed);
        assert_eq!(result.effects, ["log"]);
        assert_eq!(*store.state(), 3);
    }

    #[test]
    fn test_changed_with_many_keeps_order() {
        let result = DispatchResult::changed_with_many(vec![1, 2]);
        assert!(result.changed);
        assert_eq!(result.effects, [1, 2]);
        assert_eq!(DispatchResult::<u8>::changed().effects.len(), 0);
    }
}
