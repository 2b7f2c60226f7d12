//! Shared compiler context.
//!
//! The host creates one [`CompilerContext`] per run. Plugins may store typed
//! state in it (at most one value per type) and install [`TaskListener`]s,
//! typically from [`Plugin::initialize_context`](crate::Plugin::initialize_context).
//! This is the only sanctioned channel for one plugin to observe another's
//! state.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

use serde::Serialize;

use crate::Phase;

/// Whether a host task is starting or has just finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStage {
    Started,
    Finished,
}

/// A host task boundary for one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEvent {
    pub phase: Phase,
    pub stage: TaskStage,
    pub unit: String,
}

impl TaskEvent {
    pub fn started(phase: Phase, unit: impl Into<String>) -> Self {
        Self {
            phase,
            stage: TaskStage::Started,
            unit: unit.into(),
        }
    }

    pub fn finished(phase: Phase, unit: impl Into<String>) -> Self {
        Self {
            phase,
            stage: TaskStage::Finished,
            unit: unit.into(),
        }
    }
}

/// Observer of host task boundaries.
///
/// Listeners cannot abort a run; escalation is reserved for plugin
/// callbacks.
pub trait TaskListener: Send {
    fn on_event(&mut self, event: &TaskEvent);
}

/// Typed state shared by the host and every plugin of one run.
#[derive(Default)]
pub struct CompilerContext {
    slots: HashMap<TypeId, Box<dyn Any + Send>>,
    listeners: Vec<Box<dyn TaskListener>>,
}

impl CompilerContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, returning the previous value of the same type.
    pub fn put<T: Any + Send>(&mut self, value: T) -> Option<T> {
        self.slots
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Get the value of type `T`, if one was stored.
    pub fn get<T: Any + Send>(&self) -> Option<&T> {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast_ref::<T>())
    }

    /// Get a mutable reference to the value of type `T`, if one was stored.
    pub fn get_mut<T: Any + Send>(&mut self) -> Option<&mut T> {
        self.slots
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast_mut::<T>())
    }

    /// Get the value of type `T`, inserting its default first if absent.
    pub fn get_or_default<T: Any + Send + Default>(&mut self) -> &mut T {
        self.slots
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()))
            .downcast_mut::<T>()
            .expect("slot is keyed by its own TypeId")
    }

    /// Check whether a value of type `T` is stored.
    pub fn contains<T: Any + Send>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    /// Remove and return the value of type `T`.
    pub fn take<T: Any + Send>(&mut self) -> Option<T> {
        self.slots
            .remove(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast::<T>().ok())
            .map(|value| *value)
    }

    /// Install a task listener. Listeners are notified in installation order.
    pub fn add_listener(&mut self, listener: impl TaskListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Number of installed listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Notify every listener of a task boundary.
    pub fn notify(&mut self, event: &TaskEvent) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }
}

impl std::fmt::Debug for CompilerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilerContext")
            .field("slots", &self.slots.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
