//! Event system
//!
//! Key principles:
//! - Key-value arguments (no order dependency)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration with declared interests (only notify interested handlers)
//! - Queuing support (immediate + deferred delivery)
//!
//! Handlers receive an [`EngineContext`] so systems can read the world and
//! drive the graphics backend during dispatch.

use crate::assets::AssetRegistry;
use crate::ecs::World;
use crate::render::GraphicsApi;
use std::collections::HashMap;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Window framebuffer was resized
    WindowResized,
    /// A new frame should be produced
    FrameUpdate,
}

/// Variant for type-safe event arguments
/// Uses key-value pairs to avoid order dependency problems
#[derive(Debug, Clone)]
pub enum EventArg {
    /// Pixel dimensions (width, height)
    Size(u32, u32),
    /// Seconds since the previous frame
    DeltaTime(f32),
}

/// Event with type ID and key-value arguments
#[derive(Debug, Clone)]
pub struct Event {
    /// Type of event
    pub event_type: EventType,
    /// Timestamp when event was created (seconds)
    pub timestamp: f64,
    args: HashMap<&'static str, EventArg>,
}

impl Event {
    /// Create a new event with the given type and timestamp
    pub fn new(event_type: EventType, timestamp: f64) -> Self {
        Self {
            event_type,
            timestamp,
            args: HashMap::new(),
        }
    }

    /// Create a window-resize event
    pub fn window_resized(width: u32, height: u32, timestamp: f64) -> Self {
        Self::new(EventType::WindowResized, timestamp)
            .with_arg("size", EventArg::Size(width, height))
    }

    /// Create a frame-update event
    pub fn frame_update(delta_time: f32, timestamp: f64) -> Self {
        Self::new(EventType::FrameUpdate, timestamp)
            .with_arg("delta_time", EventArg::DeltaTime(delta_time))
    }

    /// Add an argument to the event (builder pattern)
    pub fn with_arg(mut self, key: &'static str, value: EventArg) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Get an argument by key
    pub fn get_arg(&self, key: &str) -> Option<&EventArg> {
        self.args.get(key)
    }

    /// Get size argument if present
    pub fn get_size(&self) -> Option<(u32, u32)> {
        if let Some(EventArg::Size(width, height)) = self.get_arg("size") {
            Some((*width, *height))
        } else {
            None
        }
    }

    /// Get delta-time argument if present
    pub fn get_delta_time(&self) -> Option<f32> {
        if let Some(EventArg::DeltaTime(delta)) = self.get_arg("delta_time") {
            Some(*delta)
        } else {
            None
        }
    }
}

/// Shared state handed to handlers during dispatch
pub struct EngineContext<'a> {
    /// ECS world
    pub world: &'a mut World,
    /// Graphics backend
    pub gfx: &'a mut dyn GraphicsApi,
    /// Asset registry
    pub assets: &'a AssetRegistry,
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler {
    /// Event types this handler wants to receive
    fn interests(&self) -> &'static [EventType];

    /// Handle an event, return true if consumed
    fn on_event(&mut self, ctx: &mut EngineContext<'_>, event: &Event) -> bool;
}

/// Event system with registration and queuing
/// Follows chain of responsibility pattern
pub struct EventSystem {
    immediate_queue: Vec<Event>,
    deferred_queue: Vec<(f64, Event)>,
    handlers: Vec<Box<dyn EventHandler>>,
    current_time: f64,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self {
            immediate_queue: Vec::new(),
            deferred_queue: Vec::new(),
            handlers: Vec::new(),
            current_time: 0.0,
        }
    }

    /// Update current time (seconds since start)
    pub fn update_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Register a handler; it is notified only for its declared interests
    pub fn register_handler(&mut self, handler: Box<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Send event for immediate handling this frame
    pub fn send(&mut self, event: Event) {
        self.immediate_queue.push(event);
    }

    /// Post event for deferred delivery at specified time
    pub fn post(&mut self, delivery_time: f64, event: Event) {
        self.deferred_queue.push((delivery_time, event));
    }

    /// Number of events still waiting for their delivery time
    pub fn pending_deferred(&self) -> usize {
        self.deferred_queue.len()
    }

    /// Dispatch all pending events
    /// Processes immediate queue first, then due deferred events
    pub fn dispatch(&mut self, ctx: &mut EngineContext<'_>) {
        // Process immediate events
        let immediate = std::mem::take(&mut self.immediate_queue);
        for event in immediate {
            self.dispatch_event(ctx, &event);
        }

        // Process due deferred events
        let mut i = 0;
        while i < self.deferred_queue.len() {
            if self.deferred_queue[i].0 <= self.current_time {
                let (_, event) = self.deferred_queue.remove(i);
                self.dispatch_event(ctx, &event);
            } else {
                i += 1;
            }
        }
    }

    /// Dispatch single event to interested handlers
    /// Stops on first handler that returns true (consumed)
    fn dispatch_event(&mut self, ctx: &mut EngineContext<'_>, event: &Event) {
        for handler in self.handlers.iter_mut() {
            if !handler.interests().contains(&event.event_type) {
                continue;
            }
            if handler.on_event(ctx, event) {
                // Event consumed, stop forwarding
                break;
            }
        }
    }

    /// Clear all queued events (useful for state transitions)
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}
