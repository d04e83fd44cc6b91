//! # Hub configuration.
//!
//! Provides [`Config`], the centralized settings for a [`Hub`](crate::Hub).
//!
//! Config is consumed once, by [`Hub::builder`](crate::Hub::builder). All structures it
//! sizes (registry table, event bus) are allocated at build time and never grow.
//!
//! ## Sentinel values
//! - `max_subscriptions = 0` → every registration is rejected
//! - `bus_capacity = 0` → clamped to 1

use std::time::Duration;

/// Default number of subscription slots.
pub const MAX_SUBSCRIPTIONS: usize = 10;

/// Configuration for the hub.
///
/// ## Field semantics
/// - `max_subscriptions`: fixed registry capacity
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
/// - `poll_interval`: period of the service loop in [`Hub::run`](crate::Hub::run)
/// - `dispatch_when_idle`: whether the service loop dispatches on ticks with no ready bits
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of subscriptions the registry accepts.
    ///
    /// Storage for this many entries is reserved up front.
    pub max_subscriptions: usize,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Observers that lag behind more than `bus_capacity` events skip older items.
    pub bus_capacity: usize,

    /// How often the service loop polls the ready register.
    pub poll_interval: Duration,

    /// Run a dispatch pass on every tick, even if no ISR was serviced.
    ///
    /// When `false`, handlers are only notified after fresh data arrived.
    pub dispatch_when_idle: bool,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the poll interval clamped to at least 1ms.
    ///
    /// `tokio::time::interval` panics on a zero period.
    #[inline]
    pub fn poll_interval_clamped(&self) -> Duration {
        self.poll_interval.max(Duration::from_millis(1))
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `max_subscriptions = 10`
    /// - `bus_capacity = 1024`
    /// - `poll_interval = 10ms`
    /// - `dispatch_when_idle = false`
    fn default() -> Self {
        Self {
            max_subscriptions: MAX_SUBSCRIPTIONS,
            bus_capacity: 1024,
            poll_interval: Duration::from_millis(10),
            dispatch_when_idle: false,
        }
    }
}
