//! Link (customer) and time window types.

use serde::{Deserialize, Serialize};

use super::Location;

/// A service time window in milli time units.
///
/// Arrival must happen no later than `due_millis`; arriving before
/// `ready_millis` means waiting until the window opens.
///
/// # Examples
///
/// ```
/// use u_chainplan::models::TimeWindow;
///
/// let tw = TimeWindow::new(1000, 2000).unwrap();
/// assert!(tw.contains(1500));
/// assert_eq!(tw.waiting_millis(400), 600);
/// assert!(tw.is_violated(2500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    ready_millis: i64,
    due_millis: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready_millis > due_millis` or either is negative.
    pub fn new(ready_millis: i64, due_millis: i64) -> Option<Self> {
        if ready_millis < 0 || due_millis < 0 || ready_millis > due_millis {
            return None;
        }
        Some(Self {
            ready_millis,
            due_millis,
        })
    }

    /// Earliest allowable service start.
    pub fn ready_millis(&self) -> i64 {
        self.ready_millis
    }

    /// Latest allowable arrival.
    pub fn due_millis(&self) -> i64 {
        self.due_millis
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time_millis: i64) -> bool {
        time_millis >= self.ready_millis && time_millis <= self.due_millis
    }

    /// Waiting time when arriving at the given time; zero if the window is
    /// already open.
    pub fn waiting_millis(&self, arrival_millis: i64) -> i64 {
        (self.ready_millis - arrival_millis).max(0)
    }

    /// Returns `true` if arriving at the given time misses this window.
    pub fn is_violated(&self, arrival_millis: i64) -> bool {
        arrival_millis > self.due_millis
    }
}

/// A link (customer) that occupies exactly one position in exactly one
/// chain.
///
/// A link carries only immutable problem facts: its location, demand, and
/// optional service duration and time window. Which standstill it follows,
/// and everything derived from that, lives in
/// [`ChainSet`](crate::chain::ChainSet) and is written solely by the
/// propagation engine.
///
/// # Examples
///
/// ```
/// use u_chainplan::models::{Link, Location, TimeWindow};
///
/// let c = Link::new(0, Location::new(1, 2.0, 0.0), 10)
///     .with_service_millis(500)
///     .with_time_window(TimeWindow::new(1000, 4000).unwrap());
/// assert_eq!(c.demand(), 10);
/// assert_eq!(c.service_millis(), 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    id: usize,
    location: Location,
    demand: i32,
    service_millis: i64,
    time_window: Option<TimeWindow>,
}

impl Link {
    /// Creates a new link with the given demand and no service duration or
    /// time window.
    pub fn new(id: usize, location: Location, demand: i32) -> Self {
        Self {
            id,
            location,
            demand,
            service_millis: 0,
            time_window: None,
        }
    }

    /// Sets the service duration at this link.
    pub fn with_service_millis(mut self, service_millis: i64) -> Self {
        self.service_millis = service_millis;
        self
    }

    /// Sets a time window for this link.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = Some(tw);
        self
    }

    /// Link ID (index in the chain set's link table).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Location of this link.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Demand at this link (units to deliver or pick up).
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Service duration at this link.
    pub fn service_millis(&self) -> i64 {
        self.service_millis
    }

    /// Time window constraint, if any.
    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref()
    }

    /// Milli distance from this link's location to another location.
    pub fn milli_distance_to(&self, other: &Location) -> i64 {
        self.location.milli_distance_to(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_valid() {
        let tw = TimeWindow::new(100, 200).expect("valid");
        assert_eq!(tw.ready_millis(), 100);
        assert_eq!(tw.due_millis(), 200);
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(200, 100).is_none());
        assert!(TimeWindow::new(-1, 100).is_none());
        assert!(TimeWindow::new(0, -5).is_none());
    }

    #[test]
    fn test_time_window_contains() {
        let tw = TimeWindow::new(100, 200).expect("valid");
        assert!(tw.contains(100));
        assert!(tw.contains(150));
        assert!(tw.contains(200));
        assert!(!tw.contains(99));
        assert!(!tw.contains(201));
    }

    #[test]
    fn test_time_window_waiting() {
        let tw = TimeWindow::new(100, 200).expect("valid");
        assert_eq!(tw.waiting_millis(40), 60);
        assert_eq!(tw.waiting_millis(100), 0);
        assert_eq!(tw.waiting_millis(150), 0);
    }

    #[test]
    fn test_time_window_violated() {
        let tw = TimeWindow::new(100, 200).expect("valid");
        assert!(!tw.is_violated(200));
        assert!(tw.is_violated(201));
    }

    #[test]
    fn test_link_new() {
        let c = Link::new(2, Location::new(5, 1.0, 2.0), 7);
        assert_eq!(c.id(), 2);
        assert_eq!(c.location().id(), 5);
        assert_eq!(c.demand(), 7);
        assert_eq!(c.service_millis(), 0);
        assert!(c.time_window().is_none());
    }

    #[test]
    fn test_link_builder() {
        let tw = TimeWindow::new(0, 5000).expect("valid");
        let c = Link::new(0, Location::new(1, 0.0, 0.0), 3)
            .with_service_millis(250)
            .with_time_window(tw);
        assert_eq!(c.service_millis(), 250);
        assert_eq!(c.time_window().expect("has tw").due_millis(), 5000);
    }

    #[test]
    fn test_link_milli_distance() {
        let c = Link::new(0, Location::new(0, 0.0, 0.0), 1);
        assert_eq!(c.milli_distance_to(&Location::new(1, 1.0, 0.0)), 1000);
    }
}
