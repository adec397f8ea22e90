use std::cell::Cell;

/// The two destinations the employee core can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Bills,
    NewBill,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Bills => "#employee/bills",
            Self::NewBill => "#employee/bill/new",
        }
    }
}

/// Abstract navigation side effect, invoked at most once per successful
/// submission or "new bill" action.
pub trait Navigator {
    fn navigate(&self, route: Route);
}

/// Single-slot navigator for interactive front ends. The event loop drains
/// the requested route after each action; a later request overwrites an
/// undrained one.
#[derive(Debug, Default)]
pub struct RouteBus {
    requested: Cell<Option<Route>>,
}

impl RouteBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Option<Route> {
        self.requested.take()
    }
}

impl Navigator for RouteBus {
    fn navigate(&self, route: Route) {
        self.requested.set(Some(route));
    }
}
