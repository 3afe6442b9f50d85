//! Menu digit routing.
//!
//! The IVR menu maps a single DTMF digit to a department; each
//! department owns one queue on the telephony platform. This is the
//! only routing decision made locally, everything else is driven by
//! the platform's callbacks.

use std::fmt;

/// Departments callers can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Department {
    #[default]
    Support,
    Sales,
    Marketing,
}

impl Department {
    /// Queue name used on the telephony platform.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Department::Support => "support",
            Department::Sales => "sales",
            Department::Marketing => "marketing",
        }
    }

    /// Map a caller's DTMF selection to a department.
    ///
    /// Returns `None` for anything outside the advertised menu so the
    /// caller can be sent back to the prompt.
    pub fn from_digits(digits: &str) -> Option<Self> {
        match digits {
            "1" => Some(Department::Support),
            "2" => Some(Department::Sales),
            "3" => Some(Department::Marketing),
            _ => None,
        }
    }

    /// Parse a queue name from a request parameter.
    ///
    /// Unknown names fall back to `Support`, matching the default used
    /// when the parameter is absent entirely.
    pub fn from_queue_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "sales" => Department::Sales,
            "marketing" => Department::Marketing,
            _ => Department::Support,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
