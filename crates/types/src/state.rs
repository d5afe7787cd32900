//! WebLogic state enumerations and their markdown status glyphs.

const GLYPH_OK: &str = "🟢";
const GLYPH_DOWN: &str = "🔴";
const GLYPH_TRANSITIONAL: &str = "🟡";

/// Lifecycle state reported by a server runtime.
///
/// Unrecognized labels map to [`ServerState::Unknown`] rather than failing,
/// since the interpreter output is not under our control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerState {
    Running,
    Shutdown,
    Standby,
    Admin,
    Starting,
    Suspending,
    ForceSuspending,
    Unknown,
}

impl ServerState {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "RUNNING" => Self::Running,
            "SHUTDOWN" => Self::Shutdown,
            "STANDBY" => Self::Standby,
            "ADMIN" => Self::Admin,
            "STARTING" => Self::Starting,
            "SUSPENDING" => Self::Suspending,
            "FORCE_SUSPENDING" => Self::ForceSuspending,
            _ => Self::Unknown,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ServerState::Running => GLYPH_OK,
            ServerState::Shutdown => GLYPH_DOWN,
            _ => GLYPH_TRANSITIONAL,
        }
    }
}

/// Deployment state of an application (`STATE_ACTIVE`, `STATE_PREPARED`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationState {
    Active,
    Inactive,
}

impl ApplicationState {
    pub fn from_label(label: &str) -> Self {
        if label.trim() == "STATE_ACTIVE" { Self::Active } else { Self::Inactive }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ApplicationState::Active => GLYPH_OK,
            ApplicationState::Inactive => GLYPH_DOWN,
        }
    }
}

/// Health summary derived from the printed `HealthState` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthState {
    Ok,
    Degraded,
}

impl HealthState {
    /// WLST prints health as a composite string such as
    /// `Component:ServerRuntime,State:HEALTH_OK,MBean:...`.
    pub fn from_label(label: &str) -> Self {
        if label.contains("HEALTH_OK") { Self::Ok } else { Self::Degraded }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            HealthState::Ok => GLYPH_OK,
            HealthState::Degraded => GLYPH_DOWN,
        }
    }
}
