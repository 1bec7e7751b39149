//! Application-wide constants.

/// Version stamped into exported plan documents.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Catalog every new plan starts with.
pub const DEFAULT_CATALOG: &str = "splunk-step";

/// Title given to freshly created plans.
pub const DEFAULT_PLAN_TITLE: &str = "Pied Piper / Splunk Training Plan";

/// Names handed out to new team members, in order, when none is given.
pub const DEFAULT_TEAM_NAMES: [&str; 20] = [
    "Richard Hendricks",
    "Erlich Bachman",
    "Dinesh Chugtai",
    "Bertram Gilfoyle",
    "Jared Dunn",
    "Monica Hall",
    "Gavin Belson",
    "Nelson Bighetti",
    "Russ Hanneman",
    "Peter Gregory",
    "Laurie Bream",
    "Ed Chen",
    "Hoover Chan",
    "Don Bang",
    "Carla Walton",
    "Dan Melcher",
    "Fiona Wallace",
    "John Stafford",
    "Kara Swisher",
    "Maximo Reyes",
];

/// Upper bound on the roster size of a single plan.
pub const MAX_TEAM_MEMBERS: usize = 20;

/// Undo entries kept before the oldest are evicted.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 100;

/// Quiet period before a filter edit becomes a table history entry.
pub const FILTER_DEBOUNCE_MS: u64 = 750;

/// Base currency units per training unit (credit).
pub const CREDIT_RATE: f64 = 10.0;
