//! Domain models for vacation tracking.
//!
//! This module contains the pure core: vacation records and their
//! duration, the employee roster, the vacation store with its sorted view,
//! and the seed configuration.

mod config;
pub use config::{Config, SeedVacation};

mod calendar;
pub(crate) use calendar::parse_date;
pub use calendar::{duration, duration_str};

/// Employee names and the roster they live in.
pub mod roster;
pub use roster::{AddEmployeeError, EmployeeName, Roster};

mod id;
pub use id::{IdGenerator, RandomIds, SequentialIds};

/// Vacation records and vacation types.
pub mod vacation;
pub use vacation::{DraftError, Vacation, VacationDraft, VacationType};

/// In-memory vacation storage.
pub mod store;
pub use store::{SortedView, StoreError, VacationStore};
