//! Team vacation records
//!
//! A roster of employees and an in-memory list of their vacations, edited
//! through a small form state machine and reviewed as a table sorted by start
//! date.

pub mod domain;
pub use domain::{
    duration, Config, EmployeeName, IdGenerator, RandomIds, Roster, SeedVacation, SequentialIds,
    SortedView, Vacation, VacationDraft, VacationStore, VacationType,
};

pub mod app;
pub use app::{Action, App, Form, FormError, Outcome};
