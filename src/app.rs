//! The running session.
//!
//! [`App`] owns the roster, the vacation store and the form. Every user
//! interaction is an [`Action`] applied through [`App::dispatch`], which
//! completes the whole transition (collection changes and view refresh)
//! before returning.

mod action;
mod form;

pub use action::{parse_script, Action, ParseActionError, ScriptError};
pub use form::{DateField, Form, FormError, Status};
use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    Config, DraftError, EmployeeName, IdGenerator, RandomIds, Roster, SortedView, StoreError,
    VacationDraft, VacationStore,
};

/// What an action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A field or the add-employee sub-form changed.
    Updated,
    /// The action had no effect.
    ///
    /// This covers picking an employee who is not on the roster, typing into
    /// the hidden new-employee input, and confirming a new employee that is
    /// blank or already on the roster. None of these show an error.
    Ignored,
    /// The form was valid and a vacation was stored under this id.
    Submitted(Uuid),
    /// The form was invalid; the error is now shown on the form.
    Rejected(FormError),
    /// A new employee joined the roster and was selected.
    EmployeeAdded(EmployeeName),
}

/// Why the startup data could not be loaded.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeedError {
    /// A seed vacation names someone who is not on the roster.
    #[error("seed vacation for '{0}' does not match any employee")]
    UnknownEmployee(String),

    /// A seed vacation ends before it starts.
    #[error("seed vacation for '{employee}' is invalid: {source}")]
    InvalidRange {
        /// The employee the seed was for.
        employee: String,
        /// The underlying problem.
        #[source]
        source: DraftError,
    },

    /// The store refused a seed vacation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The whole state of one session.
#[derive(Debug, Clone)]
pub struct App<I = RandomIds> {
    roster: Roster,
    store: VacationStore<I>,
    form: Form,
}

impl App {
    /// An empty session that assigns random ids.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ids(RandomIds)
    }

    /// A session seeded from the configuration, assigning random ids.
    ///
    /// # Errors
    ///
    /// See [`App::from_config_with_ids`].
    pub fn from_config(config: &Config) -> Result<Self, SeedError> {
        Self::from_config_with_ids(config, RandomIds)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdGenerator> App<I> {
    /// An empty session drawing ids from the given generator.
    #[must_use]
    pub fn with_ids(ids: I) -> Self {
        let roster = Roster::new();
        let form = Form::new(&roster);
        Self {
            roster,
            store: VacationStore::with_ids(ids),
            form,
        }
    }

    /// A session seeded from the configuration.
    ///
    /// Employees are added in order; repeated or blank names are skipped with
    /// a warning. Seed vacations are stored so that [`VacationStore::list_all`]
    /// returns them in the order the configuration lists them.
    ///
    /// # Errors
    ///
    /// Returns an error if a seed vacation names an employee who is not on the
    /// roster or ends before it starts.
    #[instrument(level = "debug", skip_all)]
    pub fn from_config_with_ids(config: &Config, ids: I) -> Result<Self, SeedError> {
        let mut roster = Roster::new();
        for name in config.employees() {
            if let Err(e) = roster.add_if_absent(name) {
                tracing::warn!("Skipping employee {name:?}: {e}");
            }
        }

        let mut store = VacationStore::with_ids(ids);
        for seed in config.vacations().iter().rev() {
            let employee = roster
                .get(&seed.employee)
                .ok_or_else(|| SeedError::UnknownEmployee(seed.employee.clone()))?;
            let draft = VacationDraft::new(employee.clone(), seed.kind, seed.start, seed.end)
                .map_err(|source| SeedError::InvalidRange {
                    employee: seed.employee.clone(),
                    source,
                })?;
            store.insert_front(draft)?;
        }

        tracing::info!(
            employees = roster.len(),
            vacations = store.len(),
            "Loaded session data"
        );

        let form = Form::new(&roster);
        Ok(Self {
            roster,
            store,
            form,
        })
    }

    /// Applies one user action.
    #[instrument(level = "trace", skip(self))]
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        match action {
            Action::SelectEmployee(name) => {
                if self.form.select_employee(&self.roster, &name) {
                    Outcome::Updated
                } else {
                    tracing::debug!("Ignoring selection of {name:?}: not on the roster");
                    Outcome::Ignored
                }
            }
            Action::SelectType(kind) => {
                self.form.select_type(kind);
                Outcome::Updated
            }
            Action::SetStartDate(value) => {
                self.form.set_start(value);
                Outcome::Updated
            }
            Action::SetEndDate(value) => {
                self.form.set_end(value);
                Outcome::Updated
            }
            Action::Submit => match self.submit() {
                Ok(id) => Outcome::Submitted(id),
                Err(error) => Outcome::Rejected(error),
            },
            Action::OpenAddEmployee => {
                self.form.open_add_employee();
                Outcome::Updated
            }
            Action::SetNewEmployeeName(value) => {
                if self.form.set_new_employee_name(value) {
                    Outcome::Updated
                } else {
                    Outcome::Ignored
                }
            }
            Action::ConfirmAddEmployee => self
                .confirm_add_employee()
                .map_or(Outcome::Ignored, Outcome::EmployeeAdded),
            Action::CancelAddEmployee => {
                self.form.cancel_add_employee();
                Outcome::Updated
            }
        }
    }

    /// Submits the form.
    ///
    /// On success the vacation is stored, the error is cleared and the form
    /// returns to its defaults. On failure the error is shown and every field
    /// keeps its value.
    ///
    /// # Errors
    ///
    /// Returns the first validation rule the form breaks.
    pub fn submit(&mut self) -> Result<Uuid, FormError> {
        let stored = self
            .form
            .validate(&self.roster)
            .and_then(|draft| Ok(self.store.insert_front(draft)?.id()));

        match stored {
            Ok(id) => {
                tracing::info!(%id, "Recorded vacation");
                self.form.reset(&self.roster);
                Ok(id)
            }
            Err(error) => {
                tracing::debug!("Rejected submission: {error}");
                self.form.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Confirms the new-employee input.
    ///
    /// Returns the added name, or `None` if the input is hidden or the name is
    /// blank or already on the roster. A refused name is not reported to the
    /// user; the input simply stays open.
    pub fn confirm_add_employee(&mut self) -> Option<EmployeeName> {
        if !self.form.is_adding_employee() {
            return None;
        }
        match self.form.confirm_add_employee(&mut self.roster) {
            Ok(name) => {
                tracing::info!("Added employee {name}");
                Some(name)
            }
            Err(e) => {
                tracing::debug!("Not adding employee: {e}");
                None
            }
        }
    }
}

impl<I> App<I> {
    /// The employees that can be picked.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Every recorded vacation.
    #[must_use]
    pub const fn store(&self) -> &VacationStore<I> {
        &self.store
    }

    /// The form as it currently stands.
    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }

    /// The vacations in display order: latest start date first.
    #[must_use]
    pub fn sorted(&self) -> SortedView<'_> {
        self.store.sorted()
    }
}
