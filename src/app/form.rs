use std::fmt;

use crate::domain::{
    parse_date, AddEmployeeError, DraftError, EmployeeName, Roster, StoreError, VacationDraft,
    VacationType,
};

/// Which of the two date inputs a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// The first day of the vacation.
    Start,
    /// The last day of the vacation.
    End,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// Why a submission was rejected.
///
/// The message is what the form shows next to the submit control.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    /// One of employee, type, start date or end date is empty.
    #[error("all fields are required")]
    MissingFields,

    /// A date is not a `YYYY-MM-DD` calendar date.
    #[error("dates must use the YYYY-MM-DD format ({field} date is '{value}')")]
    InvalidDate {
        /// The offending input.
        field: DateField,
        /// What was typed.
        value: String,
    },

    /// The selected employee is not on the roster.
    #[error("unknown employee '{0}'")]
    UnknownEmployee(EmployeeName),

    /// The start date is after the end date.
    #[error("end date must be after start date")]
    EndBeforeStart,

    /// The store refused the record.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DraftError> for FormError {
    fn from(error: DraftError) -> Self {
        match error {
            DraftError::EndBeforeStart { .. } => Self::EndBeforeStart,
        }
    }
}

/// Whether the form is currently showing an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    /// No error shown.
    #[default]
    Idle,
    /// The last submission failed for this reason.
    Invalid(FormError),
}

/// The vacation form and its add-employee sub-form.
///
/// Field values are held as entered. Dates stay raw text until submission so
/// that a rejected submission leaves exactly what was typed in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    employee: Option<EmployeeName>,
    kind: Option<VacationType>,
    start: String,
    end: String,
    status: Status,
    adding_employee: bool,
    new_employee: String,
}

impl Form {
    /// A blank form with the defaults taken from the roster.
    #[must_use]
    pub fn new(roster: &Roster) -> Self {
        Self {
            employee: roster.first().cloned(),
            kind: Some(VacationType::first()),
            start: String::new(),
            end: String::new(),
            status: Status::Idle,
            adding_employee: false,
            new_employee: String::new(),
        }
    }

    /// The selected employee.
    #[must_use]
    pub const fn employee(&self) -> Option<&EmployeeName> {
        self.employee.as_ref()
    }

    /// The selected vacation type.
    #[must_use]
    pub const fn kind(&self) -> Option<VacationType> {
        self.kind
    }

    /// The start date as entered.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The end date as entered.
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Whether an error is being shown.
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// The error being shown, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&FormError> {
        match &self.status {
            Status::Idle => None,
            Status::Invalid(error) => Some(error),
        }
    }

    /// Whether the new-employee input is visible.
    #[must_use]
    pub const fn is_adding_employee(&self) -> bool {
        self.adding_employee
    }

    /// The uncommitted text of the new-employee input.
    #[must_use]
    pub fn new_employee_name(&self) -> &str {
        &self.new_employee
    }

    /// Picks an employee from the roster.
    ///
    /// Names that are not on the roster are ignored, as a picker would never
    /// offer them. Returns whether the name was accepted.
    pub fn select_employee(&mut self, roster: &Roster, name: &str) -> bool {
        match roster.get(name) {
            Some(entry) => {
                self.employee = Some(entry.clone());
                true
            }
            None => false,
        }
    }

    /// Picks a vacation type.
    pub const fn select_type(&mut self, kind: VacationType) {
        self.kind = Some(kind);
    }

    /// Replaces the start date text.
    pub fn set_start(&mut self, value: impl Into<String>) {
        self.start = value.into();
    }

    /// Replaces the end date text.
    pub fn set_end(&mut self, value: impl Into<String>) {
        self.end = value.into();
    }

    /// Checks the form and builds the record it describes.
    ///
    /// Rules are checked in order and the first failure is reported:
    /// 1. all four fields are filled in
    /// 2. both dates are `YYYY-MM-DD` dates
    /// 3. the employee is on the roster
    /// 4. the start date is not after the end date
    ///
    /// # Errors
    ///
    /// Returns the [`FormError`] for the first rule that fails.
    pub fn validate(&self, roster: &Roster) -> Result<VacationDraft, FormError> {
        let (Some(employee), Some(kind)) = (&self.employee, self.kind) else {
            return Err(FormError::MissingFields);
        };
        if self.start.trim().is_empty() || self.end.trim().is_empty() {
            return Err(FormError::MissingFields);
        }

        let start = parse_date(&self.start).ok_or_else(|| FormError::InvalidDate {
            field: DateField::Start,
            value: self.start.clone(),
        })?;
        let end = parse_date(&self.end).ok_or_else(|| FormError::InvalidDate {
            field: DateField::End,
            value: self.end.clone(),
        })?;

        if !roster.contains(employee) {
            return Err(FormError::UnknownEmployee(employee.clone()));
        }

        Ok(VacationDraft::new(employee.clone(), kind, start, end)?)
    }

    /// Shows an error, keeping every field as it is.
    pub(crate) fn fail(&mut self, error: FormError) {
        self.status = Status::Invalid(error);
    }

    /// Clears the error and puts every field back to its default.
    ///
    /// The add-employee sub-form is left as it is.
    pub(crate) fn reset(&mut self, roster: &Roster) {
        self.employee = roster.first().cloned();
        self.kind = Some(VacationType::first());
        self.start.clear();
        self.end.clear();
        self.status = Status::Idle;
    }

    /// Reveals the new-employee input.
    pub const fn open_add_employee(&mut self) {
        self.adding_employee = true;
    }

    /// Replaces the new-employee text.
    ///
    /// Returns `false`, ignoring the text, while the input is hidden.
    pub fn set_new_employee_name(&mut self, value: impl Into<String>) -> bool {
        if !self.adding_employee {
            return false;
        }
        self.new_employee = value.into();
        true
    }

    /// Hides the new-employee input and discards what was typed.
    pub fn cancel_add_employee(&mut self) {
        self.adding_employee = false;
        self.new_employee.clear();
    }

    /// Adds the typed name to the roster and selects it.
    ///
    /// On success the input is cleared and hidden. On failure nothing changes
    /// and the input stays open.
    ///
    /// # Errors
    ///
    /// Returns the roster's reason for refusing the name.
    pub(crate) fn confirm_add_employee(
        &mut self,
        roster: &mut Roster,
    ) -> Result<EmployeeName, AddEmployeeError> {
        let name = roster.add_if_absent(&self.new_employee)?;
        self.employee = Some(name.clone());
        self.new_employee.clear();
        self.adding_employee = false;
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::new();
        for name in ["Yousef", "Mahmoud", "Amr"] {
            roster.add_if_absent(name).unwrap();
        }
        roster
    }

    fn filled(roster: &Roster) -> Form {
        let mut form = Form::new(roster);
        form.set_start("2024-08-01");
        form.set_end("2024-08-03");
        form
    }

    #[test]
    fn defaults_come_from_roster() {
        let form = Form::new(&roster());
        assert_eq!(form.employee().map(EmployeeName::as_str), Some("Yousef"));
        assert_eq!(form.kind(), Some(VacationType::Annual));
        assert_eq!(form.start(), "");
        assert_eq!(form.end(), "");
        assert_eq!(form.status(), &Status::Idle);
        assert!(!form.is_adding_employee());
    }

    #[test]
    fn valid_form_builds_draft() {
        let roster = roster();
        let draft = filled(&roster).validate(&roster).unwrap();
        assert_eq!(draft.employee.as_str(), "Yousef");
        assert_eq!(draft.kind, VacationType::Annual);
        assert!(draft.id.is_none());
    }

    #[test_case(true, false, false; "no employee")]
    #[test_case(false, true, false; "no start")]
    #[test_case(false, false, true; "no end")]
    fn missing_field_is_reported(no_employee: bool, no_start: bool, no_end: bool) {
        let roster = roster();
        let mut form = filled(&roster);
        if no_employee {
            form = filled(&Roster::new());
        }
        if no_start {
            form.set_start("");
        }
        if no_end {
            form.set_end("   ");
        }
        assert_eq!(form.validate(&roster), Err(FormError::MissingFields));
    }

    #[test]
    fn missing_type_is_reported() {
        let roster = roster();
        let mut form = filled(&roster);
        form.kind = None;
        assert_eq!(form.validate(&roster), Err(FormError::MissingFields));
    }

    #[test]
    fn missing_fields_are_checked_before_dates() {
        let roster = roster();
        let mut form = filled(&roster);
        form.set_start("2024-08-10");
        form.set_end("");
        assert_eq!(form.validate(&roster), Err(FormError::MissingFields));
    }

    #[test]
    fn start_after_end_is_reported() {
        let roster = roster();
        let mut form = filled(&roster);
        form.set_start("2024-08-10");
        form.set_end("2024-08-01");
        assert_eq!(form.validate(&roster), Err(FormError::EndBeforeStart));
    }

    #[test]
    fn same_day_is_accepted() {
        let roster = roster();
        let mut form = filled(&roster);
        form.set_end("2024-08-01");
        assert!(form.validate(&roster).is_ok());
    }

    #[test_case("01/08/2024"; "slashes")]
    #[test_case("2024-02-30"; "no such day")]
    #[test_case("tomorrow"; "words")]
    fn malformed_date_is_reported(value: &str) {
        let roster = roster();
        let mut form = filled(&roster);
        form.set_end(value);
        assert_eq!(
            form.validate(&roster),
            Err(FormError::InvalidDate {
                field: DateField::End,
                value: value.to_string(),
            })
        );
    }

    #[test]
    fn employee_must_be_on_roster() {
        let roster = roster();
        let form = filled(&roster);
        let mut other = Roster::new();
        other.add_if_absent("Someone else").unwrap();
        assert!(matches!(
            form.validate(&other),
            Err(FormError::UnknownEmployee(_))
        ));
    }

    #[test]
    fn selecting_off_roster_name_is_ignored() {
        let roster = roster();
        let mut form = Form::new(&roster);
        assert!(!form.select_employee(&roster, "Nobody"));
        assert_eq!(form.employee().map(EmployeeName::as_str), Some("Yousef"));
        assert!(form.select_employee(&roster, "Amr"));
        assert_eq!(form.employee().map(EmployeeName::as_str), Some("Amr"));
    }

    #[test]
    fn reset_restores_defaults_and_clears_error() {
        let roster = roster();
        let mut form = filled(&roster);
        form.select_employee(&roster, "Amr");
        form.select_type(VacationType::Absent);
        form.fail(FormError::MissingFields);

        form.reset(&roster);

        assert_eq!(form, Form::new(&roster));
    }

    #[test]
    fn confirm_adds_and_selects_new_employee() {
        let mut roster = roster();
        let mut form = Form::new(&roster);
        form.open_add_employee();
        form.set_new_employee_name("  Hesham ");

        let name = form.confirm_add_employee(&mut roster).unwrap();

        assert_eq!(name.as_str(), "Hesham");
        assert_eq!(form.employee(), Some(&name));
        assert_eq!(form.new_employee_name(), "");
        assert!(!form.is_adding_employee());
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn failed_confirm_changes_nothing() {
        let mut roster = roster();
        let mut form = Form::new(&roster);
        form.open_add_employee();
        form.set_new_employee_name("Amr");
        let before = form.clone();

        assert!(form.confirm_add_employee(&mut roster).is_err());

        assert_eq!(form, before);
        assert!(form.is_adding_employee());
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn cancel_discards_typed_name() {
        let mut form = Form::new(&roster());
        form.open_add_employee();
        form.set_new_employee_name("Essam");

        form.cancel_add_employee();

        assert!(!form.is_adding_employee());
        assert_eq!(form.new_employee_name(), "");
    }

    #[test]
    fn typing_needs_open_input() {
        let mut form = Form::new(&roster());
        assert!(!form.set_new_employee_name("Essam"));
        assert_eq!(form.new_employee_name(), "");
    }
}
