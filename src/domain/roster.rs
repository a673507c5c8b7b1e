use std::{fmt, ops::Deref};

use non_empty_string::NonEmptyString;
use serde::{Serialize, Serializer};

/// The display name of an employee.
///
/// Names are trimmed of surrounding whitespace and are never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EmployeeName(NonEmptyString);

impl EmployeeName {
    /// Creates a new `EmployeeName`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyNameError`] if nothing but whitespace was given.
    pub fn new(name: &str) -> Result<Self, EmptyNameError> {
        NonEmptyString::new(name.trim().to_string())
            .map(Self)
            .map_err(|_| EmptyNameError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for EmployeeName {
    type Error = EmptyNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for EmployeeName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for EmployeeName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for EmployeeName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EmployeeName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Error returned when an employee name is blank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("employee name must not be empty")]
pub struct EmptyNameError;

/// Why a name was not added to the roster.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddEmployeeError {
    /// The name was empty after trimming.
    #[error("employee name must not be empty")]
    Empty,

    /// The roster already holds this exact name.
    #[error("employee '{0}' is already on the roster")]
    Duplicate(EmployeeName),
}

impl From<EmptyNameError> for AddEmployeeError {
    fn from(_: EmptyNameError) -> Self {
        Self::Empty
    }
}

/// The ordered set of employees that vacations can be recorded for.
///
/// Names keep the order they were added in. The roster only grows: there is
/// no way to remove or rename an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: Vec<EmployeeName>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Adds a name to the end of the roster unless it is blank or already
    /// present.
    ///
    /// The name is trimmed before it is checked. Duplicates are detected by
    /// exact comparison of the trimmed text.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the roster untouched, if the trimmed name is
    /// empty or already on the roster.
    pub fn add_if_absent(&mut self, name: &str) -> Result<EmployeeName, AddEmployeeError> {
        let name = EmployeeName::try_from(name)?;
        if self.contains(&name) {
            return Err(AddEmployeeError::Duplicate(name));
        }
        self.names.push(name.clone());
        Ok(name)
    }

    /// All names, in the order they were added.
    #[must_use]
    pub fn names(&self) -> &[EmployeeName] {
        &self.names
    }

    /// The first name on the roster, which the form selects by default.
    #[must_use]
    pub fn first(&self) -> Option<&EmployeeName> {
        self.names.first()
    }

    /// Looks up a roster entry by its exact text.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EmployeeName> {
        self.names.iter().find(|entry| entry.as_str() == name)
    }

    /// The position of a name on the roster.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|entry| entry.as_str() == name)
    }

    /// Whether the roster holds this exact name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The number of employees on the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the roster has no employees.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
