use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::VacationType;

/// The data a session starts from.
///
/// This holds the initial roster and the vacations already on record when the
/// session opens. It is only ever read at startup; nothing the session does is
/// written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The initial roster, in picker order.
    ///
    /// The first name is the form's default selection.
    employees: Vec<String>,

    /// Vacations on record at startup.
    ///
    /// Listed in store order: the first entry is treated as the most recently
    /// added.
    vacations: Vec<SeedVacation>,
}

/// A vacation on record when the session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedVacation {
    /// The employee on vacation. Must appear in [`Config::employees`].
    pub employee: String,
    /// The category of the vacation.
    #[serde(rename = "type")]
    pub kind: VacationType,
    /// The first day, as a quoted `YYYY-MM-DD` string.
    pub start: NaiveDate,
    /// The last day, as a quoted `YYYY-MM-DD` string.
    pub end: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            employees: default_employees(),
            vacations: default_vacations(),
        }
    }
}

impl Config {
    /// Builds a configuration from an explicit roster and seed list.
    #[must_use]
    pub const fn new(employees: Vec<String>, vacations: Vec<SeedVacation>) -> Self {
        Self {
            employees,
            vacations,
        }
    }

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let shown = path.display();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read vacations config {shown}: {e}"))?;
        toml::from_str(&text).map_err(|e| format!("Invalid vacations config {shown}: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| format!("Cannot encode vacations config: {e}"))?;
        std::fs::write(path, text)
            .map_err(|e| format!("Cannot write vacations config {}: {e}", path.display()))
    }

    /// The initial roster.
    #[must_use]
    pub fn employees(&self) -> &[String] {
        &self.employees
    }

    /// The vacations on record at startup, in store order.
    #[must_use]
    pub fn vacations(&self) -> &[SeedVacation] {
        &self.vacations
    }
}

fn default_employees() -> Vec<String> {
    [
        "يوسف",
        "محمود",
        "بحيرى",
        "مصطفى",
        "هشام",
        "شعبان",
        "عمرو",
        "عصام",
        "عاطف",
        "أيمن",
        "إسلام",
        "خالد",
        "عبدالله",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_vacations() -> Vec<SeedVacation> {
    let date = |year, month, day| NaiveDate::from_ymd_opt(year, month, day);
    [
        ("يوسف", VacationType::Annual, date(2024, 8, 1), date(2024, 8, 10)),
        ("محمود", VacationType::Emergency, date(2024, 7, 25), date(2024, 7, 26)),
    ]
    .into_iter()
    .filter_map(|(employee, kind, start, end)| {
        Some(SeedVacation {
            employee: employee.to_string(),
            kind,
            start: start?,
            end: end?,
        })
    })
    .collect()
}

/// On-disk layouts of the seed file, keyed by the `_version` field.
///
/// Older files keep loading when the layout gains a new version.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_employees")]
        employees: Vec<String>,

        #[serde(default = "default_vacations")]
        vacations: Vec<SeedVacation>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                employees,
                vacations,
            } => Self {
                employees,
                vacations,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            employees: config.employees,
            vacations: config.vacations,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            "_version = \"1\"\nemployees = [\"Yousef\", \"Mahmoud\"]\n\n[[vacations]]\nemployee = \"Mahmoud\"\ntype = \"absent\"\nstart = \"2024-03-04\"\nend = \"2024-03-05\"\n"
                .as_bytes(),
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(
            config.employees(),
            &["Yousef".to_string(), "Mahmoud".to_string()]
        );
        assert_eq!(config.vacations().len(), 1);
        let seed = &config.vacations()[0];
        assert_eq!(seed.employee, "Mahmoud");
        assert_eq!(seed.kind, VacationType::Absent);
        assert_eq!(seed.start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Cannot read vacations config"));
        assert!(error.contains("missing.toml"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nemployees = \"everyone\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Invalid vacations config"));
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load_keeps_arabic_names() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("vacations.toml");

        Config::default().save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();

        assert_eq!(loaded, Config::default());
        assert_eq!(loaded.employees().len(), 13);
        assert_eq!(loaded.employees()[0], "يوسف");
    }

    #[test]
    fn default_seeds_reference_default_roster() {
        let config = Config::default();
        for seed in config.vacations() {
            assert!(config.employees().contains(&seed.employee));
            assert!(seed.start <= seed.end);
        }
    }
}
