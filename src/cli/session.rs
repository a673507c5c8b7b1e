use std::{fmt, io::IsTerminal};

use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing::instrument;
use vacations::{Action, App, Config, EmployeeName, Outcome, VacationType};

use crate::cli::{table::Output, terminal::Styled};

#[derive(Debug, Default, clap::Parser)]
pub struct Session {
    #[command(flatten)]
    output: Output,
}

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    AddVacation,
    AddEmployee,
    ShowVacations,
    Quit,
}

impl MenuItem {
    const ALL: [Self; 4] = [
        Self::AddVacation,
        Self::AddEmployee,
        Self::ShowVacations,
        Self::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AddVacation => "Add vacation",
            Self::AddEmployee => "Add employee",
            Self::ShowVacations => "Show vacations",
            Self::Quit => "Quit",
        })
    }
}

const CONFIRM: usize = 0;
const SUBFORM_CHOICES: [&str; 2] = ["Confirm", "Cancel"];

impl Session {
    #[instrument(skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        if !std::io::stdin().is_terminal() {
            anyhow::bail!(
                "The interactive session needs a terminal. Use 'vac replay' to apply actions \
                 from a file or pipe"
            );
        }

        let mut app = App::from_config(config)?;
        let theme = ColorfulTheme::default();

        self.output.print(app.sorted())?;
        loop {
            println!();
            let choice = Select::with_theme(&theme)
                .with_prompt("Team vacations")
                .items(MenuItem::ALL.as_slice())
                .default(0)
                .interact_opt()?;

            match choice.map(|index| MenuItem::ALL[index]) {
                Some(MenuItem::AddVacation) => self.add_vacation(&mut app, &theme)?,
                Some(MenuItem::AddEmployee) => Self::add_employee(&mut app, &theme)?,
                Some(MenuItem::ShowVacations) => self.output.print(app.sorted())?,
                Some(MenuItem::Quit) | None => break,
            }
        }

        tracing::info!(vacations = app.store().len(), "Session ended");
        Ok(())
    }

    /// Walks through the vacation form, starting each prompt from the form's
    /// current value.
    fn add_vacation(&self, app: &mut App, theme: &ColorfulTheme) -> anyhow::Result<()> {
        let names: Vec<String> = app
            .roster()
            .names()
            .iter()
            .map(EmployeeName::to_string)
            .collect();
        if names.is_empty() {
            println!("{}", "No employees yet. Add an employee first.".muted());
            return Ok(());
        }

        let current = app
            .form()
            .employee()
            .and_then(|name| app.roster().position(name))
            .unwrap_or(0);
        let Some(index) = Select::with_theme(theme)
            .with_prompt("Employee")
            .items(names.as_slice())
            .default(current)
            .interact_opt()?
        else {
            return Ok(());
        };
        app.dispatch(Action::SelectEmployee(names[index].clone()));

        let current = app
            .form()
            .kind()
            .and_then(|kind| VacationType::ALL.iter().position(|k| *k == kind))
            .unwrap_or(0);
        let Some(index) = Select::with_theme(theme)
            .with_prompt("Vacation type")
            .items(VacationType::ALL.as_slice())
            .default(current)
            .interact_opt()?
        else {
            return Ok(());
        };
        app.dispatch(Action::SelectType(VacationType::ALL[index]));

        let start: String = Input::with_theme(theme)
            .with_prompt("Start date (YYYY-MM-DD)")
            .with_initial_text(app.form().start())
            .allow_empty(true)
            .interact_text()?;
        app.dispatch(Action::SetStartDate(start));

        let end: String = Input::with_theme(theme)
            .with_prompt("End date (YYYY-MM-DD)")
            .with_initial_text(app.form().end())
            .allow_empty(true)
            .interact_text()?;
        app.dispatch(Action::SetEndDate(end));

        match app.dispatch(Action::Submit) {
            Outcome::Submitted(id) => {
                if let Some(vacation) = app.store().get(id) {
                    println!(
                        "{}",
                        format!(
                            "✅ Recorded {} day(s) of {} vacation for {}",
                            vacation.duration(),
                            vacation.kind(),
                            vacation.employee()
                        )
                        .recorded()
                    );
                }
                self.output.print(app.sorted())?;
            }
            Outcome::Rejected(error) => {
                eprintln!("{}", format!("⚠️  {error}").rejected());
                eprintln!("{}", "Your entries are kept for the next attempt.".muted());
            }
            other => tracing::debug!("Unexpected outcome of submit: {other:?}"),
        }
        Ok(())
    }

    /// Opens the new-employee input and keeps it open until a name is added
    /// or the user cancels.
    fn add_employee(app: &mut App, theme: &ColorfulTheme) -> anyhow::Result<()> {
        app.dispatch(Action::OpenAddEmployee);

        loop {
            let name: String = Input::with_theme(theme)
                .with_prompt("New employee name")
                .with_initial_text(app.form().new_employee_name())
                .allow_empty(true)
                .interact_text()?;
            app.dispatch(Action::SetNewEmployeeName(name));

            let choice = Select::with_theme(theme)
                .items(SUBFORM_CHOICES.as_slice())
                .default(CONFIRM)
                .interact_opt()?;
            if choice != Some(CONFIRM) {
                app.dispatch(Action::CancelAddEmployee);
                return Ok(());
            }

            // A blank or repeated name leaves the input open without a message.
            if let Outcome::EmployeeAdded(name) = app.dispatch(Action::ConfirmAddEmployee) {
                println!(
                    "{}",
                    format!("✅ Added {name}, selected for the next vacation").recorded()
                );
                return Ok(());
            }
        }
    }
}
