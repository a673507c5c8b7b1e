use std::{io::Read, path::PathBuf};

use anyhow::Context;
use tracing::instrument;
use vacations::{app::parse_script, App, Config, Outcome};

use crate::cli::{table::Output, terminal::Styled};

#[derive(Debug, clap::Parser)]
pub struct Replay {
    /// The script to apply ('-' or omitted reads stdin)
    script: Option<PathBuf>,

    #[command(flatten)]
    output: Output,
}

impl Replay {
    #[instrument(skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let script = self.read_script()?;
        let actions = parse_script(&script)?;
        let mut app = App::from_config(config).context("Failed to load vacations on record")?;

        let mut submissions = 0;
        let mut rejected = 0;
        for action in actions {
            match app.dispatch(action) {
                Outcome::Submitted(id) => {
                    submissions += 1;
                    tracing::debug!(%id, "Submission {submissions} recorded");
                }
                Outcome::Rejected(error) => {
                    submissions += 1;
                    rejected += 1;
                    eprintln!(
                        "{}",
                        format!("⚠️  Submission {submissions} rejected: {error}").rejected()
                    );
                }
                Outcome::EmployeeAdded(name) => tracing::info!("Added employee {name}"),
                Outcome::Updated | Outcome::Ignored => {}
            }
        }

        self.output.print(app.sorted())?;

        if rejected > 0 {
            eprintln!(
                "{}",
                format!("{rejected} of {submissions} submission(s) rejected").muted()
            );
        }
        Ok(())
    }

    fn read_script(&self) -> anyhow::Result<String> {
        match &self.script {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            _ => {
                let mut script = String::new();
                std::io::stdin()
                    .read_to_string(&mut script)
                    .context("Failed to read actions from stdin")?;
                Ok(script)
            }
        }
    }
}
