//! Punch submission seam.
//!
//! The actual site interaction (login, geolocation, pressing the punch
//! button, confirming the new record appeared) is an external
//! collaborator; this module only defines the boundary: attempt one
//! punch, report a confirmed boolean. A failed or unconfirmed attempt
//! leaves the ledger untouched and the next tick re-evaluates.

use std::process::Command;

use log::info;
use timeclock_core::storage::SubmitConfig;
use timeclock_core::PunchKind;

pub trait PunchSubmitter {
    /// Attempt to submit a punch of `kind`. `Ok(true)` only when the
    /// collaborator confirmed the punch landed.
    fn submit(&self, kind: PunchKind) -> Result<bool, Box<dyn std::error::Error>>;
}

/// Runs the configured external command with `TIMECLOCK_PUNCH_KIND`
/// set; exit status zero is the confirmation signal.
pub struct CommandSubmitter {
    command: String,
}

impl CommandSubmitter {
    pub fn from_config(config: &SubmitConfig) -> Result<Self, Box<dyn std::error::Error>> {
        match &config.command {
            Some(command) if !command.trim().is_empty() => Ok(Self {
                command: command.clone(),
            }),
            _ => Err(
                "submit.command is not configured; \
                 set it with `timeclock-cli config set submit.command <cmd>`"
                    .into(),
            ),
        }
    }
}

impl PunchSubmitter for CommandSubmitter {
    fn submit(&self, kind: PunchKind) -> Result<bool, Box<dyn std::error::Error>> {
        info!("running submit command for {kind}");
        let status = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .env("TIMECLOCK_PUNCH_KIND", kind.as_str())
            .status()?;
        Ok(status.success())
    }
}
