mod event;
mod next_date;
mod pet;

use crate::{cli::Commands, config::Config};
use petcare_sdk::{PetcareSDK, Recurrence, Tz};

/// What every command gets to work with
pub struct Context {
    pub sdk: PetcareSDK,
    pub timezone: Tz,
}

impl Context {
    pub fn new(config: &Config) -> Self {
        Self {
            sdk: PetcareSDK::new(config.base_url.clone()),
            timezone: config.timezone,
        }
    }
}

pub async fn run(command: Commands, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Commands::Pet { command } => pet::run(command, ctx).await,
        Commands::Event { command } => event::run(command, ctx).await,
        Commands::NextDate {
            date,
            time,
            unit,
            value,
        } => {
            let next = next_date::next_date(
                &date,
                &time,
                Recurrence::new(value, unit),
                &ctx.timezone,
            )?;
            println!("{}", next);
            Ok(())
        }
    }
}
