use crate::{date::resolve_local, shared::period::PeriodUnit};
use chrono::{DateTime, Days, Months, TimeZone};
use serde::{Deserialize, Serialize};

/// A `ReminderSettings` describes how long before a medical event the owner
/// wants to be notified. The notification itself is sent by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    #[serde(rename = "reminderEnabled", default)]
    pub enabled: bool,
    /// Lead time, counted in `unit`s
    #[serde(rename = "reminderValue", default)]
    pub value: u32,
    #[serde(rename = "reminderUnit", default = "default_reminder_unit")]
    pub unit: PeriodUnit,
}

fn default_reminder_unit() -> PeriodUnit {
    PeriodUnit::Minute
}

/// A lead time the user can pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPreset {
    pub value: u32,
    pub unit: PeriodUnit,
    pub label: &'static str,
}

pub const REMINDER_PRESETS: [ReminderPreset; 3] = [
    ReminderPreset {
        value: 5,
        unit: PeriodUnit::Minute,
        label: "5 minutes",
    },
    ReminderPreset {
        value: 1,
        unit: PeriodUnit::Hour,
        label: "1 hour",
    },
    ReminderPreset {
        value: 1,
        unit: PeriodUnit::Day,
        label: "1 day",
    },
];

impl ReminderSettings {
    /// What gets submitted when the reminder toggle is off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            value: 0,
            unit: PeriodUnit::Minute,
        }
    }

    pub fn enabled(value: u32, unit: PeriodUnit) -> Self {
        Self {
            enabled: true,
            value,
            unit,
        }
    }

    pub fn from_preset(preset: &ReminderPreset) -> Self {
        Self::enabled(preset.value, preset.unit)
    }

    /// The form never sends a lead time for a disabled reminder
    pub fn normalized(self) -> Self {
        if self.enabled {
            self
        } else {
            Self::disabled()
        }
    }

    /// Label of the matching preset. Lead times that match no preset are
    /// shown as the first preset, like the form preselects it.
    pub fn lead_label(&self) -> &'static str {
        REMINDER_PRESETS
            .iter()
            .find(|p| p.value == self.value && p.unit == self.unit)
            .unwrap_or(&REMINDER_PRESETS[0])
            .label
    }

    /// When the owner should be notified about an event at `event_date`.
    /// Lead times of a day or longer are taken off the wall clock time.
    pub fn remind_at<Tz: TimeZone>(&self, event_date: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if !self.enabled {
            return None;
        }
        let local = event_date.naive_local();
        let at = match self.unit {
            PeriodUnit::Minute | PeriodUnit::Hour => {
                let lead = self.unit.fixed_duration(i64::from(self.value))?;
                return event_date.clone().checked_sub_signed(lead);
            }
            PeriodUnit::Day => local.checked_sub_days(Days::new(u64::from(self.value)))?,
            PeriodUnit::Week => local.checked_sub_days(Days::new(u64::from(self.value) * 7))?,
            PeriodUnit::Month => local.checked_sub_months(Months::new(self.value))?,
            PeriodUnit::Year => {
                let months = self.value.checked_mul(12)?;
                local.checked_sub_months(Months::new(months))?
            }
        };
        resolve_local(&event_date.timezone(), &at)
    }
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self::disabled()
    }
}
