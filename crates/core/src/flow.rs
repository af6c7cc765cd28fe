//! Progress through the intake forms.
//!
//! The portal walks the patient through [`INTAKE_FORMS`] one at a time. Forms before the current
//! step are complete and may be reviewed, the current form may be opened, and later forms stay
//! locked until the ones before them are done.

use crate::constants::SECONDS_PER_REMAINING_FORM;
use crate::forms::{IntakeForm, INTAKE_FORMS};
use crate::{CheckinError, CheckinResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormStatus {
    Completed,
    Current,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowTransition {
    /// Continue with the form at this step.
    Next(usize),
    /// Every form is complete.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: usize,
    pub remaining_seconds: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinFlow {
    current_step: usize,
    forms: &'static [IntakeForm],
}

impl CheckinFlow {
    /// A flow over the standard intake forms. Steps past the end are clamped to "all complete".
    pub fn new(current_step: usize) -> Self {
        Self::over(INTAKE_FORMS, current_step)
    }

    pub fn over(forms: &'static [IntakeForm], current_step: usize) -> Self {
        Self {
            current_step: current_step.min(forms.len()),
            forms,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn forms(&self) -> &'static [IntakeForm] {
        self.forms
    }

    pub fn total(&self) -> usize {
        self.forms.len()
    }

    pub fn status(&self, index: usize) -> FormStatus {
        match index.cmp(&self.current_step) {
            std::cmp::Ordering::Less => FormStatus::Completed,
            std::cmp::Ordering::Equal => FormStatus::Current,
            std::cmp::Ordering::Greater => FormStatus::Locked,
        }
    }

    /// The form at `index`, if the patient may open it.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::UnknownForm` for an index past the catalogue and
    /// `CheckinError::FormLocked` for a form after the current step.
    pub fn open(&self, index: usize) -> CheckinResult<&'static IntakeForm> {
        let form = self
            .forms
            .get(index)
            .ok_or(CheckinError::UnknownForm(index))?;
        if self.status(index) == FormStatus::Locked {
            return Err(CheckinError::FormLocked {
                index,
                current_step: self.current_step,
            });
        }
        Ok(form)
    }

    /// Where to go once the form at `step` is marked complete.
    ///
    /// Completing an earlier form while reviewing it moves to the step after that form.
    pub fn complete(&self, step: usize) -> FlowTransition {
        let next = step.saturating_add(1);
        if next < self.total() {
            FlowTransition::Next(next)
        } else {
            FlowTransition::Finished
        }
    }

    pub fn progress(&self) -> Progress {
        let total = self.total();
        let completed = self.current_step;
        let percent = if total == 0 {
            100
        } else {
            completed * 100 / total
        };
        Progress {
            completed,
            total,
            percent,
            remaining_seconds: total.saturating_sub(completed) * SECONDS_PER_REMAINING_FORM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_split_on_current_step() {
        let flow = CheckinFlow::new(2);
        assert_eq!(flow.status(0), FormStatus::Completed);
        assert_eq!(flow.status(1), FormStatus::Completed);
        assert_eq!(flow.status(2), FormStatus::Current);
        assert_eq!(flow.status(3), FormStatus::Locked);
    }

    #[test]
    fn locked_and_unknown_forms_cannot_be_opened() {
        let flow = CheckinFlow::new(1);

        assert_eq!(flow.open(0).unwrap().name, "Patient Demographics");
        assert_eq!(flow.open(1).unwrap().name, "Emergency Contact");
        assert!(matches!(
            flow.open(2),
            Err(CheckinError::FormLocked {
                index: 2,
                current_step: 1,
            })
        ));
        assert!(matches!(flow.open(99), Err(CheckinError::UnknownForm(99))));
    }

    #[test]
    fn completing_last_form_finishes() {
        let flow = CheckinFlow::new(0);
        assert_eq!(flow.complete(0), FlowTransition::Next(1));
        assert_eq!(flow.complete(4), FlowTransition::Next(5));
        assert_eq!(flow.complete(5), FlowTransition::Finished);
    }

    #[test]
    fn completing_out_of_range_step_finishes() {
        let flow = CheckinFlow::new(3);
        assert_eq!(flow.complete(6), FlowTransition::Finished);
        assert_eq!(flow.complete(usize::MAX), FlowTransition::Finished);
    }

    #[test]
    fn progress_counts_down_remaining_time() {
        let progress = CheckinFlow::new(2).progress();
        assert_eq!(
            progress,
            Progress {
                completed: 2,
                total: 6,
                percent: 33,
                remaining_seconds: 4 * 45,
            }
        );

        let start = CheckinFlow::new(0).progress();
        assert_eq!(start.remaining_seconds, 270);
        assert_eq!(start.percent, 0);
    }

    #[test]
    fn step_is_clamped_to_catalogue() {
        let flow = CheckinFlow::new(40);
        assert_eq!(flow.current_step(), 6);
        assert_eq!(flow.progress().remaining_seconds, 0);
        assert_eq!(flow.progress().percent, 100);
        assert!(flow.open(5).is_ok());
    }

    #[test]
    fn empty_catalogue_is_finished() {
        let flow = CheckinFlow::over(&[], 0);
        assert_eq!(flow.complete(0), FlowTransition::Finished);
        assert_eq!(flow.progress().percent, 100);
    }
}
