//! Form state for the classification view.
//!
//! A `Session` lives as long as the form view is shown. Leaving the view
//! calls [`Session::reset`], which also invalidates any request still in
//! flight.

use crate::domain::{ClassificationRequest, ClassificationResult, Field, FormInput};
use crate::error::SubmitError;

/// What the form is currently showing. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Ready(ClassificationResult),
}

/// Identifies one submission; stale tickets are ignored on settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default)]
pub struct Session {
    input: FormInput,
    phase: Phase,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match &self.phase {
            Phase::Ready(result) => Some(result),
            _ => None,
        }
    }

    /// Replace one field's text. Any displayed error is cleared, whatever
    /// the new value is; validation waits for submission.
    pub fn on_field_change(&mut self, field: Field, value: impl Into<String>) {
        self.input.set(field, value.into());
        if matches!(self.phase, Phase::Failed(_)) {
            self.phase = Phase::Idle;
        }
    }

    /// Append one typed character to a field.
    pub fn push_char(&mut self, field: Field, c: char) {
        let mut value = self.input.get(field).to_string();
        value.push(c);
        self.on_field_change(field, value);
    }

    /// Remove the last character of a field.
    pub fn pop_char(&mut self, field: Field) {
        let mut value = self.input.get(field).to_string();
        value.pop();
        self.on_field_change(field, value);
    }

    /// Validate the current input into a request.
    ///
    /// Empty (or whitespace-only) fields are missing; `"0"` is a valid value.
    /// Non-finite numbers (`NaN`, `inf`) are rejected like any other
    /// unparseable text.
    pub fn to_request(&self) -> Result<ClassificationRequest, SubmitError> {
        if Field::ALL.iter().any(|&f| self.input.get(f).trim().is_empty()) {
            return Err(SubmitError::MissingFields);
        }
        Ok(ClassificationRequest {
            orbital_period: parse_field(&self.input, Field::OrbitalPeriod)?,
            transit_duration: parse_field(&self.input, Field::TransitDuration)?,
            planetary_radius: parse_field(&self.input, Field::PlanetaryRadius)?,
        })
    }

    /// Record a validation failure without touching the network.
    pub(crate) fn reject(&mut self, err: &SubmitError) {
        self.phase = Phase::Failed(err.user_message());
    }

    /// Enter `Loading`, dropping any previous error or result.
    pub(crate) fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.phase = Phase::Loading;
        Ticket(self.generation)
    }

    /// Settle the submission identified by `ticket`.
    ///
    /// Returns `false` (and changes nothing) when the ticket is stale, i.e.
    /// the session was reset or another submission started since.
    pub(crate) fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<ClassificationResult, SubmitError>,
    ) -> bool {
        if ticket.0 != self.generation || !self.is_loading() {
            return false;
        }
        self.phase = match outcome {
            Ok(result) => Phase::Ready(result),
            Err(err) => Phase::Failed(err.user_message()),
        };
        true
    }

    /// Clear everything, as when the form view is left.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.input = FormInput::default();
        self.phase = Phase::Idle;
    }
}

fn parse_field(input: &FormInput, field: Field) -> Result<f64, SubmitError> {
    let raw = input.get(field).trim();
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SubmitError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}
