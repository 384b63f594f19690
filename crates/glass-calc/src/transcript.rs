//! Session transcripts
//!
//! An ordered record of every input a driver received and the output fields
//! that followed it. Serializes to JSON for tooling and renders as an
//! aligned text table for humans.

use serde::{Deserialize, Serialize};

use crate::core::state::{CalculatorState, Event, Phase};

/// One recorded input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptStep {
    /// The input as given to the driver
    pub input: String,
    /// The event it produced; `None` when the input was not recognised
    pub event: Option<Event>,
    /// Entry line after the input
    pub display: String,
    /// Operation trace after the input
    pub previous_display: String,
    /// Phase after the input
    pub phase: Phase,
}

/// Ordered list of recorded inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    steps: Vec<TranscriptStep>,
}

impl Transcript {
    /// Creates an empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Records an input and the state that followed it
    pub fn record(&mut self, input: &str, event: Option<Event>, state: &CalculatorState) {
        self.steps.push(TranscriptStep {
            input: input.to_string(),
            event,
            display: state.display().to_string(),
            previous_display: state.previous_display().to_string(),
            phase: state.phase(),
        });
    }

    /// All recorded steps, oldest first
    #[must_use]
    pub fn steps(&self) -> &[TranscriptStep] {
        &self.steps
    }

    /// Number of recorded steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The most recent step
    #[must_use]
    pub fn last(&self) -> Option<&TranscriptStep> {
        self.steps.last()
    }

    /// Entry line after the most recent step
    #[must_use]
    pub fn final_display(&self) -> Option<&str> {
        self.last().map(|step| step.display.as_str())
    }

    /// Number of inputs that were not recognised
    #[must_use]
    pub fn ignored_count(&self) -> usize {
        self.steps.iter().filter(|step| step.event.is_none()).count()
    }

    /// Drops every recorded step
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Serializes the transcript as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Renders one line per step: input, trace, entry line, phase
    #[must_use]
    pub fn render_text(&self) -> String {
        let input_width = self
            .steps
            .iter()
            .map(|step| step.input.chars().count())
            .max()
            .unwrap_or(0);
        let trace_width = self
            .steps
            .iter()
            .map(|step| step.previous_display.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for step in &self.steps {
            let marker = if step.event.is_some() { ' ' } else { '?' };
            out.push_str(&format!(
                "{marker}{:<input_width$} | {:>trace_width$} | {} [{}]\n",
                step.input, step.previous_display, step.display, step.phase
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{transition, Digit};
    use crate::core::Operator;

    fn sample() -> Transcript {
        let mut transcript = Transcript::new();
        let mut state = CalculatorState::new();
        for (input, event) in [
            ("7", Some(Event::Digit(Digit::ALL[7]))),
            ("+", Some(Event::Operator(Operator::Add))),
            ("Tab", None),
            ("3", Some(Event::Digit(Digit::ALL[3]))),
            ("Enter", Some(Event::Equals)),
        ] {
            if let Some(event) = event {
                state = transition(&state, event);
            }
            transcript.record(input, event, &state);
        }
        transcript
    }

    #[test]
    fn test_transcript_new_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.final_display(), None);
    }

    #[test]
    fn test_transcript_records_steps() {
        let transcript = sample();
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript.ignored_count(), 1);
        assert_eq!(transcript.steps()[1].previous_display, "7 +");
        assert_eq!(transcript.steps()[1].phase, Phase::PendingOperator);
        assert_eq!(transcript.final_display(), Some("10"));
    }

    #[test]
    fn test_transcript_clear() {
        let mut transcript = sample();
        transcript.clear();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_transcript_json_roundtrip() {
        let transcript = sample();
        let json = transcript.to_json().unwrap();
        assert!(json.contains("\"previous_display\": \"7 + 3 =\""));
        let back: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(back, transcript);
    }

    #[test]
    fn test_transcript_render_text() {
        let text = sample().render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with('?'));
        assert!(lines[4].ends_with("7 + 3 = | 10 [idle]"));
    }
}
