//! Polygon-drawing interaction state machine.
//!
//! The state is a plain value; every user gesture or network callback is an
//! event, and [`LabelingState::apply`] returns the next state together with
//! the outbound submission (if the event produced one). Rendering code never
//! mutates the state directly.

use crate::messages;
use crate::models::{default_variety, GeoPoint, LabelingRequest, MIN_POLYGON_VERTICES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Drawing,
}

/// Attribute fields exactly as the user typed or selected them.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeInputs {
    pub variety: String,
    pub min_age: String,
    pub max_age: String,
}

impl Default for AttributeInputs {
    fn default() -> Self {
        AttributeInputs {
            variety: default_variety(),
            min_age: String::new(),
            max_age: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LabelingEvent {
    StartLabeling,
    MapClicked(GeoPoint),
    VarietySelected(String),
    MinAgeChanged(String),
    MaxAgeChanged(String),
    Cancel,
    Submit,
    /// Outcome of the submission request: the raw acknowledgment body or an error message.
    SubmissionFinished(Result<String, String>),
    DismissNotice,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelingState {
    pub mode: Mode,
    pub vertices: Vec<GeoPoint>,
    pub attributes: AttributeInputs,
    pub notice: Option<String>,
    pub submission_in_flight: bool,
}

impl LabelingState {
    pub fn is_drawing(&self) -> bool {
        self.mode == Mode::Drawing
    }

    /// Whether the overlay should fill the polygon (enough vertices to enclose an area).
    pub fn has_area(&self) -> bool {
        self.vertices.len() >= MIN_POLYGON_VERTICES
    }

    pub fn can_submit(&self) -> bool {
        self.is_drawing() && !self.submission_in_flight
    }

    pub fn apply(&self, event: LabelingEvent) -> (LabelingState, Option<LabelingRequest>) {
        let mut next = self.clone();
        let mut outbound = None;

        match event {
            LabelingEvent::StartLabeling => {
                next.mode = Mode::Drawing;
                next.vertices.clear();
            }
            LabelingEvent::MapClicked(point) => {
                if next.is_drawing() {
                    next.vertices.push(point);
                }
            }
            LabelingEvent::VarietySelected(variety) => next.attributes.variety = variety,
            LabelingEvent::MinAgeChanged(text) => next.attributes.min_age = text,
            LabelingEvent::MaxAgeChanged(text) => next.attributes.max_age = text,
            LabelingEvent::Cancel => {
                next.mode = Mode::Idle;
                next.vertices.clear();
            }
            LabelingEvent::Submit => {
                if !next.can_submit() {
                    return (next, None);
                }
                if next.vertices.len() < MIN_POLYGON_VERTICES {
                    // Stay in Drawing so the user can keep tapping.
                    next.notice = Some(messages::NEED_MORE_POINTS.to_string());
                    next.vertices.clear();
                } else {
                    outbound = Some(LabelingRequest::new(
                        &next.vertices,
                        &next.attributes.variety,
                        parse_age(&next.attributes.min_age),
                        parse_age(&next.attributes.max_age),
                    ));
                    next.mode = Mode::Idle;
                    next.vertices.clear();
                    next.submission_in_flight = true;
                }
            }
            LabelingEvent::SubmissionFinished(result) => {
                next.submission_in_flight = false;
                next.notice = Some(match result {
                    Ok(body) => body,
                    Err(message) => messages::submission_failed(&message),
                });
            }
            LabelingEvent::DismissNotice => next.notice = None,
        }

        (next, outbound)
    }
}

/// Parse an age field with leading-integer semantics.
///
/// Leading whitespace and a single sign are accepted, then as many digits as
/// follow; anything after the digits is ignored. Returns `None` when no digit
/// is found or the value overflows.
pub fn parse_age(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }
    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}
