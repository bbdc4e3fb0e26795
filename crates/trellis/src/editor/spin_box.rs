//! A numeric stepper that can also hold "no value".
//!
//! [`NullableSpinBox`] behaves like an ordinary double spin box over an
//! inclusive range, with one extra state: null. Null is held internally as
//! a sentinel *below* the representable range, is exempt from clamping, and
//! renders as the text `None`. Typing any `n`-prefixed text (or clearing
//! the field) commits null; typing a number commits that number, clamped
//! into range.

use trellis_core::Signal;

use super::validator::NullableDoubleValidator;

/// Internal stand-in for the null state.
///
/// Chosen below every representable value so it can never collide with a
/// real entry, and deliberately exempt from range clamping.
const NULL_SENTINEL: f64 = f64::NEG_INFINITY;

/// How many steps the default increment divides a bounded range into.
const DEFAULT_RANGE_STEPS: f64 = 20.0;

/// A spin box over `Option<f64>`.
///
/// # Example
///
/// ```
/// use trellis::editor::NullableSpinBox;
///
/// let mut spin = NullableSpinBox::new().with_range(0.0, 1.0);
/// spin.set_value(Some(0.4));
/// assert_eq!(spin.text(), "0.4");
///
/// spin.set_value(None);
/// assert_eq!(spin.text(), "None");
///
/// // Stepping out of the null state starts from the minimum.
/// spin.step_up();
/// assert_eq!(spin.value(), Some(0.05));
/// ```
pub struct NullableSpinBox {
    raw: f64,
    minimum: f64,
    maximum: f64,
    single_step: Option<f64>,
    nullable: bool,
    /// Emitted whenever the held value actually changes.
    pub value_changed: Signal<Option<f64>>,
}

impl Default for NullableSpinBox {
    fn default() -> Self {
        Self::new()
    }
}

impl NullableSpinBox {
    /// Create an unbounded, nullable spin box holding null.
    pub fn new() -> Self {
        Self {
            raw: NULL_SENTINEL,
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            single_step: None,
            nullable: true,
            value_changed: Signal::new(),
        }
    }

    /// Set the inclusive range. The current value is re-clamped.
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        if self.raw != NULL_SENTINEL {
            self.raw = self.raw.clamp(minimum, maximum);
        }
        self
    }

    /// Set an explicit step size, overriding the range-derived default.
    pub fn with_single_step(mut self, step: f64) -> Self {
        self.single_step = Some(step);
        self
    }

    /// Set whether the null state is reachable from user input.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// The lower bound.
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// The upper bound.
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Whether the null state is reachable from user input.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The held value; `None` is the null state.
    pub fn value(&self) -> Option<f64> {
        if self.raw == NULL_SENTINEL {
            None
        } else {
            Some(self.raw)
        }
    }

    /// Store a value.
    ///
    /// Numbers are clamped into range; null bypasses clamping entirely.
    /// Emits [`value_changed`](Self::value_changed) when the stored value
    /// actually changes.
    pub fn set_value(&mut self, value: Option<f64>) {
        let raw = match value {
            Some(v) => v.clamp(self.minimum, self.maximum),
            None => NULL_SENTINEL,
        };
        if raw == self.raw || (raw.is_nan() && self.raw.is_nan()) {
            return;
        }
        self.raw = raw;
        tracing::trace!(
            target: "trellis::editor",
            value = %self.text(),
            "spin box value changed"
        );
        self.value_changed.emit(self.value());
    }

    /// The effective step size.
    ///
    /// An explicit step wins; otherwise a bounded range is divided into
    /// twenty steps; an unbounded one steps by 1.
    pub fn single_step(&self) -> f64 {
        if let Some(step) = self.single_step {
            return step;
        }
        if self.minimum.is_finite() && self.maximum.is_finite() {
            (self.maximum - self.minimum) / DEFAULT_RANGE_STEPS
        } else {
            1.0
        }
    }

    /// Increment by one step. Stepping out of null starts at the minimum.
    pub fn step_up(&mut self) {
        self.step_by(1.0);
    }

    /// Decrement by one step. Stepping out of null starts at the minimum.
    pub fn step_down(&mut self) {
        self.step_by(-1.0);
    }

    fn step_by(&mut self, direction: f64) {
        let base = match self.value() {
            Some(v) => v,
            // Leaving the null state lands on the range floor, so the
            // first visible value after "None" is predictable.
            None if self.minimum.is_finite() => {
                self.set_value(Some(self.minimum + direction.max(0.0) * self.single_step()));
                return;
            }
            None => 0.0,
        };
        self.set_value(Some(base + direction * self.single_step()));
    }

    /// The display text for the current value.
    pub fn text(&self) -> String {
        match self.value() {
            Some(v) => v.to_string(),
            None => "None".to_string(),
        }
    }

    /// Interpret editor text without committing it.
    ///
    /// Returns `Some(parsed)` when the text denotes a value this spin box
    /// can hold (`Some(None)` is the null state), or `None` when the text
    /// is not committable.
    pub fn interpret_text(&self, text: &str) -> Option<Option<f64>> {
        let trimmed = text.trim();
        if self.nullable && (trimmed.is_empty() || trimmed.starts_with(['n', 'N'])) {
            return Some(None);
        }
        let value: f64 = trimmed.parse().ok()?;
        // Non-finite input is never committable: negative infinity is the
        // internal null stand-in, and infinities have no stable text form.
        if !value.is_finite() {
            return None;
        }
        Some(Some(value))
    }

    /// Parse and commit editor text. Returns `true` if the text was
    /// committable.
    pub fn commit_text(&mut self, text: &str) -> bool {
        match self.interpret_text(text) {
            Some(value) => {
                self.set_value(value);
                true
            }
            None => false,
        }
    }

    /// A validator matching this spin box's range and nullability.
    pub fn validator(&self) -> NullableDoubleValidator {
        NullableDoubleValidator::new()
            .with_range(self.minimum, self.maximum)
            .with_nullable(self.nullable)
    }
}
