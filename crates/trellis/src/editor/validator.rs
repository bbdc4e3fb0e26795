//! Input validation for text-based editors.
//!
//! Validators judge in-progress text while the user types. The three-state
//! result distinguishes text that is already a legal value
//! ([`Acceptable`](ValidationState::Acceptable)), text that could become one
//! with more keystrokes ([`Intermediate`](ValidationState::Intermediate)),
//! and text that can never become one
//! ([`Invalid`](ValidationState::Invalid)). Editors reject `Invalid`
//! keystrokes outright, allow `Intermediate` text to stand while editing,
//! and only commit `Acceptable` text.

/// The result of validating input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    /// The input is clearly invalid and cannot become valid with more typing.
    Invalid,
    /// The input is incomplete but could become valid with more typing.
    Intermediate,
    /// The input is valid and complete.
    Acceptable,
}

/// Trait for input validators.
pub trait Validator {
    /// Validate the given input string.
    fn validate(&self, input: &str) -> ValidationState;

    /// Attempt to fix up invalid input into something valid.
    ///
    /// Returns `None` when no sensible fixup exists.
    fn fixup(&self, _input: &str) -> Option<String> {
        None
    }
}

/// Validates floating-point input, optionally admitting a null spelling.
///
/// The numeric grammar is the usual optional sign, digits, and at most one
/// decimal point, plus an optional exponent once digits exist. On top of
/// that, when `nullable` is set, any text starting with `n` or `N` is
/// accepted as the null value: it lets the user type "None" (or just "n")
/// into a numeric cell to clear it.
#[derive(Debug, Clone)]
pub struct NullableDoubleValidator {
    minimum: f64,
    maximum: f64,
    nullable: bool,
}

impl Default for NullableDoubleValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl NullableDoubleValidator {
    /// Create an unbounded, nullable validator.
    pub fn new() -> Self {
        Self {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            nullable: true,
        }
    }

    /// Set the inclusive range.
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    /// Set whether a null spelling is accepted.
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

    /// Whether a null spelling is accepted.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the text is a prefix of a float literal (digits pending).
    fn is_numeric_prefix(input: &str) -> bool {
        matches!(input, "-" | "+" | "." | "-." | "+.")
            || (input.ends_with(['.', 'e', 'E', '-', '+']) && Self::is_float_grammar(input))
    }

    /// Loose grammar check: sign, digits, at most one dot, optional
    /// exponent. Allows trailing incomplete pieces; `parse` decides
    /// completeness.
    fn is_float_grammar(input: &str) -> bool {
        let mut chars = input.chars().peekable();
        if matches!(chars.peek(), Some('-' | '+')) {
            chars.next();
        }
        let mut seen_dot = false;
        let mut seen_exp = false;
        let mut prev: Option<char> = None;
        for c in chars {
            match c {
                '0'..='9' => {}
                '.' if !seen_dot && !seen_exp => seen_dot = true,
                'e' | 'E' if !seen_exp && prev.is_some_and(|p| p.is_ascii_digit()) => {
                    seen_exp = true
                }
                '-' | '+' if prev.is_some_and(|p| matches!(p, 'e' | 'E')) => {}
                _ => return false,
            }
            prev = Some(c);
        }
        true
    }
}

impl Validator for NullableDoubleValidator {
    fn validate(&self, input: &str) -> ValidationState {
        if input.is_empty() {
            return ValidationState::Intermediate;
        }
        // Null spelling: any n-prefixed text stands for the null value.
        if self.nullable && input.starts_with(['n', 'N']) {
            return ValidationState::Acceptable;
        }
        // A leading minus can never become valid over a non-negative range,
        // complete or not. Exponent signs ("1e-5") are unaffected.
        if input.starts_with('-') && self.minimum >= 0.0 {
            return ValidationState::Invalid;
        }
        if input == "-" {
            return ValidationState::Intermediate;
        }
        if Self::is_numeric_prefix(input) {
            return ValidationState::Intermediate;
        }
        if !Self::is_float_grammar(input) {
            return ValidationState::Invalid;
        }
        match input.parse::<f64>() {
            Ok(value) if value >= self.minimum && value <= self.maximum => {
                ValidationState::Acceptable
            }
            Ok(value) if value >= 0.0 && value < self.minimum => {
                // Typing "1" on the way to "15" must stay possible.
                ValidationState::Intermediate
            }
            _ => ValidationState::Invalid,
        }
    }

    fn fixup(&self, input: &str) -> Option<String> {
        if self.nullable && input.starts_with(['n', 'N']) {
            return Some("None".to_string());
        }
        let value: f64 = input.parse().ok()?;
        let clamped = value.clamp(self.minimum, self.maximum);
        Some(clamped.to_string())
    }
}
