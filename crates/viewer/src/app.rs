//! The viewer state machine.
//!
//! Every user action is a [`Message`]. [`App::update`] is the only way to
//! change state: it consumes the app and a message and returns the next app.
//! Errors never escape; they become the hint text.

use std::fmt;

use log::debug;
use optview_expr::Expression;

use crate::{
    Browser, Method, Preset, RunConfig, RunError, StartPoint,
    chart::{self, Chart, Curve, DEFAULT_RESOLUTION},
    recorder::{self, Recording},
};

pub const INITIAL_HINT: &str = "Select the function and the method.";
pub const OPTIMIZATION_DONE: &str = "Optimization done";
pub const ADVANCE_DONE: &str = "Advance done";
pub const BACKWARD_DONE: &str = "Backward done";
pub const EXPRESSION_VALID: &str = "Expression is valid";

/// The objective selected in the function selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionChoice {
    Preset(Preset),
    /// The expression typed in the custom field.
    Custom,
}

impl FunctionChoice {
    /// Every choice, in selector order.
    pub const ALL: [FunctionChoice; 3] = [
        FunctionChoice::Preset(Preset::Quadratic),
        FunctionChoice::Preset(Preset::Mixed),
        FunctionChoice::Custom,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Preset(preset) => preset.name(),
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for FunctionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    SelectFunction(FunctionChoice),
    SelectMethod(Method),
    EditCustom(String),
    SetLower(f64),
    SetUpper(f64),
    SetInitialPoint(f64),
    UseRandomStart(bool),
    SetSeed(u64),
    Validate,
    Optimize,
    Advance,
    Backward,
}

/// Which controls are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    /// The custom expression field and its Validate button.
    pub custom_expression: bool,
    /// Limits, start point, seed and the Optimize button.
    pub run_inputs: bool,
    /// Backward, Advance and the iteration counter.
    pub navigation: bool,
}

/// A completed run being browsed.
#[derive(Debug, Clone)]
pub struct Session {
    expression: Expression,
    curve: Curve,
    recording: Recording,
    browser: Browser,
}

impl Session {
    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    #[must_use]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    #[must_use]
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    #[must_use]
    pub fn browser(&self) -> &Browser {
        &self.browser
    }
}

/// The whole viewer state.
#[derive(Debug, Clone)]
pub struct App {
    function: Option<FunctionChoice>,
    method: Option<Method>,
    custom: String,
    lower: f64,
    upper: f64,
    initial_point: f64,
    random_start: bool,
    seed: u64,
    resolution: usize,
    hint: String,
    session: Option<Session>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            function: None,
            method: None,
            custom: String::new(),
            lower: -10.0,
            upper: 10.0,
            initial_point: 1.0,
            random_start: false,
            seed: 42,
            resolution: DEFAULT_RESOLUTION,
            hint: INITIAL_HINT.to_owned(),
            session: None,
        }
    }
}

impl App {
    /// Creates an app that samples the background curve at `resolution` points.
    #[must_use]
    pub fn with_resolution(resolution: usize) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    /// Applies one message and returns the next state.
    #[must_use]
    pub fn update(mut self, message: Message) -> Self {
        debug!("{message:?}");
        match message {
            Message::SelectFunction(choice) => {
                self.function = Some(choice);
                self.hint = format!("Selected function is {choice}. Now fix the limits.");
            }
            Message::SelectMethod(method) => {
                self.method = Some(method);
                self.hint = format!("Selected method is {method}");
            }
            Message::EditCustom(source) => self.custom = source,
            Message::SetLower(lower) => self.lower = lower,
            Message::SetUpper(upper) => self.upper = upper,
            Message::SetInitialPoint(x) => self.initial_point = x,
            Message::UseRandomStart(random) => self.random_start = random,
            Message::SetSeed(seed) => self.seed = seed,
            Message::Validate => {
                self.hint = match Expression::validate(&self.custom) {
                    Ok(_) => EXPRESSION_VALID.to_owned(),
                    Err(err) => err.to_string(),
                };
            }
            Message::Optimize => match self.optimize() {
                Ok(Some(session)) => {
                    self.session = Some(session);
                    self.hint = OPTIMIZATION_DONE.to_owned();
                }
                Ok(None) => self.hint = INITIAL_HINT.to_owned(),
                Err(err) => self.hint = err.hint(),
            },
            Message::Advance => {
                if let Some(session) = &mut self.session {
                    if session.browser.advance() {
                        self.hint = ADVANCE_DONE.to_owned();
                    }
                }
            }
            Message::Backward => {
                if let Some(session) = &mut self.session {
                    if session.browser.backward() {
                        self.hint = BACKWARD_DONE.to_owned();
                    }
                }
            }
        }
        self
    }

    /// Runs the selected method, or `None` if a selection is missing.
    fn optimize(&self) -> Result<Option<Session>, RunError> {
        let (Some(function), Some(method)) = (self.function, self.method) else {
            return Ok(None);
        };

        let expression = match function {
            FunctionChoice::Preset(preset) => preset.expression()?,
            FunctionChoice::Custom => Expression::validate(&self.custom)?,
        };
        let start = if self.random_start {
            StartPoint::Random { seed: self.seed }
        } else {
            StartPoint::Fixed(self.initial_point)
        };
        let config = RunConfig::new(self.lower, self.upper, start, method)?;
        let curve = Curve::sample(&expression, config.bounds(), self.resolution)?;
        let recording = recorder::run(&expression, &config)?;

        let Some(browser) = Browser::new(recording.evaluations().len()) else {
            return Ok(None);
        };
        Ok(Some(Session {
            expression,
            curve,
            recording,
            browser,
        }))
    }

    /// The chart for the current session.
    #[must_use]
    pub fn chart(&self) -> Option<Chart<'_>> {
        self.session.as_ref().map(|session| {
            let visible = session.browser.visible(session.recording.evaluations());
            chart::render(&session.curve, visible)
        })
    }

    /// The iteration counter: how many evaluations are visible.
    #[must_use]
    pub fn counter(&self) -> Option<usize> {
        self.session.as_ref().map(|session| session.browser.cursor())
    }

    #[must_use]
    pub fn controls(&self) -> Controls {
        Controls {
            custom_expression: self.function == Some(FunctionChoice::Custom),
            run_inputs: self.function.is_some(),
            navigation: self.session.is_some(),
        }
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn function(&self) -> Option<FunctionChoice> {
        self.function
    }

    #[must_use]
    pub fn method(&self) -> Option<Method> {
        self.method
    }

    #[must_use]
    pub fn custom(&self) -> &str {
        &self.custom
    }

    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn initial_point(&self) -> f64 {
        self.initial_point
    }

    #[must_use]
    pub fn random_start(&self) -> bool {
        self.random_start
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EQUAL_LIMITS, UNDER_DEVELOPMENT};

    fn ready(function: FunctionChoice, method: Method) -> App {
        App::with_resolution(50)
            .update(Message::SelectFunction(function))
            .update(Message::SelectMethod(method))
            .update(Message::SetLower(-5.0))
            .update(Message::SetUpper(5.0))
            .update(Message::SetInitialPoint(2.0))
    }

    #[test]
    fn starts_with_the_initial_hint() {
        let app = App::default();
        assert_eq!(app.hint(), INITIAL_HINT);
        assert_eq!(app.controls(), Controls::default());
        assert!(app.chart().is_none());
    }

    #[test]
    fn selections_update_the_hint() {
        let app = App::default().update(Message::SelectFunction(FunctionChoice::Preset(
            Preset::Mixed,
        )));
        assert_eq!(app.hint(), "Selected function is Mixed. Now fix the limits.");

        let app = app.update(Message::SelectMethod(Method::LBfgsB));
        assert_eq!(app.hint(), "Selected method is L-BFGS-B");
    }

    #[test]
    fn optimize_needs_a_function_and_a_method() {
        let app = App::default()
            .update(Message::SelectMethod(Method::NelderMead))
            .update(Message::Optimize);
        assert_eq!(app.hint(), INITIAL_HINT);
        assert!(app.session().is_none());
    }

    #[test]
    fn custom_field_is_shown_only_for_custom() {
        let app = App::default().update(Message::SelectFunction(FunctionChoice::Custom));
        assert!(app.controls().custom_expression);
        assert!(app.controls().run_inputs);

        let app = app.update(Message::SelectFunction(FunctionChoice::Preset(Preset::Quadratic)));
        assert!(!app.controls().custom_expression);
    }

    #[test]
    fn validate_reports_the_expression_error() {
        let app = App::default()
            .update(Message::SelectFunction(FunctionChoice::Custom))
            .update(Message::EditCustom("y + 1".into()))
            .update(Message::Validate);
        assert_eq!(app.hint(), "unknown variable `y`, only `x` is allowed");

        let app = app
            .update(Message::EditCustom("x^3 - x".into()))
            .update(Message::Validate);
        assert_eq!(app.hint(), EXPRESSION_VALID);
    }

    #[test]
    fn optimize_creates_a_session_at_the_end() {
        let app = ready(FunctionChoice::Preset(Preset::Quadratic), Method::NelderMead)
            .update(Message::Optimize);

        assert_eq!(app.hint(), OPTIMIZATION_DONE);
        let session = app.session().unwrap();
        let n = session.recording().evaluations().len();
        assert_eq!(app.counter(), Some(n));
        assert!(app.controls().navigation);

        let chart = app.chart().unwrap();
        assert_eq!(chart.markers.len(), n);
        assert_eq!(chart.title, chart::title(n));
    }

    #[test]
    fn navigation_moves_the_counter() {
        let app = ready(FunctionChoice::Preset(Preset::Quadratic), Method::Golden)
            .update(Message::Optimize);
        let n = app.counter().unwrap();

        let app = app.update(Message::Backward);
        assert_eq!(app.counter(), Some(n - 1));
        assert_eq!(app.hint(), BACKWARD_DONE);

        let app = app.update(Message::Advance);
        assert_eq!(app.counter(), Some(n));
        assert_eq!(app.hint(), ADVANCE_DONE);

        // At the end nothing moves and the hint stays.
        let app = app.update(Message::Advance);
        assert_eq!(app.counter(), Some(n));
        assert_eq!(app.hint(), ADVANCE_DONE);
    }

    #[test]
    fn equal_limits_keep_the_previous_session() {
        let app = ready(FunctionChoice::Preset(Preset::Quadratic), Method::NelderMead)
            .update(Message::Optimize);
        let before = app.counter();

        let app = app
            .update(Message::SetLower(1.0))
            .update(Message::SetUpper(1.0))
            .update(Message::Optimize);

        assert_eq!(app.hint(), EQUAL_LIMITS);
        assert_eq!(app.counter(), before);
    }

    #[test]
    fn unwired_methods_show_the_generic_hint() {
        let app = ready(FunctionChoice::Preset(Preset::Mixed), Method::Cobyla)
            .update(Message::Optimize);
        assert_eq!(app.hint(), UNDER_DEVELOPMENT);
        assert!(app.session().is_none());
    }

    #[test]
    fn invalid_custom_expressions_never_run() {
        let app = ready(FunctionChoice::Custom, Method::NelderMead)
            .update(Message::EditCustom("x +".into()))
            .update(Message::Optimize);
        assert!(app.hint().starts_with("syntax error"));
        assert!(app.session().is_none());
    }

    #[test]
    fn random_start_uses_the_seed() {
        let run = |seed| {
            ready(FunctionChoice::Preset(Preset::Quadratic), Method::NelderMead)
                .update(Message::UseRandomStart(true))
                .update(Message::SetSeed(seed))
                .update(Message::Optimize)
        };
        let first = |app: &App| app.session().unwrap().recording().evaluations()[0];

        assert_eq!(first(&run(7)), first(&run(7)));
        assert_ne!(first(&run(7)), first(&run(8)));
    }
}
