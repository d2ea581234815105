use clap::Parser;

use crate::{App, FunctionChoice, Message, Method, Preset, chart::DEFAULT_RESOLUTION};

/// Step through the evaluations of a bounded single-variable minimizer.
///
/// Every value only pre-populates the window; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "optview", version, about)]
pub struct Settings {
    /// Objective: `quadratic`, `mixed`, or an expression in `x`
    #[arg(short, long, value_name = "FUNCTION")]
    pub function: Option<String>,

    /// Optimizer name, e.g. `Nelder-Mead`, `L-BFGS-B` or `Golden`
    #[arg(short, long, value_name = "NAME")]
    pub method: Option<Method>,

    /// Lower limit of the search interval
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    pub lower: f64,

    /// Upper limit of the search interval
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub upper: f64,

    /// Initial point
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub start: f64,

    /// Draw the initial point at random with this seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of points sampled for the function curve
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    pub resolution: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            function: None,
            method: None,
            lower: -10.0,
            upper: 10.0,
            start: 1.0,
            seed: None,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl Settings {
    /// The messages that bring a fresh app to these settings.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = vec![
            Message::SetLower(self.lower),
            Message::SetUpper(self.upper),
            Message::SetInitialPoint(self.start),
        ];
        if let Some(seed) = self.seed {
            messages.push(Message::UseRandomStart(true));
            messages.push(Message::SetSeed(seed));
        }
        if let Some(function) = &self.function {
            match function.parse::<Preset>() {
                Ok(preset) => {
                    messages.push(Message::SelectFunction(FunctionChoice::Preset(preset)));
                }
                Err(_) => {
                    messages.push(Message::SelectFunction(FunctionChoice::Custom));
                    messages.push(Message::EditCustom(function.clone()));
                }
            }
        }
        if let Some(method) = self.method {
            messages.push(Message::SelectMethod(method));
        }
        messages
    }
}

impl App {
    /// Creates an app pre-populated from command-line settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        settings
            .messages()
            .into_iter()
            .fold(App::with_resolution(settings.resolution), App::update)
    }
}
