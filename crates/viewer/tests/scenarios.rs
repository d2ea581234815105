use approx::assert_relative_eq;
use optview::{
    App, Browser, ConfigurationError, FunctionChoice, Message, Method, MethodOptions, Preset,
    RunConfig, RunError, StartPoint, run,
};
use optview_expr::{Expression, ExpressionError};
use proptest::prelude::*;

fn quadratic() -> Expression {
    Expression::validate("x^2").unwrap()
}

#[test]
fn quadratic_nelder_mead_round_trip() {
    let expr = quadratic();
    let config = RunConfig::new(-5.0, 5.0, StartPoint::Fixed(0.0), Method::NelderMead).unwrap();

    let recording = run(&expr, &config).unwrap();

    let evaluations = recording.evaluations();
    assert!(!evaluations.is_empty());
    let last = evaluations[evaluations.len() - 1];
    assert!((-5.0..=5.0).contains(&last.x));
    for record in evaluations.iter().chain(recording.iterations()) {
        assert_relative_eq!(record.y, record.x * record.x, epsilon = 1e-12);
    }
}

#[test]
fn every_wired_method_logs_at_least_one_evaluation_per_iteration() {
    let expr = Preset::Mixed.expression().unwrap();
    for method in Method::ALL.into_iter().filter(|m| m.is_wired()) {
        let config = RunConfig::new(-10.0, 10.0, StartPoint::Fixed(3.0), method).unwrap();
        let recording = run(&expr, &config).unwrap();

        assert!(!recording.iterations().is_empty(), "{method}");
        assert!(
            recording.evaluations().len() >= recording.iterations().len(),
            "{method}"
        );
        let x = recording.outcome().x;
        assert!((-10.0..=10.0).contains(&x), "{method}: {x}");
    }
}

#[test]
fn powell_starts_from_the_initial_point() {
    let expr = Preset::Mixed.expression().unwrap();
    let log = |x0: f64| {
        let config = RunConfig::new(-10.0, 10.0, StartPoint::Fixed(x0), Method::Powell).unwrap();
        let recording = run(&expr, &config).unwrap();
        assert!(recording.evaluations().iter().any(|record| record.x == x0));
        recording.evaluations().to_vec()
    };

    assert_ne!(log(-6.0), log(4.0));

    let seeded = |seed| {
        let config =
            RunConfig::new(-10.0, 10.0, StartPoint::Random { seed }, Method::Powell).unwrap();
        run(&expr, &config).unwrap().evaluations().to_vec()
    };
    assert_eq!(seeded(3), seeded(3));
    assert_ne!(seeded(3), seeded(4));
}

#[test]
fn lbfgsb_stays_inside_tight_bounds() {
    let expr = Expression::validate("sqrt(x) + 1").unwrap();
    let config = RunConfig::new(0.0, 1e-9, StartPoint::Fixed(5e-10), Method::LBfgsB).unwrap();

    let recording = run(&expr, &config).unwrap();
    assert!(
        recording
            .evaluations()
            .iter()
            .all(|record| (0.0..=1e-9).contains(&record.x))
    );
    assert_relative_eq!(recording.outcome().x, 0.0);
}

#[test]
fn equal_limits_are_rejected_before_running() {
    let result = RunConfig::new(3.0, 3.0, StartPoint::Fixed(3.0), Method::NelderMead);
    assert_eq!(result, Err(ConfigurationError::EqualLimits));

    let app = App::default()
        .update(Message::SelectFunction(FunctionChoice::Preset(Preset::Quadratic)))
        .update(Message::SelectMethod(Method::NelderMead))
        .update(Message::SetLower(3.0))
        .update(Message::SetUpper(3.0))
        .update(Message::Optimize);

    assert_eq!(app.hint(), "Limits must have different values.");
    assert!(app.session().is_none());
    assert!(app.chart().is_none());
}

#[test]
fn navigating_twelve_evaluations() {
    // Golden section evaluates two interior points, then one per iteration.
    let mut options = MethodOptions::defaults(Method::Golden);
    options.set("maxiter", 10.0).unwrap();
    let config = RunConfig::new(-5.0, 5.0, StartPoint::Fixed(0.0), Method::Golden)
        .unwrap()
        .with_options(options);
    let recording = run(&quadratic(), &config).unwrap();
    assert_eq!(recording.evaluations().len(), 12);

    let mut browser = Browser::new(recording.evaluations().len()).unwrap();
    for _ in 0..20 {
        browser.advance();
    }
    assert_eq!(browser.cursor(), 12);
    for _ in 0..20 {
        browser.backward();
    }
    assert_eq!(browser.cursor(), 1);
    assert_eq!(
        browser.highlighted(recording.evaluations()),
        recording.evaluations().first()
    );
}

#[test]
fn invalid_expression_never_reaches_the_minimizer() {
    assert!(matches!(
        Expression::validate("x +"),
        Err(ExpressionError::Syntax { .. })
    ));

    let app = App::default()
        .update(Message::SelectFunction(FunctionChoice::Custom))
        .update(Message::SelectMethod(Method::NelderMead))
        .update(Message::EditCustom("x +".into()))
        .update(Message::Optimize);
    assert!(app.session().is_none());
}

#[test]
fn unwired_method_reports_under_development() {
    let config = RunConfig::new(-1.0, 1.0, StartPoint::Fixed(0.0), Method::Dogleg).unwrap();
    let err = run(&quadratic(), &config).unwrap_err();

    assert!(matches!(err, RunError::Optimization(_)));
    assert_eq!(
        err.hint(),
        "Sorry, currently it is under development, please choose another method"
    );
}

#[test]
fn browsing_a_session_redraws_the_chart() {
    let app = App::with_resolution(100)
        .update(Message::SelectFunction(FunctionChoice::Preset(Preset::Mixed)))
        .update(Message::SelectMethod(Method::LBfgsB))
        .update(Message::SetLower(-4.0))
        .update(Message::SetUpper(4.0))
        .update(Message::SetInitialPoint(1.0))
        .update(Message::Optimize);
    let n = app.counter().unwrap();
    assert!(n >= 2);

    let app = app.update(Message::Backward);
    let chart = app.chart().unwrap();
    assert_eq!(chart.markers.len(), n - 1);
    assert_eq!(chart.title, format!("Optimization Iteration Nº = {}", n - 1));
    assert_eq!(chart.curve.points().count(), 100);
}

proptest! {
    #[test]
    fn cursor_never_leaves_its_range(
        moves in proptest::collection::vec(any::<bool>(), 0..100),
    ) {
        let app = App::default()
            .update(Message::SelectFunction(FunctionChoice::Preset(Preset::Quadratic)))
            .update(Message::SelectMethod(Method::Golden))
            .update(Message::Optimize);
        let n = app.counter().unwrap();

        let app = moves.into_iter().fold(app, |app, forward| {
            app.update(if forward { Message::Advance } else { Message::Backward })
        });
        let cursor = app.counter().unwrap();
        prop_assert!((1..=n).contains(&cursor));
    }

    #[test]
    fn evaluation_is_deterministic(x in -100.0..100.0_f64) {
        let expr = Preset::Mixed.expression().unwrap();
        prop_assert_eq!(expr.evaluate(&[x]), expr.evaluate(&[x]));
    }
}
