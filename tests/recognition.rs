//! End-to-end recognition tests over built automata.

use adaptive_automata::builder::{AutomatonBuilder, TransitionBuilder};
use adaptive_automata::core::{Outcome, TransitionTable};
use adaptive_automata::engine::{AdaptiveAutomaton, RecognizerConfig};
use adaptive_automata::error::{ActionError, QueryError, RecognitionError};
use adaptive_automata::query::{ActionQuery, Pattern, Role, Variable};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn s(name: &str) -> String {
    name.to_string()
}

fn chars(input: &str) -> Vec<char> {
    input.chars().collect()
}

/// Accepts exactly "ab". Both post actions leave the table alone.
fn regular() -> AdaptiveAutomaton<String, char> {
    AutomatonBuilder::new()
        .submachine("Main", s("q0"), [s("q0"), s("q1"), s("q2")], [s("q2")])
        .main("Main")
        .transition(TransitionBuilder::new().from(s("q0")).on('a').to(s("q1")).post("A", vec![]))
        .transition(TransitionBuilder::new().from(s("q1")).on('b').to(s("q2")).post("B", vec![]))
        .action("A", |_, _, _| Ok(()))
        .action("B", |_, _, _| Ok(()))
        .build()
        .unwrap()
}

/// Splice a fresh state into the single `symbol` transition selected by
/// `pattern`, lengthening that chain by one step.
fn lengthen(
    table: &mut TransitionTable<String, char>,
    mut pattern: Pattern<String, char>,
    symbol: char,
    fresh: String,
) -> Result<(), ActionError> {
    table.query(&mut pattern);
    let (from, to) = match (pattern.source.single(), pattern.target.single()) {
        (Some(from), Some(to)) => (from.clone(), to.clone()),
        _ => return Err(ActionError::Failed(format!("no single '{symbol}' link to lengthen"))),
    };
    table.remove(&pattern)?;

    table.add(&Pattern::symbol(
        Variable::one(from),
        Variable::one(Some(symbol)),
        Variable::one(fresh.clone()),
    ))?;
    table.add(&Pattern::symbol(
        Variable::one(fresh),
        Variable::one(Some(symbol)),
        Variable::one(to),
    ))?;
    Ok(())
}

/// Accepts aⁿbⁿcⁿ for n ≥ 1.
///
/// Every extra `a` fires `grow`, which lengthens both the chain of `b`
/// transitions into q2 and the chain of `c` transitions out of q2.
fn anbncn() -> AdaptiveAutomaton<String, char> {
    let counter = Arc::new(AtomicUsize::new(0));

    AutomatonBuilder::new()
        .submachine(
            "Main",
            s("q0"),
            [s("q0"), s("q1"), s("q2"), s("q3")],
            [s("q3")],
        )
        .main("Main")
        .transition(TransitionBuilder::new().from(s("q0")).on('a').to(s("q1")))
        .transition(
            TransitionBuilder::new()
                .from(s("q1"))
                .on('a')
                .to(s("q1"))
                .post("grow", vec![]),
        )
        .transition(TransitionBuilder::new().from(s("q1")).on('b').to(s("q2")))
        .transition(TransitionBuilder::new().from(s("q2")).on('c').to(s("q3")))
        .action("grow", move |table, _, _| {
            let n = counter.fetch_add(1, Ordering::SeqCst);

            let into_q2 = Pattern::symbol(Variable::Free, Variable::one(Some('b')), Variable::one(s("q2")));
            lengthen(table, into_q2, 'b', format!("b{n}"))?;

            let out_of_q2 = Pattern::symbol(Variable::one(s("q2")), Variable::one(Some('c')), Variable::Free);
            lengthen(table, out_of_q2, 'c', format!("c{n}"))
        })
        .build()
        .unwrap()
}

/// Accepts aⁿbⁿ for n ≥ 1 through a recursive submachine.
fn nested() -> AdaptiveAutomaton<String, char> {
    AutomatonBuilder::new()
        .submachine("Main", s("m0"), [s("m0"), s("m1")], [s("m1")])
        .submachine(
            "Pair",
            s("p0"),
            [s("p0"), s("p1"), s("p2"), s("p3")],
            [s("p3")],
        )
        .main("Main")
        .transition(TransitionBuilder::new().from(s("m0")).call("Pair").to(s("m1")))
        .transition(TransitionBuilder::new().from(s("p0")).on('a').to(s("p1")))
        .transition(TransitionBuilder::new().from(s("p1")).call("Pair").to(s("p2")))
        .transition(TransitionBuilder::new().from(s("p1")).epsilon().to(s("p2")))
        .transition(TransitionBuilder::new().from(s("p2")).on('b').to(s("p3")))
        .build()
        .unwrap()
}

#[test]
fn regular_language_accepts_exactly_ab() {
    let mut automaton = regular();

    assert!(automaton.recognize(&chars("ab")).unwrap());
    assert_eq!(automaton.recognition_paths().len(), 1);
    assert!(automaton.recognition_paths()[0].is_accepted());

    assert!(!automaton.recognize(&chars("a")).unwrap());
    assert!(!automaton.recognize(&chars("abb")).unwrap());
    assert!(!automaton.recognize(&chars("")).unwrap());
    assert!(!automaton.recognize(&chars("ba")).unwrap());
}

#[test]
fn regular_path_log_lists_moves_in_order() {
    let mut automaton = regular();
    automaton.recognize(&chars("ab")).unwrap();

    let path = &automaton.recognition_paths()[0];
    let moves = path.descriptions();
    assert_eq!(moves.len(), 3);
    assert!(moves[0].starts_with("start"));
    assert!(moves[1].contains("'a'") && moves[1].ends_with("post A()"));
    assert!(moves[2].contains("'b'") && moves[2].ends_with("post B()"));
    assert_eq!(path.cursor, 2);
    assert_eq!(path.state, Some(s("q2")));
    assert!(path.duration().is_some());
}

#[test]
fn anbncn_accepts_balanced_runs() {
    let mut automaton = anbncn();

    for input in ["abc", "aabbcc", "aaabbbccc", "aaaabbbbcccc"] {
        assert!(automaton.recognize(&chars(input)).unwrap(), "{input} should be accepted");
    }
}

#[test]
fn anbncn_rejects_unbalanced_runs() {
    let mut automaton = anbncn();

    for input in ["", "a", "ab", "aabbbcc", "aabbc", "aabcc", "abcc", "abcabc", "aabbccc"] {
        assert!(!automaton.recognize(&chars(input)).unwrap(), "{input} should be rejected");
    }
}

#[test]
fn anbncn_rewrites_stay_inside_a_run() {
    let mut automaton = anbncn();
    let before = automaton.table().len();

    assert!(automaton.recognize(&chars("aaabbbccc")).unwrap());
    assert_eq!(automaton.table().len(), before);

    // A fresh run starts from the original four transitions again.
    assert!(automaton.recognize(&chars("abc")).unwrap());
    assert!(!automaton.recognize(&chars("abbcc")).unwrap());
}

#[test]
fn submachine_calls_nest_and_return() {
    let mut automaton = nested();

    assert!(automaton.recognize(&chars("ab")).unwrap());
    assert!(automaton.recognize(&chars("aaabbb")).unwrap());
    assert!(!automaton.recognize(&chars("aab")).unwrap());
    assert!(!automaton.recognize(&chars("abb")).unwrap());
    assert!(!automaton.recognize(&chars("")).unwrap());
}

#[test]
fn accepted_paths_end_with_an_empty_stack() {
    let mut automaton = nested();
    automaton.recognize(&chars("aabb")).unwrap();

    let accepted: Vec<_> = automaton
        .recognition_paths()
        .iter()
        .filter(|p| p.is_accepted())
        .collect();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].stack_depth, 0);
    assert_eq!(accepted[0].state, Some(s("m1")));
    assert!(accepted[0]
        .descriptions()
        .iter()
        .any(|m| m.contains("[return]")));
}

#[test]
fn ambiguous_input_yields_several_accepting_paths() {
    let mut automaton = AutomatonBuilder::<u32, char>::new()
        .submachine("Main", 0, [0, 1, 2, 3], [3])
        .main("Main")
        .transition(TransitionBuilder::new().from(0).on('a').to(1))
        .transition(TransitionBuilder::new().from(0).on('a').to(2))
        .transition(TransitionBuilder::new().from(1).on('b').to(3))
        .transition(TransitionBuilder::new().from(2).on('b').to(3))
        .build()
        .unwrap();

    assert!(automaton.recognize(&chars("ab")).unwrap());

    let paths = automaton.recognition_paths();
    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|p| p.outcome == Outcome::Accepted));
    assert_ne!(paths[0].id, paths[1].id);
}

fn race() -> AdaptiveAutomaton<u32, char> {
    AutomatonBuilder::new()
        .submachine("Main", 0, [0, 1, 2], [2])
        .main("Main")
        .transition(TransitionBuilder::new().from(0).on('a').to(2))
        .transition(TransitionBuilder::new().from(0).on('a').to(1))
        .transition(TransitionBuilder::new().from(1).epsilon().to(2))
        .build()
        .unwrap()
}

#[test]
fn full_run_collects_every_verdict() {
    let mut automaton = race();

    assert!(automaton.recognize(&chars("a")).unwrap());
    let outcomes: Vec<_> = automaton.recognition_paths().iter().map(|p| p.outcome).collect();
    assert_eq!(outcomes, vec![Outcome::Accepted, Outcome::Accepted]);
}

#[test]
fn early_stop_leaves_slower_branches_pending() {
    let mut automaton = race();
    automaton.set_stop_at_first_result(true);

    assert!(automaton.recognize(&chars("a")).unwrap());
    let outcomes: Vec<_> = automaton.recognition_paths().iter().map(|p| p.outcome).collect();
    assert_eq!(outcomes, vec![Outcome::Accepted, Outcome::Pending]);
}

#[test]
fn prior_action_can_redirect_the_pending_move() {
    let mut automaton = AutomatonBuilder::<u32, char>::new()
        .submachine("Main", 0, [0, 1, 2], [2])
        .main("Main")
        .transition(TransitionBuilder::new().from(0).on('a').to(1).prior("redirect", vec![]))
        .action("redirect", |table, trigger, _| {
            let doomed = Pattern::symbol(
                Variable::one(trigger.source),
                Variable::one(Some('a')),
                Variable::one(trigger.target),
            )
            .with_prior(ActionQuery::named("redirect"));
            table.remove(&doomed)?;
            table.add(&Pattern::symbol(
                Variable::one(trigger.source),
                Variable::one(Some('a')),
                Variable::one(2),
            ))?;
            Ok(())
        })
        .build()
        .unwrap();

    assert!(automaton.recognize(&chars("a")).unwrap());
    assert_eq!(automaton.recognition_paths()[0].state, Some(2));
}

#[test]
fn free_variable_in_remove_aborts_the_run() {
    let mut automaton = AutomatonBuilder::<u32, char>::new()
        .submachine("Main", 0, [0, 1], [1])
        .main("Main")
        .transition(TransitionBuilder::new().from(0).on('a').to(1).post("sloppy", vec![]))
        .action("sloppy", |table, _, _| {
            table.remove(&Pattern::symbol(Variable::Free, Variable::one(Some('a')), Variable::one(1)))?;
            Ok(())
        })
        .build()
        .unwrap();

    let err = automaton.recognize(&chars("a")).unwrap_err();
    match err {
        RecognitionError::Action { name, source } => {
            assert_eq!(name, "sloppy");
            assert!(matches!(
                source,
                ActionError::Query(QueryError::FreeVariable { role: Role::Source })
            ));
        }
        other => panic!("expected an action failure, got {other}"),
    }
}

#[test]
fn action_added_reference_to_unknown_action_is_fatal() {
    let mut automaton = AutomatonBuilder::<u32, char>::new()
        .submachine("Main", 0, [0, 1, 2], [2])
        .main("Main")
        .transition(TransitionBuilder::new().from(0).on('a').to(1).post("plant", vec![]))
        .action("plant", |table, _, _| {
            table.add(
                &Pattern::symbol(Variable::one(1), Variable::one(None), Variable::one(2))
                    .with_post(ActionQuery::named("ghost")),
            )?;
            Ok(())
        })
        .build()
        .unwrap();

    let err = automaton.recognize(&chars("a")).unwrap_err();
    assert!(matches!(err, RecognitionError::UnknownAction { ref name } if name == "ghost"));
    assert_eq!(err.error_code(), "UNKNOWN_ACTION");
}

#[test]
fn action_added_call_to_unknown_submachine_is_fatal() {
    let mut automaton = AutomatonBuilder::<u32, char>::new()
        .submachine("Main", 0, [0, 1, 2], [2])
        .main("Main")
        .transition(TransitionBuilder::new().from(0).on('a').to(1).post("plant", vec![]))
        .action("plant", |table, _, _| {
            table.add(&Pattern::call(Variable::one(1), Variable::one(s("Nowhere")), Variable::one(2)))?;
            Ok(())
        })
        .build()
        .unwrap();

    let err = automaton.recognize(&chars("a")).unwrap_err();
    assert!(matches!(err, RecognitionError::UnknownSubmachine { ref name } if name == "Nowhere"));
}

#[test]
fn tick_limit_stops_epsilon_cycles() {
    let mut automaton = AutomatonBuilder::<u32, char>::new()
        .submachine("Main", 0, [0, 1], [])
        .main("Main")
        .transition(TransitionBuilder::new().from(0).epsilon().to(1))
        .transition(TransitionBuilder::new().from(1).epsilon().to(0))
        .config(RecognizerConfig::from_json(r#"{"tick_limit": 100}"#).unwrap())
        .build()
        .unwrap();

    let err = automaton.recognize(&[]).unwrap_err();
    assert!(matches!(err, RecognitionError::TickLimitExceeded { limit: 100 }));
}

#[test]
fn paths_serialize_for_external_consumers() {
    let mut automaton = regular();
    automaton.recognize(&chars("ab")).unwrap();

    let json = serde_json::to_value(automaton.recognition_paths()).unwrap();
    assert_eq!(json[0]["outcome"], "Accepted");
    assert_eq!(json[0]["state"], "q2");
    assert_eq!(json[0]["entries"].as_array().map(Vec::len), Some(3));
}

#[test]
fn invalid_definition_reports_everything() {
    let result = AutomatonBuilder::<u32, char>::new()
        .submachine("Main", 0, [1], [1])
        .main("Missing")
        .transition(TransitionBuilder::new().from(0).call("Ghost").to(1).post("nope", vec![]))
        .build();

    let err = result.err().unwrap();
    assert_eq!(err.violations().len(), 4);
}
