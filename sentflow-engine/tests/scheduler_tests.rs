//! Deadline scheduler behavior, replayed on a manual clock

use std::sync::Arc;

use proptest::prelude::*;
use sentflow_engine::{
    DeadlineScheduler, FlushKind, ManualClock, SchedulerConfig, SentenceOracle, StreamSegmenter,
};

fn scheduler(config: SchedulerConfig, clock: &ManualClock) -> DeadlineScheduler<ManualClock> {
    let oracle = Arc::new(config.oracle());
    DeadlineScheduler::with_clock(config, oracle, clock.clone()).unwrap()
}

/// Feed `tokens`, advancing the clock by `step` seconds before each one.
/// Returns every unit with the clock time it was emitted at.
fn replay(
    scheduler: &mut DeadlineScheduler<ManualClock>,
    clock: &ManualClock,
    tokens: &[&str],
    step: f64,
) -> Vec<(String, f64)> {
    let mut timed = Vec::new();
    let mut out = Vec::new();
    for token in tokens {
        clock.advance_secs(step);
        scheduler.push(token, &mut out).unwrap();
        let now = clock.elapsed().as_secs_f64();
        timed.extend(out.drain(..).map(|unit| (unit, now)));
    }
    scheduler.finish(&mut out).unwrap();
    let now = clock.elapsed().as_secs_f64();
    timed.extend(out.drain(..).map(|unit| (unit, now)));
    timed
}

fn texts(timed: &[(String, f64)]) -> Vec<&str> {
    timed.iter().map(|(text, _)| text.as_str()).collect()
}

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

const COUNTING: &[&str] = &[
    "one ", "two ", "three ", "four ", "five ", "six ", "seven ", "eight ", "nine ", "ten ",
    "eleven ", "twelve ",
];

/// Punctuation-free input where every flush is raw and only the per-unit
/// parameters decide when it happens
fn counting_config() -> sentflow_engine::SchedulerConfigBuilder {
    SchedulerConfig::builder()
        .lead_time(0.0)
        .target_words_per_second(1.0)
        .min_output_length(vec![1, 5])
        .max_wait_for_fragment(vec![0.0])
        .deadline_offset_static(vec![0.0])
        .deadline_offset_dynamic(vec![0.0])
        .avoid_pause_words(Vec::<&str>::new())
}

#[test]
fn test_min_output_length_per_unit() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(counting_config().build().unwrap(), &clock);
    let timed = replay(&mut scheduler, &clock, COUNTING, 0.25);

    assert_eq!(
        texts(&timed),
        vec!["one", "two three four five six", "seven eight nine ten eleven twelve"]
    );
    // The first unit only needs one word, later ones five
    assert_eq!(timed[0].1, 0.5);
    assert_eq!(timed[1].1, 1.75);
    assert!(words(&timed[1].0).len() >= 5);
    assert_eq!(scheduler.record().last_kind, Some(FlushKind::Tail));
}

#[test]
fn test_dynamic_offset_flushes_larger_units_sooner() {
    let clock = ManualClock::new();
    let mut baseline = scheduler(counting_config().build().unwrap(), &clock);
    let fixed = replay(&mut baseline, &clock, COUNTING, 0.25);

    let clock = ManualClock::new();
    let config = counting_config()
        .deadline_offset_dynamic(vec![1.0])
        .build()
        .unwrap();
    let mut scaled = scheduler(config, &clock);
    let dynamic = replay(&mut scaled, &clock, COUNTING, 0.25);

    assert_eq!(
        texts(&dynamic),
        vec![
            "one",
            "two three four five six",
            "seven eight nine ten eleven",
            "twelve"
        ]
    );
    assert!(dynamic.len() > fixed.len());
    // Without the dynamic offset the third unit waits for the end of input
    assert_eq!(dynamic[2].1, 3.0);
    assert_eq!(fixed[2].0, "seven eight nine ten eleven twelve");
}

#[test]
fn test_static_offset_per_unit() {
    let clock = ManualClock::new();
    let config = counting_config()
        .deadline_offset_static(vec![0.0, 0.0, 5.0])
        .build()
        .unwrap();
    let mut scheduler = scheduler(config, &clock);
    let timed = replay(&mut scheduler, &clock, COUNTING, 0.25);

    assert_eq!(
        texts(&timed),
        vec![
            "one",
            "two three four five six",
            "seven eight nine ten eleven",
            "twelve"
        ]
    );
    assert_eq!(timed[2].1, 3.0);
}

#[test]
fn test_max_wait_for_fragment_per_unit() {
    let run = |max_wait: Vec<f64>| {
        let clock = ManualClock::new();
        let config = counting_config()
            .target_words_per_second(4.0)
            .min_output_length(vec![1])
            .max_wait_for_fragment(max_wait)
            .build()
            .unwrap();
        let mut scheduler = scheduler(config, &clock);
        replay(&mut scheduler, &clock, &COUNTING[..6], 0.25)
    };

    let eager = run(vec![0.0]);
    assert_eq!(texts(&eager)[..2], ["one", "two three"]);
    assert_eq!(eager[1].1, 1.0);

    // The first unit may go at once, the second waits 0.9s after it
    let patient = run(vec![0.0, 0.9]);
    assert_eq!(texts(&patient), vec!["one", "two three four five", "six"]);
    assert_eq!(patient[0].1, 0.5);
    assert_eq!(patient[1].1, 1.5);
}

#[test]
fn test_avoid_pause_word_defers_raw_flush() {
    let clock = ManualClock::new();
    let config = SchedulerConfig::builder()
        .lead_time(0.0)
        .min_output_length(vec![3])
        .max_wait_for_fragment(vec![0.0])
        .build()
        .unwrap();
    let mut scheduler = scheduler(config, &clock);
    let mut out = Vec::new();

    for token in ["The ", "cat ", "and ", "the "] {
        scheduler.push(token, &mut out).unwrap();
    }
    // "The cat and" and "The cat and the" both end on a function word
    assert!(out.is_empty());

    scheduler.push("dog ", &mut out).unwrap();
    assert!(out.is_empty());

    scheduler.push("ran ", &mut out).unwrap();
    assert_eq!(out, vec!["The cat and the dog"]);
    assert_eq!(scheduler.record().last_kind, Some(FlushKind::Raw));

    scheduler.finish(&mut out).unwrap();
    assert_eq!(out, vec!["The cat and the dog", "ran"]);
}

#[test]
fn test_lead_time_allows_only_lookahead_flush() {
    let clock = ManualClock::new();
    let config = SchedulerConfig::builder()
        .lead_time(1.0)
        .min_output_length(vec![2])
        .build()
        .unwrap();
    let mut scheduler = scheduler(config, &clock);
    let mut out = Vec::new();

    scheduler
        .push("One two. Three four. Five six. Seven", &mut out)
        .unwrap();
    assert!(out.is_empty());
    assert!(!scheduler.has_output_started());

    scheduler.push(" eight. Nine ten.", &mut out).unwrap();
    assert_eq!(out, vec!["One two. Three four."]);
    assert_eq!(scheduler.record().last_kind, Some(FlushKind::Lookahead));
    assert_eq!(scheduler.buffered(), "Five six. Seven eight. Nine ten.");

    scheduler.finish(&mut out).unwrap();
    assert_eq!(
        out,
        vec!["One two. Three four.", "Five six.", "Seven eight.", "Nine ten."]
    );
}

#[test]
fn test_fragment_flushed_at_deadline() {
    let clock = ManualClock::new();
    let config = SchedulerConfig::builder()
        .lead_time(0.5)
        .target_words_per_second(2.0)
        .min_output_length(vec![2])
        .max_wait_for_fragment(vec![10.0])
        .deadline_offset_static(vec![0.0])
        .build()
        .unwrap();
    let mut scheduler = scheduler(config, &clock);
    let mut out = Vec::new();

    scheduler.push("Well, I think ", &mut out).unwrap();
    assert!(out.is_empty(), "lead time not reached");

    clock.advance_secs(0.6);
    scheduler.push("that we should go, ", &mut out).unwrap();
    assert!(out.is_empty(), "raw buffer waits for a delimiter");

    scheduler.push("now ", &mut out).unwrap();
    assert_eq!(out, vec!["Well, I think that we should go,"]);
    assert_eq!(scheduler.record().last_kind, Some(FlushKind::Fragment));

    // Seven words at two words per second keep the next deadline 3.5s out
    clock.advance_secs(1.0);
    scheduler.push("and then leave. ", &mut out).unwrap();
    assert_eq!(out.len(), 1);

    clock.advance_secs(2.6);
    scheduler.push("Okay ", &mut out).unwrap();
    assert_eq!(out.last().map(String::as_str), Some("now and then leave."));

    scheduler.finish(&mut out).unwrap();
    assert_eq!(out.last().map(String::as_str), Some("Okay"));
    assert_eq!(scheduler.record().units, 3);
}

#[test]
fn test_first_sentence_preferred_over_fragment() {
    let clock = ManualClock::new();
    let config = SchedulerConfig::builder()
        .lead_time(0.0)
        .min_output_length(vec![2])
        .build()
        .unwrap();
    let mut scheduler = scheduler(config, &clock);
    let mut out = Vec::new();

    scheduler
        .push("It rained all day. Then, at last, the", &mut out)
        .unwrap();
    assert_eq!(out, vec!["It rained all day."]);
    assert_eq!(scheduler.record().last_kind, Some(FlushKind::Sentence));
}

#[test]
fn test_rate_monotonicity() {
    let tokens = [
        "Alpha ", "beta. ", "Gamma ", "delta. ", "Epsilon ", "zeta. ", "Eta ", "theta. ",
    ];
    let run = |rate: f64| {
        let clock = ManualClock::new();
        let config = SchedulerConfig::builder()
            .lead_time(0.0)
            .target_words_per_second(rate)
            .min_output_length(vec![1])
            .max_wait_for_fragment(vec![0.0])
            .deadline_offset_static(vec![0.0])
            .build()
            .unwrap();
        let mut scheduler = scheduler(config, &clock);
        replay(&mut scheduler, &clock, &tokens, 0.5)
    };

    let slow = run(2.0);
    let fast = run(6.0);

    assert_eq!(
        texts(&fast),
        vec!["Alpha", "beta.", "Gamma", "delta.", "Epsilon", "zeta.", "Eta", "theta."]
    );
    assert_eq!(
        texts(&slow),
        vec!["Alpha", "beta.", "Gamma delta.", "Epsilon zeta.", "Eta theta."]
    );

    for timed in [&slow, &fast] {
        assert!(timed.windows(2).all(|w| w[0].1 <= w[1].1));
    }
    for (quick, paced) in fast.iter().zip(&slow) {
        assert!(quick.1 <= paced.1, "{quick:?} emitted after {paced:?}");
    }
}

#[test]
fn test_tail_emits_every_sentence() {
    let clock = ManualClock::new();
    let mut scheduler = scheduler(SchedulerConfig::default(), &clock);
    let mut out = Vec::new();

    scheduler.push("Short. Tiny. End", &mut out).unwrap();
    assert!(out.is_empty());

    scheduler.finish(&mut out).unwrap();
    assert_eq!(out, vec!["Short.", "Tiny.", "End"]);
    assert_eq!(scheduler.record().last_kind, Some(FlushKind::Tail));
    assert_eq!(scheduler.buffered(), "");
}

#[test]
fn test_ignore_prefix_blocks_fragment() {
    let clock = ManualClock::new();
    let config = SchedulerConfig::builder()
        .lead_time(0.0)
        .min_output_length(vec![2])
        .max_wait_for_fragment(vec![5.0])
        .build()
        .unwrap();
    let mut scheduler = scheduler(config, &clock);
    let mut out = Vec::new();

    scheduler.push("We saw Dr. Who yesterday", &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_custom_oracle_and_failure() {
    let clock = ManualClock::new();
    let oracle = Arc::new(SentenceOracle::try_from_fn(|text| {
        if text.contains("boom") {
            Err("cannot split".to_string())
        } else {
            Ok(vec![text.to_string()])
        }
    }));
    let mut scheduler =
        DeadlineScheduler::with_clock(SchedulerConfig::default(), oracle, clock).unwrap();
    let mut out = Vec::new();

    scheduler.push("fine words here", &mut out).unwrap();
    let err = scheduler.push(" boom goes", &mut out).unwrap_err();
    assert!(!err.is_configuration());
}

#[test]
fn test_unknown_backend_is_configuration_error() {
    let config = SchedulerConfig::builder()
        .tokenizer_backend("stanza")
        .build()
        .unwrap();
    let err = DeadlineScheduler::new(config).unwrap_err();
    assert!(err.is_configuration());
}

proptest! {
    #[test]
    fn prop_tail_flush_completeness(
        text in "[A-Za-z ,.!?]{0,160}",
        step in 0.0f64..1.5,
        rate in 0.5f64..10.0,
    ) {
        let clock = ManualClock::new();
        let config = SchedulerConfig::builder()
            .lead_time(0.5)
            .target_words_per_second(rate)
            .build()
            .unwrap();
        let mut scheduler = scheduler(config, &clock);

        let tokens: Vec<String> = text.split_inclusive(' ').map(str::to_string).collect();
        let token_refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let timed = replay(&mut scheduler, &clock, &token_refs, step);

        let emitted: String = texts(&timed).join(" ");
        prop_assert_eq!(
            emitted.chars().filter(|c| !c.is_whitespace()).collect::<String>(),
            text.chars().filter(|c| !c.is_whitespace()).collect::<String>()
        );
        prop_assert!(timed.windows(2).all(|w| w[0].1 <= w[1].1));
        prop_assert!(timed.iter().all(|(unit, _)| words(unit).join(" ") == *unit));
    }
}
