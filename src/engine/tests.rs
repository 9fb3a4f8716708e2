use chrono::{NaiveDate, NaiveDateTime};

use crate::{Component, ComponentSet, Lexicon, Resolver};

fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mi, s).unwrap()
}

fn resolve(text: &str, anchor: NaiveDateTime) -> NaiveDateTime {
    Resolver::new(text, anchor, Lexicon::bundled().unwrap()).parse()
}

#[test]
fn week_before_last_sunday_afternoon_regression() {
    // Anchor is a Thursday afternoon; every clock delta adds to 13:21:00.
    let lexicon = Lexicon::bundled().unwrap();
    let run = Resolver::new("上上个周星期天下午2点25分钟30秒", at(2019, 10, 31, 13, 21, 0), lexicon).parse_traced();

    let expected_steps = [
        (Component::Second, Some("30秒"), 30, at(2019, 10, 31, 13, 21, 30)),
        (Component::Minute, Some("25分钟"), 25, at(2019, 10, 31, 13, 46, 30)),
        (Component::Hour, Some("下午2点"), 14, at(2019, 11, 1, 3, 46, 30)),
        (Component::Week, Some("上上个周"), -2, at(2019, 10, 18, 3, 46, 30)),
        (Component::Weekday, Some("星期天"), 2, at(2019, 10, 20, 3, 46, 30)),
        (Component::Day, None, 0, at(2019, 10, 20, 3, 46, 30)),
        (Component::Month, None, 0, at(2019, 10, 20, 3, 46, 30)),
        (Component::Year, None, 0, at(2019, 10, 20, 3, 46, 30)),
    ];

    assert_eq!(run.steps.len(), expected_steps.len());
    for (step, (component, literal, delta, anchor)) in run.steps.iter().zip(expected_steps) {
        assert_eq!(step.component, component);
        assert_eq!(step.literal.as_deref(), literal, "{component}");
        assert_eq!(step.delta, delta, "{component}");
        assert_eq!(step.anchor, anchor, "{component}");
    }

    assert_eq!(run.value, at(2019, 10, 20, 3, 46, 30));
    assert_eq!(
        run.matched,
        ComponentSet::SECOND | ComponentSet::MINUTE | ComponentSet::HOUR | ComponentSet::WEEK | ComponentSet::WEEKDAY
    );
}

#[test]
fn week_before_last_sunday_afternoon_from_midnight() {
    assert_eq!(resolve("上上个周星期天下午2点25分钟30秒", at(2019, 10, 31, 0, 0, 0)), at(2019, 10, 20, 14, 25, 30));
}

#[test]
fn no_phrase_returns_anchor() {
    let anchors = [
        at(2019, 10, 31, 13, 21, 0),
        at(2020, 2, 29, 23, 59, 59),
        at(1970, 1, 1, 0, 0, 0),
        at(2038, 12, 31, 12, 30, 45),
    ];
    let texts = ["", "没有时间信息", "hello world", "2019-10-31 13:21:00"];

    for anchor in anchors {
        for text in texts {
            let run = Resolver::new(text, anchor, Lexicon::bundled().unwrap()).parse_traced();
            assert_eq!(run.value, anchor, "text {text:?}");
            assert!(run.matched.is_empty());
            assert!(run.steps.iter().all(|s| !s.matched()));
        }
    }
}

#[test]
fn relative_phrase_examples() {
    // 2019-10-31 is a Thursday.
    let anchor = at(2019, 10, 31, 0, 0, 0);
    let cases = [
        ("大后天晚上8点半", at(2019, 11, 3, 20, 30, 0)),
        ("上星期三", at(2019, 10, 23, 0, 0, 0)),
        ("下周一上午10点", at(2019, 11, 4, 10, 0, 0)),
        ("这周五", at(2019, 11, 1, 0, 0, 0)),
        ("昨天中午12点", at(2019, 10, 30, 12, 0, 0)),
        ("去年今天", at(2018, 10, 31, 0, 0, 0)),
        ("下个月", at(2019, 11, 30, 0, 0, 0)),
        ("下下个月", at(2019, 12, 31, 0, 0, 0)),
        ("明年上个月", at(2020, 9, 30, 0, 0, 0)),
        ("前年", at(2017, 10, 31, 0, 0, 0)),
    ];

    for (text, expected) in cases {
        assert_eq!(resolve(text, anchor), expected, "input {text}");
    }
}

#[test]
fn first_match_per_component_wins() {
    // Two day phrases: only the leftmost one is applied.
    assert_eq!(resolve("明天或者后天", at(2019, 10, 31, 0, 0, 0)), at(2019, 11, 1, 0, 0, 0));
}

#[test]
fn month_rollover_through_parse() {
    assert_eq!(resolve("下个月", at(2019, 12, 10, 9, 0, 0)), at(2020, 1, 10, 9, 0, 0));
    assert_eq!(resolve("上个月", at(2019, 1, 10, 9, 0, 0)), at(2018, 12, 10, 9, 0, 0));
}

#[test]
fn lexicon_is_shared_between_resolvers() {
    let lexicon = Lexicon::bundled().unwrap();
    let handles: Vec<_> = ["昨天", "明天", "后天"]
        .into_iter()
        .map(|text| std::thread::spawn(move || Resolver::new(text, at(2019, 10, 31, 0, 0, 0), lexicon).parse()))
        .collect();

    let got: Vec<NaiveDateTime> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(got, vec![at(2019, 10, 30, 0, 0, 0), at(2019, 11, 1, 0, 0, 0), at(2019, 11, 2, 0, 0, 0)]);
}

#[test]
fn each_run_records_one_step_per_component() {
    let lexicon = Lexicon::bundled().unwrap();
    let first = Resolver::new("去年上个月前天", at(2019, 10, 31, 13, 21, 0), lexicon).parse_traced();
    let second = Resolver::new("去年上个月前天", at(2019, 10, 31, 13, 21, 0), lexicon).parse_traced();

    assert_eq!(first.steps.len(), Component::RESOLUTION_ORDER.len());
    assert_eq!(second.steps.len(), Component::RESOLUTION_ORDER.len());
    assert_eq!(first.value, second.value);
    assert_eq!(first.value, at(2018, 9, 29, 13, 21, 0));
}
