//! End-to-end configuration loading scenarios.

use serverconf::admin::{describe, ConfigQuery, NO_SUCH_CONFIGURATION};
use serverconf::config::format::{dump, render, DUMP_FOOTER, DUMP_HEADER};
use serverconf::config::loader::apply;
use serverconf::config::{
    load, load_config, EnumOption, Entry, InvariantError, Kind, LoadError, Reason, Text,
    ValidationError, Value,
};
use serverconf::Registry;

mod common;

#[test]
fn test_defaults_render_exactly() {
    let context = load(Registry::with_defaults(), "").unwrap();
    let expected = [
        DUMP_HEADER,
        "protocol: Http",
        "bind-addr: 127.0.0.1",
        "port: 10828",
        "worker-number: 2",
        "worker-type: SyncWorker",
        "logfile: NULL",
        "logfile-level: NOTICE",
        "daemon: off",
        "pidfile: NULL",
        "max-buffer-size: 10485760",
        "stat-bind-addr: 127.0.0.1",
        "stat-port: 10829",
        "stat-refresh-time: 10",
        "stat-file: NULL",
        "timeout-seconds: 30",
        "mbuf-size: 16384",
        DUMP_FOOTER,
    ];
    assert_eq!(dump(&context.registry), expected);
}

#[test]
fn test_rendered_values_parse_back() {
    let text = "protocol Spdy\nbind-addr 0.0.0.0\nport 8080\nworker-type AsyncWorker\n\
                logfile-level debug\ndaemon on\npidfile NULL\nstat-file /tmp/stats";
    let context = load(Registry::with_defaults(), text).unwrap();

    for entry in context.registry.iter() {
        let rendered = render(entry);
        let mut fresh = Registry::with_defaults();
        apply(&mut fresh, &format!("{} {}", entry.name(), common::value_part(&rendered))).unwrap();
        assert_eq!(
            fresh.get(entry.name()).map(Entry::value),
            Some(entry.value()),
            "{rendered} did not parse back"
        );
    }
}

#[test]
fn test_enum_prefers_first_table_match() {
    static MODES: [EnumOption; 2] = [
        EnumOption { id: 0, name: "fast" },
        EnumOption { id: 1, name: "faster" },
    ];
    let mut registry = Registry::new();
    registry.register(Entry::enumeration("mode", &MODES, &MODES[1]));

    apply(&mut registry, "mode faster").unwrap();
    assert_eq!(registry.enum_option("mode").map(|o| o.name), Ok("fast"));
}

#[test]
fn test_enum_input_must_start_with_option() {
    let mut registry = Registry::with_defaults();
    apply(&mut registry, "logfile-level warnings").unwrap();
    assert_eq!(registry.enum_option("logfile-level").map(|o| o.name), Ok("WARNING"));

    let err = apply(&mut registry, "logfile-level warn").unwrap_err();
    assert!(matches!(err.reason, Reason::Validation(ValidationError::NoEnumMatch { .. })));
}

#[test]
fn test_eleven_digits_rejected() {
    let mut registry = Registry::with_defaults();
    let err = apply(&mut registry, "stat-refresh-time 00000000005").unwrap_err();
    assert!(matches!(err.reason, Reason::Validation(ValidationError::TooManyDigits { .. })));

    apply(&mut registry, "stat-refresh-time 0000000005").unwrap();
    assert_eq!(registry.integer("stat-refresh-time"), Ok(5));
}

#[test]
fn test_scenario_a_worker_number_within_ceiling() {
    let context = load(Registry::with_defaults(), "worker-number 5").unwrap();
    assert_eq!(context.settings.worker_number, 5);
}

#[test]
fn test_scenario_b_worker_number_above_ceiling() {
    let err = load(Registry::with_defaults(), "worker-number 5000").unwrap_err();
    let LoadError::Line(line) = &err else {
        panic!("expected a line error, got {err:?}");
    };
    assert_eq!(line.number, 1);
    assert_eq!(
        line.reason,
        Reason::Validation(ValidationError::AboveCeiling {
            key: "worker-number".into(),
            value: 5000,
            ceiling: 1024,
        })
    );
}

#[test]
fn test_scenario_c_daemon_flag() {
    let context = load(Registry::with_defaults(), "daemon on").unwrap();
    assert!(context.settings.daemon);

    let err = load(Registry::with_defaults(), "daemon maybe").unwrap_err();
    assert!(err.diagnostic().contains(">>> 'daemon maybe'"));
}

#[test]
fn test_scenario_d_list_block_then_setting() {
    let text = "mylist\n- alpha\n- beta\nother-setting value";
    let context = load(common::registry_with_list(), text).unwrap();

    assert_eq!(
        context.registry.get("mylist").map(Entry::value),
        Some(&Value::List(vec!["alpha".into(), "beta".into()]))
    );
    assert_eq!(context.registry.string("other-setting"), Ok(Some("value")));
}

#[test]
fn test_list_block_line_not_consumed_twice() {
    // `port` ends the block, is applied normally, and numbering continues.
    let text = "mylist\n- alpha\nport 9000\nbogus 1";
    let mut registry = common::registry_with_list();
    let err = apply(&mut registry, text).unwrap_err();
    assert_eq!(err.number, 4);
    assert_eq!(registry.integer("port"), Ok(9000));
    assert_eq!(registry.list("mylist"), Ok(&["alpha".to_string()][..]));
}

#[test]
fn test_scenario_e_null_string() {
    let context = load(Registry::with_defaults(), "logfile /var/log/a.log\nlogfile NULL").unwrap();
    assert_eq!(context.registry.get("logfile").map(Entry::value), Some(&Value::String(None)));
    assert_eq!(context.settings.logfile, None);

    // A compiled-in constant is replaced by owned text.
    let defaults = Registry::with_defaults();
    assert!(!text_of(&defaults, "bind-addr").is_owned());

    let context = load(defaults, "bind-addr 0.0.0.0").unwrap();
    let text = text_of(&context.registry, "bind-addr");
    assert!(text.is_owned());
    assert_eq!(text.as_str(), "0.0.0.0");
}

fn text_of(registry: &Registry, name: &str) -> Text {
    match registry.get(name).map(Entry::value) {
        Some(Value::String(Some(text))) => text.clone(),
        other => panic!("{name} holds {other:?}"),
    }
}

#[test]
fn test_scenario_f_refresh_not_below_timeout() {
    let err = load(Registry::with_defaults(), "stat-refresh-time 400\ntimeout-seconds 300").unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invariant(InvariantError::RefreshNotBelowTimeout { refresh: 400, timeout: 300 })
    ));
    assert!(err.diagnostic().starts_with("\n*** FATAL CONFIG FILE ERROR ***\nReason: "));
}

#[test]
fn test_file_then_overrides() {
    let file = common::write_config("# server\nport 7000\nworker-number 4\n");
    let context = load_config(Some(file.path()), Some("port 7001")).unwrap();
    assert_eq!(context.settings.port, 7001);
    assert_eq!(context.settings.worker_number, 4);
}

#[test]
fn test_non_utf8_comment_is_ignored() {
    let file = common::write_config(b"# caf\xe9 server\nport 7000\n");
    let context = load_config(Some(file.path()), None).unwrap();
    assert_eq!(context.settings.port, 7000);
}

#[test]
fn test_non_utf8_value_is_replaced() {
    let file = common::write_config(b"stat-file /tmp/caf\xe9\n");
    let context = load_config(Some(file.path()), None).unwrap();
    assert_eq!(context.registry.string("stat-file"), Ok(Some("/tmp/caf\u{fffd}")));
}

#[test]
fn test_file_error_line_numbers_include_overrides() {
    let file = common::write_config("port 7000\n");
    // The file's trailing newline plus the separator leave line 2 blank.
    let err = load_config(Some(file.path()), Some("colour blue")).unwrap_err();
    let LoadError::Line(line) = &err else {
        panic!("expected a line error, got {err:?}");
    };
    assert_eq!(line.number, 3);
    assert_eq!(line.reason, Reason::UnknownName("colour".into()));
}

#[test]
fn test_describe_after_load() {
    let context = load(Registry::with_defaults(), "worker-type AsyncWorkerPool").unwrap();
    assert_eq!(describe(&context.registry, &ConfigQuery::new("worker-t")).line, "worker-type: AsyncWorker");
    assert_eq!(describe(&context.registry, &ConfigQuery::new("nope")).line, NO_SUCH_CONFIGURATION);
}

#[test]
fn test_kinds_are_fixed() {
    let context = load(Registry::with_defaults(), "daemon off\nport 1").unwrap();
    let kinds: Vec<Kind> = context.registry.iter().map(Entry::kind).collect();
    let defaults: Vec<Kind> = Registry::with_defaults().iter().map(Entry::kind).collect();
    assert_eq!(kinds, defaults);
}
