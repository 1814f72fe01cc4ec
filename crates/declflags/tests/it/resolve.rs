use declflags::{
    FlagConfig, GroupConfig, Outcome, PositionalConfig, Registry, ResolveError, Ty, Val,
    ValueConfig,
};
use expect_test::expect;

use crate::{args, blossom, check};

fn resolved(registry: &Registry, args: &mut Vec<String>) -> declflags::Resolution {
    match registry.resolve(args) {
        Outcome::Resolved(it) => it,
        Outcome::Help => panic!("unexpected help"),
    }
}

fn switches() -> Registry {
    let mut r = Registry::new();
    for (name, commands, switch) in [("verbose", &["--verbose"], 'v'), ("tracing", &["--trace"], 't')] {
        r.flag(FlagConfig {
            name: Some(name),
            commands,
            switch: Some(switch),
            ..Default::default()
        })
        .unwrap();
    }
    r
}

fn output_type(required: bool) -> Registry {
    let mut r = Registry::new();
    r.group(GroupConfig { name: Some("output_type"), required, ..Default::default() }, |r| {
        r.flag(FlagConfig {
            commands: &["--dot"],
            value: Some(Val::from("dot")),
            ..Default::default()
        })?;
        r.flag(FlagConfig {
            commands: &["--blossom"],
            value: Some(Val::from("blossom")),
            ..Default::default()
        })?;
        Ok(())
    })
    .unwrap();
    r
}

#[test]
fn blossom_positionals() {
    check(
        &blossom(),
        "run.blsm 1->2",
        expect![[r#"
            program_file = "run.blsm"
            graph_input = "1->2"
            output_file = null
            verbose = false
            tracing = false
            trace_dir = "trace"
            colour_strategy = "ignore"
            keep_rationals = false
            output_type = "blossom"
            validate_only = false
            version = false
            left: []
        "#]],
    );
}

#[test]
fn blossom_everything() {
    check(
        &blossom(),
        "-vt --output out.blsm --dot run.blsm --input in.blsm extra",
        expect![[r#"
            program_file = "run.blsm"
            graph_input = "in.blsm"
            output_file = "out.blsm"
            verbose = true
            tracing = true
            trace_dir = "trace"
            colour_strategy = "ignore"
            keep_rationals = false
            output_type = "dot"
            validate_only = false
            version = false
            left: ["extra"]
        "#]],
    );
}

#[test]
fn blossom_nothing() {
    check(
        &blossom(),
        "",
        expect![[r#"
            program_file = null
            graph_input = null
            output_file = null
            verbose = false
            tracing = false
            trace_dir = "trace"
            colour_strategy = "ignore"
            keep_rationals = false
            output_type = "blossom"
            validate_only = false
            version = false
            error: A program_file argument is required
            error: A graph_input argument is required
            left: []
        "#]],
    );
}

#[test]
fn blossom_help() {
    check(&blossom(), "run.blsm --dry-run -h", expect!["help\n"]);
    check(&blossom(), "--help", expect!["help\n"]);
}

#[test]
fn help_leaves_args_alone() {
    let mut args = args("run.blsm --help");
    assert_eq!(blossom().resolve(&mut args), Outcome::Help);
    assert_eq!(args, ["run.blsm", "--help"]);
}

#[test]
fn value_at_end_of_input() {
    check(
        &blossom(),
        "run.blsm g --output",
        expect![[r#"
            program_file = "run.blsm"
            graph_input = "g"
            output_file = null
            verbose = false
            tracing = false
            trace_dir = "trace"
            colour_strategy = "ignore"
            keep_rationals = false
            output_type = "blossom"
            validate_only = false
            version = false
            left: ["--output"]
        "#]],
    );
}

#[test]
fn value_consumes_its_tokens() {
    let mut r = Registry::new();
    r.value(ValueConfig {
        name: Some("output_file"),
        prefixes: &["--output"],
        types: &["FILE"],
        ..Default::default()
    })
    .unwrap();

    let mut args = args("--output out.blsm extra");
    let res = resolved(&r, &mut args);
    assert_eq!(res.options.text("output_file"), Some("out.blsm"));
    assert!(res.errors.is_empty());
    assert_eq!(args, ["extra"]);

    check(
        &r,
        "--output notes",
        expect![[r#"
            output_file = null
            error: Invalid output_file argument `notes`: expected a FILE
            left: ["--output", "notes"]
        "#]],
    );
}

#[test]
fn value_with_several_types() {
    let mut r = Registry::new();
    r.value(ValueConfig {
        name: Some("range"),
        prefixes: &["--range", "-r"],
        types: &["DIR", "FILE"],
        required: true,
        ..Default::default()
    })
    .unwrap();

    check(
        &r,
        "a -r traces last.dot b",
        expect![[r#"
            range = ["traces", "last.dot"]
            left: ["a", "b"]
        "#]],
    );
    check(
        &r,
        "--range traces",
        expect![[r#"
            range = null
            error: A range argument is required
            left: ["--range", "traces"]
        "#]],
    );
}

#[test]
fn switch_bundles() {
    check(
        &switches(),
        "-vt",
        expect![[r#"
            verbose = true
            tracing = true
            left: []
        "#]],
    );
    check(
        &switches(),
        "-t --verbose",
        expect![[r#"
            verbose = true
            tracing = true
            left: []
        "#]],
    );
}

#[test]
fn bundle_keeps_its_unknown_letters() {
    check(
        &switches(),
        "-vq -t",
        expect![[r#"
            verbose = true
            tracing = true
            left: ["-q"]
        "#]],
    );
}

#[test]
fn claimed_letters_are_not_matched_again() {
    let mut r = Registry::new();
    r.flag(FlagConfig {
        name: Some("verbose"),
        commands: &["--verbose"],
        switch: Some('v'),
        ..Default::default()
    })
    .unwrap();
    r.positional(PositionalConfig { name: Some("file"), required: true, ..Default::default() })
        .unwrap();

    check(
        &r,
        "-vq prog",
        expect![[r#"
            verbose = true
            file = "-q"
            left: ["prog"]
        "#]],
    );
    check(
        &r,
        "-vv prog",
        expect![[r#"
            verbose = true
            file = "-v"
            left: ["prog"]
        "#]],
    );
    check(
        &r,
        "-v prog",
        expect![[r#"
            verbose = true
            file = "prog"
            left: []
        "#]],
    );
}

#[test]
fn switches_go_before_required_literals() {
    let mut r = Registry::new();
    r.flag(FlagConfig {
        name: Some("verbose"),
        commands: &["--verbose"],
        switch: Some('v'),
        required: true,
        ..Default::default()
    })
    .unwrap();

    check(
        &r,
        "-v --verbose",
        expect![[r#"
            verbose = true
            left: ["--verbose"]
        "#]],
    );
    check(
        &r,
        "",
        expect![[r#"
            verbose = false
            error: A verbose argument is required
            left: []
        "#]],
    );
}

#[test]
fn group_takes_one_child() {
    let r = output_type(true);
    check(
        &r,
        "--dot",
        expect![[r#"
            output_type = "dot"
            left: []
        "#]],
    );
    check(
        &r,
        "--blossom --dot",
        expect![[r#"
            output_type = "dot"
            left: ["--blossom"]
        "#]],
    );
    check(
        &r,
        "",
        expect![[r#"
            output_type = null
            error: A output_type argument is required
            left: []
        "#]],
    );
}

#[test]
fn optional_group_falls_back_to_default() {
    let mut r = output_type(false);
    check(
        &r,
        "",
        expect![[r#"
            output_type = null
            left: []
        "#]],
    );

    r.group(
        GroupConfig { name: Some("colours"), default: Some(Val::from("ignore")), ..Default::default() },
        |r| {
            r.flag(FlagConfig {
                commands: &["--merge-colours"],
                switch: Some('m'),
                value: Some(Val::from("merge")),
                ..Default::default()
            })?;
            Ok(())
        },
    )
    .unwrap();
    check(
        &r,
        "-m",
        expect![[r#"
            output_type = null
            colours = "merge"
            left: []
        "#]],
    );
    check(
        &r,
        "--blossom",
        expect![[r#"
            output_type = "blossom"
            colours = "ignore"
            left: []
        "#]],
    );
}

#[test]
fn errors_are_deduplicated() {
    let mut r = Registry::new();
    r.group(GroupConfig { name: Some("source"), required: true, ..Default::default() }, |r| {
        r.value(ValueConfig { prefixes: &["--in"], types: &["FILE"], ..Default::default() })?;
        r.value(ValueConfig { prefixes: &["--input"], types: &["FILE"], ..Default::default() })?;
        Ok(())
    })
    .unwrap();

    let mut args = args("--in x --input x");
    let res = resolved(&r, &mut args);
    assert_eq!(
        res.errors,
        vec![
            ResolveError::TypeMismatch {
                name: "source".to_string(),
                token: "x".to_string(),
                ty: Ty::File,
            },
            ResolveError::MissingRequired { name: "source".to_string() },
        ]
    );
    assert_eq!(args.len(), 4);
}

#[test]
fn positional_round_trip() {
    let mut r = Registry::new();
    r.positional(PositionalConfig {
        name: Some("program_file"),
        ty: Some("FILE"),
        required: true,
        ..Default::default()
    })
    .unwrap();

    let mut args = args("run.blsm");
    let res = resolved(&r, &mut args);
    assert_eq!(res.options.get("program_file"), Some(&Val::from("run.blsm")));
    assert!(res.errors.is_empty());
    assert!(args.is_empty());

    check(
        &r,
        "notes",
        expect![[r#"
            program_file = null
            error: Invalid program_file argument `notes`: expected a FILE
            left: ["notes"]
        "#]],
    );
}

#[test]
fn optional_positionals_never_fail() {
    let mut r = Registry::new();
    r.positional(PositionalConfig { name: Some("target"), ty: Some("DIR"), ..Default::default() })
        .unwrap();
    r.positional(PositionalConfig { name: Some("rest"), ..Default::default() }).unwrap();

    check(
        &r,
        "--weird build",
        expect![[r#"
            target = "build"
            rest = "--weird"
            left: []
        "#]],
    );
    check(
        &r,
        "--weird",
        expect![[r#"
            target = null
            rest = "--weird"
            left: []
        "#]],
    );
}

#[test]
fn every_required_option_is_reported() {
    let mut r = Registry::new();
    r.positional(PositionalConfig { name: Some("a"), required: true, ..Default::default() })
        .unwrap();
    r.flag(FlagConfig { name: Some("b"), commands: &["--b"], required: true, ..Default::default() })
        .unwrap();
    r.value(ValueConfig {
        name: Some("c"),
        prefixes: &["--c"],
        types: &["STRING"],
        required: true,
        ..Default::default()
    })
    .unwrap();

    let res = resolved(&r, &mut Vec::new());
    let errors = res.errors.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(
        errors,
        [
            "A b argument is required",
            "A c argument is required",
            "A a argument is required",
        ]
    );
}

#[test]
fn each_resolve_starts_fresh() {
    let r = output_type(true);
    let first = resolved(&r, &mut args("--dot"));
    let second = resolved(&r, &mut args(""));
    assert_eq!(first.options.text("output_type"), Some("dot"));
    assert!(first.errors.is_empty());
    assert_eq!(second.options.get("output_type"), None);
    assert_eq!(second.errors.len(), 1);
}

#[test]
fn options_accessors() {
    let r = blossom();
    let res = resolved(&r, &mut args("-v run.blsm g"));
    let options = &res.options;
    assert!(options.flag("verbose"));
    assert!(!options.flag("tracing"));
    assert!(!options.flag("program_file"));
    assert_eq!(options.text("trace_dir"), Some("trace"));
    assert_eq!(options.list("trace_dir"), None);
    assert!(options.contains("output_file"));
    assert_eq!(options.get("output_file"), None);
    assert!(!options.contains("nope"));
    assert_eq!(options.iter().count(), 11);
}
