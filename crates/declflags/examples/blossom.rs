//! Command line surface of the blossom interpreter.
//!
//! Run with `DECLFLAGS_LOG=declflags=trace` to watch the resolver at work.

use declflags::{
    FlagConfig, GroupConfig, HelpConfig, PositionalConfig, Registry, Val, ValueConfig,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("DECLFLAGS_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let registry = match options() {
        Ok(it) => it,
        Err(err) => {
            eprintln!("invalid options table: {err}");
            std::process::exit(1)
        }
    };
    let options = registry.resolve_env_or_exit();

    for (name, val) in options.iter() {
        match val {
            Some(Val::Bool(it)) => println!("{name}: {it}"),
            Some(Val::Text(it)) => println!("{name}: {it}"),
            Some(Val::List(it)) => println!("{name}: {}", it.join(" ")),
            None => println!("{name}: -"),
        }
    }
}

fn terminal_width() -> usize {
    crossterm::terminal::size().map(|(cols, _)| usize::from(cols)).unwrap_or(80)
}

fn options() -> declflags::Result<Registry> {
    let mut r = Registry::new().with_width(terminal_width);

    r.help(HelpConfig {
        commands: &["--help", "-h"],
        header: "Blossom usage:",
        footer: "See https://github.com/blossom-lang/blossom for any major issues.",
        name: "blossom",
    });

    r.positional(PositionalConfig {
        name: Some("program_file"),
        ty: Some("FILE"),
        required: true,
        description: "The file path to the blossom program.",
        ..Default::default()
    })?;

    r.group(GroupConfig { name: Some("graph_input"), required: true, ..Default::default() }, |r| {
        r.positional(PositionalConfig {
            ty: Some("STRING"),
            hint: Some("graph"),
            description: "The text of the blossom graph.",
            ..Default::default()
        })?;
        r.value(ValueConfig {
            prefixes: &["--input"],
            types: &["FILE"],
            description: "The file path to the blossom graph.",
            ..Default::default()
        })?;
        Ok(())
    })?;

    r.value(ValueConfig {
        name: Some("output_file"),
        prefixes: &["--output"],
        types: &["FILE"],
        description: "The file path to save the resultant graph of the program.",
        ..Default::default()
    })?;

    r.flag(FlagConfig {
        name: Some("verbose"),
        commands: &["--verbose"],
        switch: Some('v'),
        description: "Prints information about the running process.",
        ..Default::default()
    })?;

    r.flag(FlagConfig {
        name: Some("tracing"),
        commands: &["--trace"],
        switch: Some('t'),
        description: "Outputs intermediate graphs throughout the program's execution.",
        ..Default::default()
    })?;

    r.value(ValueConfig {
        name: Some("trace_dir"),
        prefixes: &["--trace-directory"],
        types: &["DIR"],
        default: Some(Val::from("trace")),
        description: "The directory intermediate graphs are written to.",
        ..Default::default()
    })?;

    r.group(
        GroupConfig {
            name: Some("colour_strategy"),
            default: Some(Val::from("ignore")),
            ..Default::default()
        },
        |r| {
            r.flag(FlagConfig {
                commands: &["--ignore-colours"],
                value: Some(Val::from("ignore")),
                ..Default::default()
            })?;
            r.flag(FlagConfig {
                commands: &["--merge-colours"],
                value: Some(Val::from("merge")),
                ..Default::default()
            })?;
            Ok(())
        },
    )?;

    r.flag(FlagConfig {
        name: Some("keep_rationals"),
        commands: &["--keep-rationals"],
        description: "Maintains fractional values instead of converting to floats.",
        ..Default::default()
    })?;

    r.group(
        GroupConfig {
            name: Some("output_type"),
            default: Some(Val::from("blossom")),
            ..Default::default()
        },
        |r| {
            for (commands, value) in
                [(&["--dot"], "dot"), (&["--graphML"], "graphML"), (&["--blossom"], "blossom")]
            {
                r.flag(FlagConfig {
                    commands,
                    value: Some(Val::from(value)),
                    description: "Format of the resultant graph.",
                    ..Default::default()
                })?;
            }
            Ok(())
        },
    )?;

    r.flag(FlagConfig {
        name: Some("validate_only"),
        commands: &["--validate", "--dry-run"],
        description: "Parses the program, and any graphs, but does not execute it.",
        ..Default::default()
    })?;

    r.flag(FlagConfig {
        name: Some("version"),
        commands: &["--version"],
        switch: Some('V'),
        description: "Prints the version of this blossom interpreter.",
        ..Default::default()
    })?;

    Ok(r)
}
