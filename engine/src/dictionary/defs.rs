//! Compiled-in default definitions for the script language.
//!
//! Structural data lives in [`default_dictionary`]; human-readable
//! descriptions live in [`default_locale`] and are merged over the structural
//! entries through the typed merge, the same path a host-supplied locale
//! overlay takes.
//!
//! Block-flag convention (see [`BlockRole::from_flags`](super::BlockRole)):
//! a keyword that will later be closed carries `closes_block`, a keyword that
//! closes an earlier block carries `opens_block`, a branch keyword carries
//! both.

use std::collections::BTreeMap;

use super::raw::{RawArg, RawDictionary, RawEntry, RawModule};

fn statement(name: &str) -> RawEntry {
    RawEntry {
        kind: Some("statement".into()),
        ..RawEntry::named(name)
    }
}

fn opening(name: &str) -> RawEntry {
    RawEntry {
        closes_block: Some(true),
        ..statement(name)
    }
}

fn middle(name: &str) -> RawEntry {
    RawEntry {
        opens_block: Some(true),
        closes_block: Some(true),
        ..statement(name)
    }
}

fn closing(name: &str) -> RawEntry {
    RawEntry {
        opens_block: Some(true),
        ..statement(name)
    }
}

fn operator(name: &str) -> RawEntry {
    RawEntry {
        kind: Some("operator".into()),
        result_type: Some("number".into()),
        ..RawEntry::named(name)
    }
}

fn arg(name: &str, ty: &str) -> RawArg {
    RawArg {
        name: Some(name.into()),
        ty: Some(ty.into()),
        ..RawArg::default()
    }
}

fn opt_arg(name: &str, ty: &str) -> RawArg {
    RawArg {
        optional: Some(true),
        ..arg(name, ty)
    }
}

fn rep_arg(name: &str, ty: &str) -> RawArg {
    RawArg {
        repeatable: Some(true),
        ..arg(name, ty)
    }
}

fn function(name: &str, result: &str, args: Vec<RawArg>) -> RawEntry {
    RawEntry {
        kind: Some("function".into()),
        result_type: Some(result.into()),
        args,
        ..RawEntry::named(name)
    }
}

fn constant(name: &str, result: &str) -> RawEntry {
    RawEntry {
        kind: Some("constant".into()),
        result_type: Some(result.into()),
        ..RawEntry::named(name)
    }
}

fn property(name: &str, result: &str) -> RawEntry {
    RawEntry {
        kind: Some("property".into()),
        result_type: Some(result.into()),
        ..RawEntry::named(name)
    }
}

fn method(name: &str, result: &str, args: Vec<RawArg>) -> RawEntry {
    RawEntry {
        kind: Some("method".into()),
        result_type: Some(result.into()),
        args,
        ..RawEntry::named(name)
    }
}

fn snippet(name: &str, body: &str) -> RawEntry {
    RawEntry {
        kind: Some("snippet".into()),
        body: Some(body.into()),
        ..RawEntry::named(name)
    }
}

/// Structural defaults: keywords, operators, builtins, members, snippets.
pub fn default_dictionary() -> RawDictionary {
    let statements = vec![
        opening("If"),
        statement("Then"),
        middle("Else"),
        middle("ElseIf"),
        closing("EndIf"),
        opening("For"),
        closing("Next"),
        opening("While"),
        closing("EndWhile"),
        opening("Select"),
        middle("Case"),
        closing("EndSelect"),
        opening("Function"),
        closing("EndFunction"),
        RawEntry {
            declares_symbol: Some(true),
            ..statement("Dim")
        },
        statement("As"),
        RawEntry {
            uses_label: Some(true),
            ..statement("Goto")
        },
        statement("Return"),
        statement("Exit"),
        statement("Uses"),
        RawEntry {
            preferred_alternative: Some("Goto".into()),
            uses_label: Some(true),
            ..statement("Gosub")
        },
    ];

    let operators = vec![
        operator("And"),
        operator("Or"),
        operator("Not"),
        operator("Has"),
        operator("Mod"),
        // `To` is the range operator inside `{...}` set literals.
        operator("To"),
        operator("+"),
        operator("-"),
        operator("*"),
        operator("/"),
        operator("^"),
        operator("="),
        operator("<>"),
        operator("<"),
        operator("<="),
        operator(">"),
        operator(">="),
        operator("&"),
    ];

    let builtins = vec![
        function("Abs", "number", vec![arg("value", "number")]),
        function("Round", "number", vec![arg("value", "number"), opt_arg("digits", "number")]),
        function("Min", "number", vec![rep_arg("value", "number")]),
        function("Max", "number", vec![rep_arg("value", "number")]),
        function("Sum", "number", vec![arg("values", "list")]),
        RawEntry {
            version: Some("2.1".into()),
            module: Some("math".into()),
            ..function("Median", "number", vec![arg("values", "list")])
        },
        function("Len", "number", vec![arg("value", "text")]),
        RawEntry {
            preferred_alternative: Some("Len".into()),
            ..function("Length", "number", vec![arg("value", "text")])
        },
        function("Str", "text", vec![arg("value", "number")]),
        function("Val", "number", vec![arg("value", "text")]),
        function("Trim", "text", vec![arg("value", "text")]),
        function("Upper", "text", vec![arg("value", "text")]),
        function("Lower", "text", vec![arg("value", "text")]),
        function("Now", "date", vec![]),
        function("Today", "date", vec![]),
        RawEntry {
            version: Some("2.1".into()),
            ..function("DateAdd", "date", vec![
                arg("value", "date"),
                arg("unit", "text"),
                arg("count", "number"),
            ])
        },
        // Loop helper: the first string argument declares a numeric counter.
        function("Repeat", "number", vec![
            arg("counter", "text"),
            arg("from", "number"),
            arg("to", "number"),
        ]),
        function("Size", "list", vec![arg("values", "list")]),
    ];

    let constants = vec![
        constant("True", "number"),
        constant("False", "number"),
        constant("Null", "any"),
        RawEntry {
            version: Some("1.4".into()),
            module: Some("math".into()),
            ..constant("Pi", "number")
        },
    ];

    let mut members = BTreeMap::new();
    members.insert(
        "common".to_string(),
        vec![
            property("Value", "any"),
            property("Label", "text"),
            method("Format", "text", vec![arg("pattern", "text")]),
        ],
    );
    members.insert(
        "number".to_string(),
        vec![
            method("Floor", "number", vec![]),
            method("Ceil", "number", vec![]),
            method("ToText", "text", vec![]),
        ],
    );
    members.insert(
        "text".to_string(),
        vec![
            property("Length", "number"),
            method("Upper", "text", vec![]),
            method("Lower", "text", vec![]),
            method("Contains", "number", vec![arg("needle", "text")]),
            method("Substring", "text", vec![arg("start", "number"), opt_arg("count", "number")]),
        ],
    );
    members.insert(
        "date".to_string(),
        vec![
            property("Year", "number"),
            property("Month", "number"),
            property("Day", "number"),
            method("AddDays", "date", vec![arg("count", "number")]),
        ],
    );
    members.insert(
        "list".to_string(),
        vec![
            property("Count", "number"),
            property("First", "any"),
            property("Last", "any"),
            method("Sort", "list", vec![]),
            method("Sum", "number", vec![]),
        ],
    );
    members.insert(
        "question".to_string(),
        vec![
            property("Answers", "list"),
            property("AnswerCount", "number"),
            property("IsAnswered", "number"),
            property("Shortcut", "text"),
        ],
    );

    let snippets = vec![
        snippet("ifblock", "If ${1:condition} Then\n\t$0\nEndIf"),
        snippet("forloop", "For ${1:counter} = ${2:start} To ${3:end}\n\t$0\nNext"),
        snippet("whileloop", "While ${1:condition}\n\t$0\nEndWhile"),
    ];

    let modules = vec![
        RawModule {
            name: Some("core".into()),
            ..RawModule::default()
        },
        RawModule {
            name: Some("math".into()),
            deps: vec!["core".into()],
            ..RawModule::default()
        },
        RawModule {
            name: Some("text".into()),
            deps: vec!["core".into()],
            ..RawModule::default()
        },
        RawModule {
            name: Some("survey".into()),
            deps: vec!["core".into(), "math".into()],
            ..RawModule::default()
        },
    ];

    RawDictionary {
        versions: vec!["1.0".into(), "1.4".into(), "2.1".into()],
        statements,
        operators,
        builtins,
        constants,
        questions: Vec::new(),
        members,
        snippets,
        modules,
    }
}

fn doc(name: &str, text: &str) -> RawEntry {
    RawEntry {
        doc: Some(text.into()),
        ..RawEntry::named(name)
    }
}

/// Description overlay merged over [`default_dictionary`].
pub fn default_locale() -> RawDictionary {
    RawDictionary {
        statements: vec![
            doc("If", "Starts a conditional block, closed by EndIf."),
            doc("Dim", "Declares a local variable, optionally typed with As."),
            doc("Goto", "Jumps to a declared label."),
            doc("Uses", "Imports a module into the current script."),
        ],
        operators: vec![
            doc("Has", "True when the left-hand reference contains the right-hand set."),
            doc("To", "Range operator inside a set literal, e.g. {1 To 5}."),
        ],
        builtins: vec![
            doc("Abs", "Absolute value of a number."),
            doc("Len", "Number of characters in a text value."),
            doc("Repeat", "Runs a block once per counter value; declares the counter."),
        ],
        constants: vec![doc("Null", "The absent value.")],
        ..RawDictionary::default()
    }
}
