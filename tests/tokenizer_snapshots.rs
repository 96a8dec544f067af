//! Token dumps of small sources after the shipped transformer pipeline

use phpfix::testing::engine_with;
use phpfix::tokenizer::tokens::Tokens;

/// One token per line: kind (custom kinds by name) and quoted text.
fn dump(source: &str) -> String {
    let engine = engine_with(Vec::new());
    let mut tokens = Tokens::from_source(source).expect("source tokenizes");
    engine.pipeline().run(&mut tokens).expect("pipeline runs");

    tokens
        .iter()
        .map(|t| {
            let kind = tokens
                .custom_kinds()
                .name_of(t.kind)
                .map(String::from)
                .unwrap_or_else(|| t.kind.to_string());
            format!("{} {:?}", kind, t.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_closure_use() {
    insta::assert_snapshot!(dump("<?php $f = function () use ($a) {};"), @r#"
    OpenTag "<?php "
    Variable "$f"
    Whitespace " "
    Char "="
    Whitespace " "
    Function "function"
    Whitespace " "
    Char "("
    Char ")"
    Whitespace " "
    use_lambda "use"
    Whitespace " "
    Char "("
    Variable "$a"
    Char ")"
    Whitespace " "
    Char "{"
    Char "}"
    Char ";"
    "#);
}

#[test]
fn test_trait_use_and_namespace_operator() {
    insta::assert_snapshot!(dump("<?php\nuse Foo;\nclass A { use B; }\nnamespace\\f();"), @r#"
    OpenTag "<?php\n"
    Use "use"
    Whitespace " "
    Identifier "Foo"
    Char ";"
    Whitespace "\n"
    Class "class"
    Whitespace " "
    Identifier "A"
    Whitespace " "
    Char "{"
    Whitespace " "
    use_trait "use"
    Whitespace " "
    Identifier "B"
    Char ";"
    Whitespace " "
    Char "}"
    Whitespace "\n"
    namespace_operator "namespace"
    NsSeparator "\\"
    Identifier "f"
    Char "("
    Char ")"
    Char ";"
    "#);
}
