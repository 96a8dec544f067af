//! Fixture tests for merging `else if`

use phpfix::fixer::ElseifFixer;
use phpfix::testing::{do_test, engine_with};
use rstest::rstest;

#[rstest]
#[case::merged("<?php if ($a) {} elseif ($b) {}", Some("<?php if ($a) {} else if ($b) {}"))]
#[case::uppercase("<?php if ($a) {} elseif ($b) {}", Some("<?php if ($a) {} ELSE IF ($b) {}"))]
#[case::chain(
    "<?php if ($a) {} elseif ($b) {} elseif ($c) {} else {}",
    Some("<?php if ($a) {} else if ($b) {} else  if ($c) {} else {}")
)]
#[case::newlines(
    "<?php\nif ($a) {\n    foo();\n} elseif ($b) {\n    bar();\n}\n",
    Some("<?php\nif ($a) {\n    foo();\n} else\nif ($b) {\n    bar();\n}\n")
)]
#[case::string_literal("<?php if ($a) { echo \"else if\"; }", None)]
#[case::comment("<?php if ($a) {} // else if\n", None)]
#[case::else_block("<?php if ($a) {} else { if ($b) {} }", None)]
#[case::nowdoc("<?php\n$s = <<<'EOT'\nelse if\nEOT;\nif ($a) {}\n", None)]
#[case::heredoc_with_apostrophe(
    "<?php\n$s = <<<EOT\nIt's else if here\nEOT;\nif ($a) {} elseif ($b) {}\n",
    Some("<?php\n$s = <<<EOT\nIt's else if here\nEOT;\nif ($a) {} else if ($b) {}\n")
)]
#[case::indented_heredoc(
    "<?php\nif ($a) {\n    $s = <<<\"EOT\"\n        else if\n        EOT;\n}\n",
    None
)]
#[case::backtick("<?php if ($a) { $out = `else if`; }", None)]
fn test_elseif(#[case] expected: &str, #[case] input: Option<&str>) {
    let engine = engine_with(vec![Box::new(ElseifFixer)]);
    do_test(&engine, expected, input);
}
