//! Fixture tests for removing empty return annotations

use phpfix::fixer::PhpdocNoEmptyReturnFixer;
use phpfix::testing::{do_test, engine_with};
use rstest::rstest;

#[rstest]
#[case::void(
    "<?php\n    /**\n     * Does something.\n     *\n     */\n    function foo() {}\n",
    Some("<?php\n    /**\n     * Does something.\n     *\n     * @return void\n     */\n    function foo() {}\n")
)]
#[case::null(
    "<?php\n/**\n * @param int $a\n */\nfunction foo($a) {}\n",
    Some("<?php\n/**\n * @param int $a\n * @return null\n */\nfunction foo($a) {}\n")
)]
#[case::with_description(
    "<?php\n/**\n * @param int $a\n */\nfunction foo($a) {}\n",
    Some("<?php\n/**\n * @param int $a\n * @return void Nothing\n *         at all.\n */\nfunction foo($a) {}\n")
)]
#[case::union_void("<?php\n/**\n * @return void|int\n */\nfunction foo() {}\n", None)]
#[case::union_null("<?php\n/**\n * @return null|Foo\n */\nfunction foo() {}\n", None)]
#[case::real_type("<?php\n/**\n * @return int\n */\nfunction foo() {}\n", None)]
#[case::other_tag("<?php\n/**\n * @param void $a\n */\nfunction foo($a) {}\n", None)]
#[case::single_line("<?php\n/** @return void */\nfunction foo() {}\n", None)]
fn test_no_empty_return(#[case] expected: &str, #[case] input: Option<&str>) {
    let engine = engine_with(vec![Box::new(PhpdocNoEmptyReturnFixer)]);
    do_test(&engine, expected, input);
}
