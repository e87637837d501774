/// built-in example questions
pub mod cli_examples;
/// interactive terminal menu
pub mod cli_main;
