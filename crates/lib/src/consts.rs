/// Prefix the runner puts in front of every action input exposed through the environment.
pub const INPUT_PREFIX: &str = "INPUT_";

/// Name of the multi-line input holding `<key>: <value>` declarations.
pub const INPUT_ENV: &str = "env";

/// Name of the input that selects the shell interpreter.
pub const INPUT_SHELL: &str = "shell";

/// Environment variable consulted when the `shell` input is empty.
pub const SHELL_VAR: &str = "SHELL";

/// Interpreter used when neither the `shell` input nor `$SHELL` is set.
pub const DEFAULT_SHELL: &str = "sh";

/// Commands that already write their argument to stdout.
pub const OUTPUT_COMMANDS: [&str; 3] = ["echo", "print", "cat"];

/// Prefix of the random heredoc delimiter used in env files.
pub const DELIMITER_PREFIX: &str = "ghadelimiter_";
