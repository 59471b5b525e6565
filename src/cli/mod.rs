#![forbid(unsafe_code)]

pub mod help;


#[derive(Debug, Default, PartialEq, Clone)]
pub enum ShellAction {
    Help,
    Version,
    #[default]
    Run,
}

/// Upper bounds on what the shell accepts and tracks.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Limits {
    /// Longest accepted input line in bytes, excluding the newline.
    pub max_line: usize,
    /// Most tokens accepted on one line, control tokens included.
    pub max_arguments: usize,
    /// Number of background jobs that can be tracked at the same time.
    pub max_jobs: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_line: 2048,
            max_arguments: 512,
            max_jobs: 100,
        }
    }
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct ShellOptions {
    pub limits: Limits,
    // resulting action enum
    pub action: ShellAction,
    // actions
    help: bool,
    version: bool,
}

enum ShellArg {
    Flag(String),
    Argument(String, String),
}

impl ShellOptions {
    const TAKES_ARGUMENT: &'static [&'static str] = &["max-line", "max-args", "max-jobs"];

    /// argument assignments preprocessing
    fn normalize_arguments<I>(iter: I) -> Result<Vec<ShellArg>, String>
    where
        I: IntoIterator<Item = String>,
    {
        // the first argument is the shell itself - so we can skip it
        let mut arg_iter = iter.into_iter().skip(1);
        let mut processed: Vec<ShellArg> = vec![];

        while let Some(arg) = arg_iter.next() {
            match arg.as_str() {
                long_arg if long_arg.starts_with("--") => {
                    if let Some((key, value)) = long_arg.split_once('=') {
                        // only accept arguments when one is expected
                        if !Self::TAKES_ARGUMENT.contains(&&key[2..]) {
                            Err(format!("'{key}' does not take any arguments"))?;
                        }
                        processed.push(ShellArg::Argument(key.to_string(), value.to_string()));
                    } else if Self::TAKES_ARGUMENT.contains(&&long_arg[2..]) {
                        if let Some(next) = arg_iter.next() {
                            processed.push(ShellArg::Argument(arg, next));
                        } else {
                            Err(format!("'{long_arg}' expects an argument"))?;
                        }
                    } else {
                        processed.push(ShellArg::Flag(arg));
                    }
                }
                short_arg if short_arg.starts_with('-') && short_arg.len() > 1 => {
                    // split combined shorthand options
                    for char in short_arg.trim_start_matches('-').chars() {
                        processed.push(ShellArg::Flag(format!("-{char}")));
                    }
                }
                argument => Err(format!("unexpected argument '{argument}'"))?,
            }
        }

        Ok(processed)
    }

    /// parse command line arguments from the environment and handle errors
    pub fn from_env() -> Result<ShellOptions, String> {
        Self::try_parse_from(std::env::args())
    }

    /// from the arguments resolve which action should be performed
    fn resolve_action(&mut self) {
        if self.help {
            self.action = ShellAction::Help;
        } else if self.version {
            self.action = ShellAction::Version;
        } else {
            self.action = ShellAction::Run;
        }
    }

    pub fn try_parse_from<I, T>(iter: I) -> Result<ShellOptions, String>
    where
        I: IntoIterator<Item = T>,
        T: Into<String> + Clone,
    {
        let mut options: ShellOptions = Default::default();
        let arg_iter = Self::normalize_arguments(iter.into_iter().map(Into::into))?;

        for arg in arg_iter {
            match arg {
                ShellArg::Flag(flag) => match flag.as_str() {
                    "-h" | "--help" => {
                        options.help = true;
                    }
                    "-V" | "--version" => {
                        options.version = true;
                    }
                    option => {
                        Err(format!("invalid option provided: {option}"))?;
                    }
                },
                ShellArg::Argument(option, value) => match option.as_str() {
                    "--max-line" => {
                        options.limits.max_line = parse_limit(&option, &value)?;
                    }
                    "--max-args" => {
                        options.limits.max_arguments = parse_limit(&option, &value)?;
                    }
                    "--max-jobs" => {
                        options.limits.max_jobs = parse_limit(&option, &value)?;
                    }
                    option => {
                        Err(format!("invalid option provided: {option}"))?;
                    }
                },
            }
        }

        options.resolve_action();

        Ok(options)
    }
}

fn parse_limit(option: &str, value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(format!("'{option}' expects a positive number, got '{value}'")),
    }
}
