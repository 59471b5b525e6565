pub const USAGE_MSG: &str = "\
usage: smallsh [--max-line=bytes] [--max-args=count] [--max-jobs=count]
       smallsh -h | -V";

const DESCRIPTOR: &str = "smallsh - a small interactive command shell";

const HELP_MSG: &str = "Options:
  -h, --help                    display help message and exit
  -V, --version                 display version information and exit
      --max-line=bytes          longest accepted command line (default 2048)
      --max-args=count          most words accepted on one command line (default 512)
      --max-jobs=count          background jobs tracked at the same time (default 100)

Built-in commands:
  cd [directory]                change the working directory, $HOME by default
  status                        show how the last foreground command ended
  exit                          kill all background jobs and leave the shell";

pub fn long_help_message() -> String {
    format!("{DESCRIPTOR}\n{USAGE_MSG}\n{HELP_MSG}")
}
