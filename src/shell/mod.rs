#![deny(unsafe_code)]

mod builtin;
mod input;
mod jobs;
mod status;
mod tokens;

use std::io::{self, BufRead, Write};

use crate::{
    cli::{help, Limits, ShellAction, ShellOptions},
    common::{CommandDescriptor, Error},
    exec::{self, ExitReason},
    log::{dev_info, user_error, user_warn, ShellLogger},
    system::signal::{consts::SIGINT, SignalHandler, SignalHandlerBehavior},
};

use self::{
    builtin::Builtin,
    input::LineReader,
    jobs::{JobTable, Reaped},
    status::RunStatus,
};

pub(crate) use tokens::Tokens;

const PROMPT: &str = ": ";

/// Whether the shell keeps reading commands after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// The interactive loop and the state it keeps between lines. Prompts and notices go to `out`.
pub(crate) struct Shell<W> {
    jobs: JobTable,
    status: RunStatus,
    limits: Limits,
    out: W,
}

impl<W: Write> Shell<W> {
    pub(crate) fn new(limits: Limits, out: W) -> Self {
        Shell {
            jobs: JobTable::new(limits.max_jobs),
            status: RunStatus::default(),
            limits,
            out,
        }
    }

    /// Read and execute lines until `exit` or the end of the input. Returns the exit code of
    /// the shell.
    pub(crate) fn run<R: BufRead>(&mut self, input: R) -> i32 {
        let mut reader = LineReader::new(input, self.limits.max_line);

        loop {
            self.poll_jobs();

            let _ = write!(self.out, "{PROMPT}");
            let _ = self.out.flush();

            let line = match reader.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    dev_info!("end of input");
                    let _ = writeln!(self.out);
                    self.finish();
                    return libc::EXIT_SUCCESS;
                }
                Err(err @ Error::LineTooLong(_)) => {
                    notice!(self.out, "{err}");
                    continue;
                }
                Err(err) => {
                    user_error!("cannot read input: {err}");
                    self.finish();
                    return libc::EXIT_FAILURE;
                }
            };

            if self.dispatch(&line) == Flow::Exit {
                return libc::EXIT_SUCCESS;
            }
        }
    }

    /// Execute a single line.
    pub(crate) fn dispatch(&mut self, line: &str) -> Flow {
        let tokens = match Tokens::parse_bounded(line, self.limits.max_arguments) {
            Ok(tokens) => tokens,
            Err(err) => {
                notice!(self.out, "{err}");
                return Flow::Continue;
            }
        };

        if tokens.is_empty() || tokens.is_comment() {
            return Flow::Continue;
        }

        if let Some(builtin) = tokens.program().and_then(Builtin::lookup) {
            return self.run_builtin(builtin, &tokens);
        }

        self.execute(tokens);
        Flow::Continue
    }

    fn execute(&mut self, tokens: Tokens) {
        let (tokens, mode) = tokens.detect_mode();

        let command = match CommandDescriptor::new(tokens.as_slice(), mode) {
            Ok(Some(command)) => command,
            // a lone `&`
            Ok(None) => return,
            Err(err) => {
                self.report(err);
                return;
            }
        };

        let child = match exec::spawn(&command) {
            Ok(child) => child,
            Err(err) => {
                self.report(err);
                return;
            }
        };

        if let Some(err) = &child.exec_error {
            dev_info!("exec of {} failed: {err}", command.program());
            notice!(
                self.out,
                "Execution Error: {} is not a valid command",
                command.program()
            );
        }

        if command.is_background() {
            notice!(self.out, "background pid is {}", child.pid);
            if !self.jobs.insert(child.pid) {
                user_warn!(
                    "job table is full ({} jobs), background pid {} will not be reported \
                     ({} untracked so far)",
                    self.jobs.capacity(),
                    child.pid,
                    self.jobs.dropped()
                );
            }
            return;
        }

        match exec::wait_foreground(child.pid) {
            Ok(reason) => {
                self.status.record(reason);
                if let ExitReason::Signal(_) = reason {
                    notice!(self.out, "{reason}");
                }
            }
            Err(err) => self.report(err),
        }
    }

    /// Report background jobs that terminated since the last prompt.
    fn poll_jobs(&mut self) {
        for reaped in self.jobs.reap() {
            match reaped {
                Reaped::Done(pid, reason) => {
                    notice!(self.out, "background pid {pid} is done: {reason}");
                }
                Reaped::Lost(pid, err) => {
                    user_error!("{}", Error::Wait(pid, err));
                    self.status.fail();
                }
            }
        }
    }

    /// A command could not be run; it counts as failed.
    fn report(&mut self, err: Error) {
        if err.is_system() {
            user_error!("{err}");
        } else {
            notice!(self.out, "{err}");
        }
        self.status.fail();
    }

    // Leaving without `exit` still cleans up the background jobs.
    fn finish(&mut self) {
        let _ = self.run_builtin(Builtin::Exit, &Tokens::default());
    }
}

pub fn main() {
    ShellLogger::new("smallsh: ").into_global_logger();

    let options = match ShellOptions::from_env() {
        Ok(options) => options,
        Err(error) => {
            eprintln_ignore_io_error!("smallsh: {error}\n{}", help::USAGE_MSG);
            std::process::exit(1);
        }
    };

    match options.action {
        ShellAction::Help => {
            println_ignore_io_error!("{}", help::long_help_message());
            std::process::exit(0);
        }
        ShellAction::Version => {
            println_ignore_io_error!("smallsh {}", env!("CARGO_PKG_VERSION"));
            std::process::exit(0);
        }
        ShellAction::Run => {}
    }

    // The shell itself survives ^C; foreground children restore the default.
    match SignalHandler::register(SIGINT, SignalHandlerBehavior::Ignore) {
        Ok(handler) => handler.forget(),
        Err(err) => user_warn!("cannot ignore SIGINT: {err}"),
    }

    let code = Shell::new(options.limits, io::stdout()).run(io::stdin().lock());
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{Flow, Shell};
    use crate::{
        cli::Limits,
        system::{
            interface::ProcessId,
            kill,
            signal::consts::SIGKILL,
            wait::{Wait, WaitOptions},
        },
    };

    fn shell() -> Shell<Vec<u8>> {
        Shell::new(Limits::default(), Vec::new())
    }

    fn take_output(shell: &mut Shell<Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(&mut shell.out)).unwrap()
    }

    fn status_of(shell: &mut Shell<Vec<u8>>) -> String {
        take_output(shell);
        assert_eq!(shell.dispatch("status"), Flow::Continue);
        take_output(shell)
    }

    #[test]
    fn status_follows_foreground_commands() {
        let mut shell = shell();
        assert_eq!(status_of(&mut shell), "exit value 0\n");

        shell.dispatch("false");
        assert_eq!(status_of(&mut shell), "exit value 1\n");

        shell.dispatch("true");
        assert_eq!(status_of(&mut shell), "exit value 0\n");
    }

    #[test]
    fn foreground_signal_is_announced() {
        let script = std::env::temp_dir().join(format!("smallsh-term-{}.sh", std::process::id()));
        std::fs::write(&script, "kill -TERM $$\n").unwrap();

        let mut shell = shell();
        shell.dispatch(&format!("sh {}", script.display()));
        std::fs::remove_file(&script).unwrap();

        assert_eq!(take_output(&mut shell), "terminated by signal 15\n");
        assert_eq!(status_of(&mut shell), "terminated by signal 15\n");

        shell.dispatch("true");
        assert_eq!(status_of(&mut shell), "exit value 0\n");
    }

    #[test]
    fn invalid_command() {
        let mut shell = shell();
        shell.dispatch("definitely-not-a-command-smallsh");
        assert_eq!(
            take_output(&mut shell),
            "Execution Error: definitely-not-a-command-smallsh is not a valid command\n"
        );
        assert_eq!(status_of(&mut shell), "exit value 1\n");
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let mut shell = shell();
        shell.dispatch("false");
        for line in ["", "   ", "# true", "#status"] {
            assert_eq!(shell.dispatch(line), Flow::Continue);
        }
        assert_eq!(take_output(&mut shell), "");
        assert_eq!(status_of(&mut shell), "exit value 1\n");
    }

    #[test]
    fn missing_input_file() {
        let mut shell = shell();
        shell.dispatch("cat < /nonexistent/smallsh-input");
        let output = take_output(&mut shell);
        assert!(
            output.starts_with("File Error: cannot open /nonexistent/smallsh-input for input"),
            "{output}"
        );
        assert_eq!(status_of(&mut shell), "exit value 1\n");
    }

    #[test]
    fn too_many_arguments() {
        let mut shell = Shell::new(
            Limits {
                max_arguments: 2,
                ..Limits::default()
            },
            Vec::new(),
        );
        shell.dispatch("echo a b");
        assert!(take_output(&mut shell).starts_with("too many arguments"));
        assert_eq!(status_of(&mut shell), "exit value 0\n");
    }

    #[test]
    fn background_jobs_are_reported_when_done() {
        let mut shell = shell();
        shell.dispatch("sleep 0.6 &");
        shell.dispatch("sleep 0.1 &");
        let started = take_output(&mut shell);
        let pids: Vec<&str> = started
            .lines()
            .map(|line| line.strip_prefix("background pid is ").unwrap())
            .collect();
        assert_eq!(pids.len(), 2);
        assert_eq!(shell.jobs.len(), 2);

        let mut reports = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(10);
        while reports.len() < 2 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
            shell.poll_jobs();
            reports.extend(take_output(&mut shell).lines().map(str::to_string));
        }

        assert_eq!(
            reports,
            vec![
                format!("background pid {} is done: exit value 0", pids[1]),
                format!("background pid {} is done: exit value 0", pids[0]),
            ]
        );
        assert_eq!(shell.jobs.len(), 0);
    }

    #[test]
    fn background_launch_returns_immediately() {
        let mut shell = shell();
        let started = Instant::now();
        assert_eq!(shell.dispatch("sleep 5 &"), Flow::Continue);
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(shell.jobs.len(), 1);
        assert_eq!(shell.dispatch("exit"), Flow::Exit);
    }

    #[test]
    fn full_job_table_still_runs_the_job() {
        let mut shell = Shell::new(
            Limits {
                max_jobs: 1,
                ..Limits::default()
            },
            Vec::new(),
        );
        shell.dispatch("sleep 5 &");
        shell.dispatch("sleep 5 &");
        let started = take_output(&mut shell);
        let pids: Vec<i32> = started
            .lines()
            .map(|line| {
                line.strip_prefix("background pid is ")
                    .unwrap()
                    .parse()
                    .unwrap()
            })
            .collect();
        assert_eq!(pids.len(), 2);
        assert_eq!(shell.jobs.len(), 1);
        assert_eq!(shell.jobs.dropped(), 1);

        // the untracked job is not killed by `exit`
        let untracked = ProcessId::new(pids[1]);
        kill(untracked, SIGKILL).unwrap();
        untracked.wait(WaitOptions::new()).unwrap();
        assert_eq!(shell.dispatch("exit"), Flow::Exit);
    }

    #[test]
    fn background_jobs_do_not_change_status() {
        let mut shell = shell();
        shell.dispatch("false &");
        assert_eq!(status_of(&mut shell), "exit value 0\n");
        assert_eq!(shell.dispatch("exit"), Flow::Exit);
    }

    #[test]
    fn exit_kills_background_jobs() {
        let mut shell = shell();
        shell.dispatch("sleep 30 &");
        assert_eq!(shell.dispatch("exit"), Flow::Exit);

        let deadline = Instant::now() + Duration::from_secs(10);
        while shell.jobs.len() > 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
            shell.poll_jobs();
        }
        let output = take_output(&mut shell);
        assert!(output.ends_with("is done: terminated by signal 9\n"), "{output}");
    }

    #[test]
    fn run_until_end_of_input() {
        let mut shell = shell();
        let code = shell.run("true\nstatus\n".as_bytes());
        assert_eq!(code, 0);
        assert_eq!(take_output(&mut shell), ": : exit value 0\n: \n");
    }

    #[test]
    fn run_until_exit() {
        let mut shell = shell();
        let code = shell.run("exit\nstatus\n".as_bytes());
        assert_eq!(code, 0);
        assert_eq!(take_output(&mut shell), ": ");
    }

    #[test]
    fn long_lines_are_skipped() {
        let mut shell = Shell::new(
            Limits {
                max_line: 8,
                ..Limits::default()
            },
            Vec::new(),
        );
        shell.run("false\necho 1234567890\nstatus\n".as_bytes());
        let output = take_output(&mut shell);
        assert!(output.contains("input line too long"), "{output}");
        assert!(output.ends_with(": exit value 1\n: \n"), "{output}");
    }
}
