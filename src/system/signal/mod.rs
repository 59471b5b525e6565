//! Utilities to handle signal dispositions.
#![warn(unused)]
mod handler;
mod set;

pub(crate) use handler::{SignalHandler, SignalHandlerBehavior};

pub(crate) type SignalNumber = libc::c_int;

macro_rules! define_consts {
    ($($signal:ident,)*) => {
        pub(crate) mod consts {
            pub(crate) use libc::{$($signal,)*};
        }

        pub(crate) fn signal_name(signal: SignalNumber) -> Option<&'static str> {
            match signal {
                $(consts::$signal => Some(stringify!($signal)),)*
                _ => None,
            }
        }
    };
}

define_consts! {
    SIGINT,
    SIGQUIT,
    SIGTERM,
    SIGHUP,
    SIGALRM,
    SIGPIPE,
    SIGUSR1,
    SIGUSR2,
    SIGCHLD,
    SIGSEGV,
    SIGABRT,
    SIGKILL,
    SIGSTOP,
}

#[cfg(test)]
mod tests {
    use super::{consts::*, signal_name};

    #[test]
    fn names_of_known_signals() {
        assert_eq!(signal_name(SIGINT), Some("SIGINT"));
        assert_eq!(signal_name(SIGKILL), Some("SIGKILL"));
        assert_eq!(signal_name(SIGTERM), Some("SIGTERM"));
        assert_eq!(signal_name(0), None);
    }
}
