use std::io;

use crate::{
    common::Error,
    exec::ExitReason,
    log::dev_debug,
    system::{
        interface::ProcessId,
        kill,
        signal::SignalNumber,
        wait::{Wait, WaitError, WaitOptions},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Never held a process.
    Empty,
    Running(ProcessId),
    /// Held a process that has been reaped.
    Reusable,
}

/// What a reaper pass found out about a background job.
#[derive(Debug)]
pub(crate) enum Reaped {
    Done(ProcessId, ExitReason),
    /// The job could not be polled anymore; its slot has been released.
    Lost(ProcessId, io::Error),
}

/// A fixed number of slots tracking background processes.
///
/// Insertion takes the first slot that is not running, so the `Empty` slots always form the tail
/// of the table and a scan can stop at the first one.
pub(crate) struct JobTable {
    slots: Box<[Slot]>,
    dropped: usize,
}

impl JobTable {
    pub(crate) fn new(capacity: usize) -> Self {
        JobTable {
            slots: vec![Slot::Empty; capacity].into_boxed_slice(),
            dropped: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// How many jobs could not be tracked because the table was full.
    pub(crate) fn dropped(&self) -> usize {
        self.dropped
    }

    fn used_slots(&mut self) -> impl Iterator<Item = &mut Slot> {
        self.slots
            .iter_mut()
            .take_while(|slot| **slot != Slot::Empty)
    }

    pub(crate) fn running(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.slots
            .iter()
            .take_while(|slot| **slot != Slot::Empty)
            .filter_map(|slot| match slot {
                Slot::Running(pid) => Some(*pid),
                _ => None,
            })
    }

    pub(crate) fn len(&self) -> usize {
        self.running().count()
    }

    /// Start tracking `pid`. Returns `false`, and counts the job as dropped, if every slot is
    /// taken.
    pub(crate) fn insert(&mut self, pid: ProcessId) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|slot| !matches!(slot, Slot::Running(_)))
        {
            Some(slot) => {
                *slot = Slot::Running(pid);
                true
            }
            None => {
                self.dropped += 1;
                false
            }
        }
    }

    /// Poll every running job without blocking and release the slots of the ones that
    /// terminated.
    pub(crate) fn reap(&mut self) -> Vec<Reaped> {
        let mut reaped = Vec::new();

        for slot in self.used_slots() {
            let Slot::Running(pid) = *slot else {
                continue;
            };

            match pid.wait(WaitOptions::new().no_hang()) {
                Err(WaitError::NotReady) => {}
                Err(WaitError::Io(err)) => {
                    *slot = Slot::Reusable;
                    reaped.push(Reaped::Lost(pid, err));
                }
                Ok((_, status)) => match ExitReason::from_status(&status) {
                    Some(reason) => {
                        *slot = Slot::Reusable;
                        reaped.push(Reaped::Done(pid, reason));
                    }
                    None => dev_debug!("{pid} changed state without terminating: {status:?}"),
                },
            }
        }

        reaped
    }

    /// Send `signal` to every running job. A failure for one job does not stop the others.
    pub(crate) fn signal_all(&self, signal: SignalNumber) -> Vec<Error> {
        self.running()
            .filter_map(|pid| kill(pid, signal).err().map(|err| Error::Kill(pid, err)))
            .collect()
    }
}
