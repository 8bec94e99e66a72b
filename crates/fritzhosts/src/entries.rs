//! Index walk over the host table.
//!
//! The device exposes hosts one at a time by ordinal. The walk starts at 0
//! and stops on the first out-of-range error; any other error is yielded
//! once and ends the walk.

use std::iter::FusedIterator;

use tr064::{ActionInvoker, Arguments, Tr064Error};
use tracing::debug;

use crate::record::HostRecord;
use crate::{generic_host_entry, HostsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Fetching(u32),
    Done,
}

/// Lazy sequence of raw `GetGenericHostEntry` results.
pub struct HostEntries<'a, A: ActionInvoker> {
    invoker: &'a A,
    cursor: Cursor,
}

impl<'a, A: ActionInvoker> HostEntries<'a, A> {
    pub(crate) fn new(invoker: &'a A) -> Self {
        Self {
            invoker,
            cursor: Cursor::Fetching(0),
        }
    }

    fn finish(&mut self) {
        self.cursor = Cursor::Done;
    }
}

impl<A: ActionInvoker> Iterator for HostEntries<'_, A> {
    type Item = Result<Arguments, HostsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let Cursor::Fetching(index) = self.cursor else {
            return None;
        };
        match generic_host_entry(self.invoker, index) {
            Ok(entry) => {
                self.cursor = index.checked_add(1).map_or(Cursor::Done, Cursor::Fetching);
                Some(Ok(entry))
            }
            Err(HostsError::Action(Tr064Error::IndexOutOfRange(msg))) => {
                debug!(index, reason = %msg, "end of host table");
                self.finish();
                None
            }
            Err(err) => {
                debug!(index, error = %err, "host table walk aborted");
                self.finish();
                Some(Err(err))
            }
        }
    }
}

impl<A: ActionInvoker> FusedIterator for HostEntries<'_, A> {}

/// Lazy sequence of [`HostRecord`]s built from [`HostEntries`].
pub struct HostInfos<'a, A: ActionInvoker> {
    entries: HostEntries<'a, A>,
}

impl<'a, A: ActionInvoker> HostInfos<'a, A> {
    pub(crate) fn new(invoker: &'a A) -> Self {
        Self {
            entries: HostEntries::new(invoker),
        }
    }
}

impl<A: ActionInvoker> Iterator for HostInfos<'_, A> {
    type Item = Result<HostRecord, HostsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.entries.next()? {
            Ok(entry) => entry,
            Err(err) => return Some(Err(err)),
        };
        match HostRecord::from_entry(&entry) {
            Ok(record) => Some(Ok(record)),
            Err(err) => {
                self.entries.finish();
                Some(Err(err.into()))
            }
        }
    }
}

impl<A: ActionInvoker> FusedIterator for HostInfos<'_, A> {}
