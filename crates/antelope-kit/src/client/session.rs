//! Transport handle ownership.
//!
//! A [`ConnectionManager`] decides which transport handle serves a call:
//!
//! | State | Handle used | Closed by us |
//! |-------|-------------|--------------|
//! | ephemeral | a fresh one per call | yes, right after the call |
//! | external | the caller's | never |
//! | scoped | one per session, created on first use | at session end, if we created it |
//! | released | none, every call fails with `UseAfterClose` | - |

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::TransportError;
use crate::transport::{Connector, Transport};

enum HandleState {
    Ephemeral,
    External(Arc<dyn Transport>),
    Scoped {
        transport: Option<Arc<dyn Transport>>,
        owned: bool,
    },
    Released,
}

/// Why a session could not be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenError {
    AlreadyOpen,
    Released,
}

pub(crate) struct ConnectionManager {
    connector: Arc<dyn Connector>,
    state: Mutex<HandleState>,
}

impl ConnectionManager {
    pub(crate) fn new(connector: Arc<dyn Connector>, transport: Option<Arc<dyn Transport>>) -> Self {
        let state = match transport {
            Some(transport) => HandleState::External(transport),
            None => HandleState::Ephemeral,
        };
        Self {
            connector,
            state: Mutex::new(state),
        }
    }

    fn state(&self) -> MutexGuard<'_, HandleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hand out the handle for one call.
    ///
    /// Ephemeral handles are created outside the state lock; a session
    /// handle is created under it, exactly once.
    pub(crate) fn acquire(&self) -> Result<Lease, TransportError> {
        let mut state = self.state();
        match &mut *state {
            HandleState::Ephemeral => {}
            HandleState::External(transport) => {
                return Ok(Lease {
                    transport: transport.clone(),
                    ephemeral: false,
                });
            }
            HandleState::Scoped { transport: slot, .. } => {
                let transport = if let Some(transport) = slot.as_ref() {
                    transport.clone()
                } else {
                    tracing::trace!("creating session transport");
                    let created = self.connector.connect()?;
                    *slot = Some(created.clone());
                    created
                };
                return Ok(Lease {
                    transport,
                    ephemeral: false,
                });
            }
            HandleState::Released => return Err(TransportError::Closed),
        }
        drop(state);

        tracing::trace!("creating ephemeral transport");
        Ok(Lease {
            transport: self.connector.connect()?,
            ephemeral: true,
        })
    }

    /// Bind calls to a single handle until [`release`](Self::release).
    pub(crate) fn open(&self) -> Result<(), OpenError> {
        let mut state = self.state();
        let next = match &*state {
            HandleState::Ephemeral => HandleState::Scoped {
                transport: None,
                owned: true,
            },
            HandleState::External(transport) => HandleState::Scoped {
                transport: Some(transport.clone()),
                owned: false,
            },
            HandleState::Scoped { .. } => return Err(OpenError::AlreadyOpen),
            HandleState::Released => return Err(OpenError::Released),
        };
        *state = next;
        Ok(())
    }

    /// End the session. Handles we created are closed exactly once; a
    /// caller-supplied handle is left alone.
    pub(crate) fn release(&self) {
        let previous = std::mem::replace(&mut *self.state(), HandleState::Released);
        if let HandleState::Scoped {
            transport: Some(transport),
            owned: true,
        } = previous
        {
            tracing::trace!("closing session transport");
            transport.close();
        }
    }

    pub(crate) fn is_released(&self) -> bool {
        matches!(*self.state(), HandleState::Released)
    }

    pub(crate) fn is_scoped(&self) -> bool {
        matches!(*self.state(), HandleState::Scoped { .. })
    }
}

/// A handle borrowed for a single call. Ephemeral handles are closed when
/// the lease is dropped, whatever the outcome of the call.
pub(crate) struct Lease {
    transport: Arc<dyn Transport>,
    ephemeral: bool,
}

impl Lease {
    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        if self.ephemeral {
            self.transport.close();
        }
    }
}
