//! An application module that records every callback it receives and can be
//! told to fail any of them.

use alloc::sync::Arc;

use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::{Counterparty, Order};
use ibc_core::channel::types::error::{ChannelError, PacketError};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, PortId, Sequence};
use ibc_core::port::error::PortError;
use ibc_core::port::{ChannelCapability, PortCapability, PortKeeper};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use ibc_core::router::module::Module;
use ibc_core::router::types::event::ModuleEvent;
use ibc_core::router::types::module::{ModuleExtras, ModuleId};
use parking_lot::Mutex;

pub const MOCK_MODULE_ID_STR: &str = "mock";

/// The acknowledgement a [`MockModule`] writes unless told otherwise.
pub const MOCK_ACK: &[u8] = b"mock-ack";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Callback {
    Register {
        port_id: PortId,
        channel_id: ChannelId,
    },
    CloseInit {
        port_id: PortId,
        channel_id: ChannelId,
    },
    CloseConfirm {
        port_id: PortId,
        channel_id: ChannelId,
    },
    Recv {
        sequence: Sequence,
    },
    Ack {
        sequence: Sequence,
        acknowledgement: Vec<u8>,
    },
    Timeout {
        sequence: Sequence,
    },
}

/// Knobs that make the module misbehave.
#[derive(Clone, Debug)]
pub struct MockBehaviour {
    pub reject_register: bool,
    pub reject_close: bool,
    pub reject_recv: bool,
    pub fail_ack_execute: bool,
    pub fail_timeout_execute: bool,
    pub ack: Vec<u8>,
}

impl Default for MockBehaviour {
    fn default() -> Self {
        Self {
            reject_register: false,
            reject_close: false,
            reject_recv: false,
            fail_ack_execute: false,
            fail_timeout_execute: false,
            ack: MOCK_ACK.to_vec(),
        }
    }
}

/// Shared view of a [`MockModule`] that stays usable after the module has
/// been moved into a router.
#[derive(Clone, Debug, Default)]
pub struct MockModuleHandle {
    callbacks: Arc<Mutex<Vec<Callback>>>,
    behaviour: Arc<Mutex<MockBehaviour>>,
}

impl MockModuleHandle {
    pub fn callbacks(&self) -> Vec<Callback> {
        self.callbacks.lock().clone()
    }

    pub fn configure(&self, f: impl FnOnce(&mut MockBehaviour)) {
        f(&mut self.behaviour.lock())
    }

    fn record(&self, callback: Callback) {
        self.callbacks.lock().push(callback)
    }

    fn behaviour(&self) -> MockBehaviour {
        self.behaviour.lock().clone()
    }
}

#[derive(Debug)]
pub struct MockModule {
    port_caps: BTreeMap<PortId, PortCapability>,
    channel_caps: BTreeMap<(PortId, ChannelId), ChannelCapability>,
    handle: MockModuleHandle,
}

impl MockModule {
    pub fn bind(port_keeper: &mut PortKeeper, port_id: PortId) -> Result<Self, PortError> {
        let cap = port_keeper.bind_port(
            port_id.clone(),
            ModuleId::new(MOCK_MODULE_ID_STR.to_string()),
        )?;

        let mut port_caps = BTreeMap::new();
        port_caps.insert(port_id, cap);

        Ok(Self {
            port_caps,
            channel_caps: BTreeMap::new(),
            handle: MockModuleHandle::default(),
        })
    }

    pub fn handle(&self) -> MockModuleHandle {
        self.handle.clone()
    }

    fn extras(kind: &str, sequence: Sequence) -> ModuleExtras {
        ModuleExtras {
            events: vec![ModuleEvent::new(kind).with_attribute("sequence", sequence)],
            log: vec![format!("mock module: {kind} {sequence}")],
        }
    }
}

impl Module for MockModule {
    fn port_capability(&self, port_id: &PortId) -> Option<&PortCapability> {
        self.port_caps.get(port_id)
    }

    fn channel_capability(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Option<&ChannelCapability> {
        self.channel_caps
            .get(&(port_id.clone(), channel_id.clone()))
    }

    fn claim_channel_capability(&mut self, capability: ChannelCapability) {
        self.handle.record(Callback::Register {
            port_id: capability.port_id().clone(),
            channel_id: capability.channel_id().clone(),
        });
        self.channel_caps.insert(
            (capability.port_id().clone(), capability.channel_id().clone()),
            capability,
        );
    }

    fn on_chan_register_validate(
        &self,
        _order: Order,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        _version: &Version,
    ) -> Result<(), ChannelError> {
        if self.handle.behaviour().reject_register {
            return Err(ChannelError::AppModule {
                description: "mock module refuses new channels".to_string(),
            });
        }
        Ok(())
    }

    fn on_chan_close_init_validate(
        &self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), ChannelError> {
        if self.handle.behaviour().reject_close {
            return Err(ChannelError::AppModule {
                description: "mock module refuses to close".to_string(),
            });
        }
        Ok(())
    }

    fn on_chan_close_init_execute(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        self.handle.record(Callback::CloseInit {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        });
        Ok(ModuleExtras::empty())
    }

    fn on_chan_close_confirm_execute(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        self.handle.record(Callback::CloseConfirm {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        });
        Ok(ModuleExtras::empty())
    }

    fn on_recv_packet_validate(&self, packet: &Packet, _relayer: &Signer) -> Result<(), PacketError> {
        if self.handle.behaviour().reject_recv {
            return Err(PacketError::AppModule {
                description: format!("mock module refuses packet {}", packet.seq_on_a),
            });
        }
        Ok(())
    }

    fn on_recv_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Acknowledgement) {
        self.handle.record(Callback::Recv {
            sequence: packet.seq_on_a,
        });
        let ack = self
            .handle
            .behaviour()
            .ack
            .try_into()
            .expect("mock acknowledgement is never empty");
        (Self::extras("mock_recv", packet.seq_on_a), ack)
    }

    fn on_acknowledgement_packet_validate(
        &self,
        _packet: &Packet,
        _acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> Result<(), PacketError> {
        Ok(())
    }

    fn on_acknowledgement_packet_execute(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        if self.handle.behaviour().fail_ack_execute {
            return (
                ModuleExtras::empty(),
                Err(PacketError::AppModule {
                    description: "mock ack execution failed".to_string(),
                }),
            );
        }
        self.handle.record(Callback::Ack {
            sequence: packet.seq_on_a,
            acknowledgement: acknowledgement.as_bytes().to_vec(),
        });
        (Self::extras("mock_ack", packet.seq_on_a), Ok(()))
    }

    fn on_timeout_packet_validate(&self, _packet: &Packet, _relayer: &Signer) -> Result<(), PacketError> {
        Ok(())
    }

    fn on_timeout_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        if self.handle.behaviour().fail_timeout_execute {
            return (
                ModuleExtras::empty(),
                Err(PacketError::AppModule {
                    description: "mock timeout execution failed".to_string(),
                }),
            );
        }
        self.handle.record(Callback::Timeout {
            sequence: packet.seq_on_a,
        });
        (Self::extras("mock_timeout", packet.seq_on_a), Ok(()))
    }
}
