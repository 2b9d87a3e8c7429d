//! Defines events emitted during handling of IBC messages

use ibc_core_channel_types::events::{self as ChannelEvents, EventAttribute};
use ibc_core_router_types::event::ModuleEvent;
use ibc_primitives::prelude::*;

const MESSAGE_EVENT: &str = "message";

/// Events created by the IBC component of a chain, destined for a relayer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IbcEvent {
    RegisterChannel(ChannelEvents::RegisterChannel),
    CloseInitChannel(ChannelEvents::CloseInit),
    CloseConfirmChannel(ChannelEvents::CloseConfirm),

    SendPacket(ChannelEvents::SendPacket),
    ReceivePacket(ChannelEvents::ReceivePacket),
    WriteAcknowledgement(ChannelEvents::WriteAcknowledgement),
    AcknowledgePacket(ChannelEvents::AcknowledgePacket),
    TimeoutPacket(ChannelEvents::TimeoutPacket),
    ChannelClosed(ChannelEvents::ChannelClosed),
    PruneAcknowledgement(ChannelEvents::PruneAcknowledgement),

    Module(ModuleEvent),
    Message(MessageEvent),
}

impl IbcEvent {
    pub fn event_type(&self) -> &str {
        match self {
            IbcEvent::RegisterChannel(event) => event.event_type(),
            IbcEvent::CloseInitChannel(event) => event.event_type(),
            IbcEvent::CloseConfirmChannel(event) => event.event_type(),
            IbcEvent::SendPacket(event) => event.event_type(),
            IbcEvent::ReceivePacket(event) => event.event_type(),
            IbcEvent::WriteAcknowledgement(event) => event.event_type(),
            IbcEvent::AcknowledgePacket(event) => event.event_type(),
            IbcEvent::TimeoutPacket(event) => event.event_type(),
            IbcEvent::ChannelClosed(event) => event.event_type(),
            IbcEvent::PruneAcknowledgement(event) => event.event_type(),
            IbcEvent::Module(module_event) => module_event.kind.as_str(),
            IbcEvent::Message(_) => MESSAGE_EVENT,
        }
    }

    /// Flattened key/value attributes, in the order a relayer indexes them.
    pub fn attributes(&self) -> Vec<EventAttribute> {
        match self {
            IbcEvent::RegisterChannel(event) => event.attributes(),
            IbcEvent::CloseInitChannel(event) => event.attributes(),
            IbcEvent::CloseConfirmChannel(event) => event.attributes(),
            IbcEvent::SendPacket(event) => event.attributes(),
            IbcEvent::ReceivePacket(event) => event.attributes(),
            IbcEvent::WriteAcknowledgement(event) => event.attributes(),
            IbcEvent::AcknowledgePacket(event) => event.attributes(),
            IbcEvent::TimeoutPacket(event) => event.attributes(),
            IbcEvent::ChannelClosed(event) => event.attributes(),
            IbcEvent::PruneAcknowledgement(event) => event.attributes(),
            IbcEvent::Module(module_event) => module_event
                .attributes
                .iter()
                .map(|attr| (&attr.key, &attr.value).into())
                .collect(),
            IbcEvent::Message(event) => vec![("module", event.module_attribute()).into()],
        }
    }

    /// The attribute value stored under `key`, if any.
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes()
            .into_iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value)
    }
}

/// The `message` event that precedes every core event, naming the module
/// that produced it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageEvent {
    Channel,
    // stores the module name
    Module(String),
}

impl MessageEvent {
    /// The event has only one attribute, with key `module`.
    /// This method gets the associated value.
    pub fn module_attribute(&self) -> String {
        match self {
            MessageEvent::Channel => "ibc_channel".to_string(),
            MessageEvent::Module(module_name) => module_name.clone(),
        }
    }
}

impl From<MessageEvent> for IbcEvent {
    fn from(e: MessageEvent) -> Self {
        IbcEvent::Message(e)
    }
}

impl From<ModuleEvent> for IbcEvent {
    fn from(e: ModuleEvent) -> Self {
        IbcEvent::Module(e)
    }
}
