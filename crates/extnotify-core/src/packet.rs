use crate::consts::ASCII_BELL;

pub type NodeNum = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortNum {
    TextMessage,
    Other(u32),
}

/// The decoded parts of an inbound mesh packet the notifier looks at.
#[derive(Debug, Clone, Copy)]
pub struct MeshPacket<'a> {
    pub from: NodeNum,
    pub port: PortNum,
    pub payload: &'a [u8],
}

impl<'a> MeshPacket<'a> {
    pub fn text(from: NodeNum, payload: &'a [u8]) -> Self {
        Self { from, port: PortNum::TextMessage, payload }
    }

    pub fn is_text_payload(&self) -> bool {
        self.port == PortNum::TextMessage
    }

    pub fn contains_bell(&self) -> bool {
        self.payload.contains(&ASCII_BELL)
    }
}

/// Kind of event that can open an alert episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    Message,
    Bell,
}

impl Trigger {
    /// Triggers raised by a packet, in evaluation order.
    pub fn for_packet(packet: &MeshPacket<'_>) -> impl Iterator<Item = Trigger> {
        let bell = packet.contains_bell();
        [Trigger::Message, Trigger::Bell]
            .into_iter()
            .filter(move |t| *t == Trigger::Message || bell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_detection() {
        assert!(!MeshPacket::text(1, b"hello").contains_bell());
        assert!(MeshPacket::text(1, b"ring\x07ring").contains_bell());
    }

    #[test]
    fn test_trigger_order() {
        let plain = MeshPacket::text(1, b"hi");
        assert_eq!(Trigger::for_packet(&plain).collect::<Vec<_>>(), vec![Trigger::Message]);

        let bell = MeshPacket::text(1, b"\x07");
        assert_eq!(
            Trigger::for_packet(&bell).collect::<Vec<_>>(),
            vec![Trigger::Message, Trigger::Bell]
        );
    }

    #[test]
    fn test_only_text_port_is_text() {
        let packet = MeshPacket { from: 1, port: PortNum::Other(67), payload: b"x" };
        assert!(!packet.is_text_payload());
    }
}
