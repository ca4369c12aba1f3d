use num_enum::FromPrimitive;
use std::fmt;

/// Teleservice message type carried in the message identifier.
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Deliver = 1,
    Submit = 2,
    Cancellation = 3,
    DeliveryAck = 4,
    UserAck = 5,
    ReadAck = 6,
    DeliverReport = 7,
    SubmitReport = 8,
    #[num_enum(catch_all)]
    Reserved(u8),
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::Reserved(0)
    }
}

impl From<MessageType> for u8 {
    fn from(message_type: MessageType) -> Self {
        match message_type {
            MessageType::Deliver => 1,
            MessageType::Submit => 2,
            MessageType::Cancellation => 3,
            MessageType::DeliveryAck => 4,
            MessageType::UserAck => 5,
            MessageType::ReadAck => 6,
            MessageType::DeliverReport => 7,
            MessageType::SubmitReport => 8,
            MessageType::Reserved(raw) => raw,
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Deliver => write!(f, "deliver"),
            MessageType::Submit => write!(f, "submit"),
            MessageType::Cancellation => write!(f, "cancellation"),
            MessageType::DeliveryAck => write!(f, "delivery-ack"),
            MessageType::UserAck => write!(f, "user-ack"),
            MessageType::ReadAck => write!(f, "read-ack"),
            MessageType::DeliverReport => write!(f, "deliver-report"),
            MessageType::SubmitReport => write!(f, "submit-report"),
            MessageType::Reserved(raw) => write!(f, "reserved({raw})"),
        }
    }
}

impl_bit_field!(infallible MessageType, 4);
