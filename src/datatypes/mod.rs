mod address;
mod alert;
pub mod bearer_data;
mod data_coding;
mod display_mode;
mod language;
mod message_status;
mod message_type;
mod numbering_plan;
mod priority;
mod privacy;
mod subparam_id;
mod timestamp;
mod tlv;
mod type_of_number;
mod user_data;
mod user_data_header;

pub use address::{AddressLayout, CdmaSmsAddress, DigitMode, NumberMode};
pub use alert::Alert;
pub use bearer_data::BearerData;
pub use data_coding::MessageEncoding;
pub use display_mode::DisplayMode;
pub use language::Language;
pub use message_status::{ErrorClass, MessageStatus};
pub use message_type::MessageType;
pub use numbering_plan::NumberingPlan;
pub use priority::Priority;
pub use privacy::Privacy;
pub use subparam_id::SubparamId;
pub use timestamp::{RelativeTime, TimePeriod, Timestamp};
pub use tlv::Tlv;
pub use type_of_number::TypeOfNumber;
pub use user_data::UserData;
pub use user_data_header::{ConcatRef, PortAddrs, UserDataHeader};
