use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Bearer Data sub-parameter identifiers.
///
/// Declaration order is the canonical emission order on encode.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubparamId {
    MessageIdentifier = 0x00,
    UserData = 0x01,
    UserResponseCode = 0x02,
    MessageCenterTimeStamp = 0x03,
    ValidityPeriodAbsolute = 0x04,
    ValidityPeriodRelative = 0x05,
    DeferredDeliveryTimeAbsolute = 0x06,
    DeferredDeliveryTimeRelative = 0x07,
    PriorityIndicator = 0x08,
    PrivacyIndicator = 0x09,
    ReplyOption = 0x0A,
    NumberOfMessages = 0x0B,
    AlertOnMessageDelivery = 0x0C,
    LanguageIndicator = 0x0D,
    CallbackNumber = 0x0E,
    MessageDisplayMode = 0x0F,
    MultipleEncodingUserData = 0x10,
    MessageDepositIndex = 0x11,
    ServiceCategoryProgramData = 0x12,
    ServiceCategoryProgramResults = 0x13,
    MessageStatus = 0x14,
    TpFailureCause = 0x15,
    EnhancedVmn = 0x16,
    EnhancedVmnAck = 0x17,
    // Reserved 0x18 - 0xFF
}
