use num_enum::TryFromPrimitive;

/// command_status values an SMSC may return in a response header.
///
/// Human readable text for each code lives in [`CommandStatus::description`].
#[derive(TryFromPrimitive)]
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommandStatus {
    Ok = 0x00000000,
    InvalidMsgLength = 0x00000001,
    InvalidCommandLength = 0x00000002,
    InvalidCommandId = 0x00000003,
    IncorrectBindStatus = 0x00000004,
    AlreadyBoundState = 0x00000005,
    InvalidPriorityFlag = 0x00000006,
    InvalidRegisteredDeliveryFlag = 0x00000007,
    SystemError = 0x00000008,
    // Reserved   0x00000009
    InvalidSourceAddress = 0x0000000A,
    InvalidDestinationAddress = 0x0000000B,
    InvalidMessageId = 0x0000000C,
    BindFailed = 0x0000000D,
    InvalidPassword = 0x0000000E,
    InvalidSystemId = 0x0000000F,
    // Reserved 0x00000010
    CancelSmFailed = 0x00000011,
    // Reserved 0x00000012
    ReplacedSmFailed = 0x00000013,
    MessageQueueFull = 0x00000014,
    InvalidServiceType = 0x00000015,
    // Reserved 0x00000016 - 0x00000032
    InvalidNumberOfDestinations = 0x00000033,
    InvalidDistributionListName = 0x00000034,
    // Reserved 0x00000035 - 0x0000003F
    InvalidDestinationFlag = 0x00000040,
    // Reserved    0x00000041
    InvalidSubmitWithReplaceRequest = 0x00000042,
    InvalidEsmClassFieldData = 0x00000043,
    CannotSubmitToDistributionList = 0x00000044,
    SubmitFailed = 0x00000045,
    // Reserved 0x00000046 - 0x00000047
    InvalidSourceAddressTon = 0x00000048,
    InvalidSourceAddressNpi = 0x00000049,
    InvalidDestinationAddressTon = 0x00000050,
    InvalidDestinationAddressNpi = 0x00000051,
    // Reserved 0x00000052
    InvalidSystemTypeField = 0x00000053,
    InvalidReplaceIfPresentFlag = 0x00000054,
    InvalidNumberOfMessages = 0x00000055,
    // Reserved 0x00000056 - 0x00000057
    ThrottlingError = 0x00000058,
    // Reserved 0x00000059 - 0x00000060
    InvalidScheduledDeliveryTime = 0x00000061,
    InvalidExpiryTime = 0x00000062,
    InvalidPredefinedMessageId = 0x00000063,
    ReceiverTemporaryAppError = 0x00000064,
    ReceiverPermanentAppError = 0x00000065,
    ReceiverRejectMessageError = 0x00000066,
    QuerySmRequestFailed = 0x00000067,
    // Reserved 0x00000068 - 0x000000BF
    ErrorInOptionalPartofPduBody = 0x000000C0,
    OptionalParameterNotAllowed = 0x000000C1,
    InvalidParameterLength = 0x000000C2,
    ExpectedOptionalParameterMissing = 0x000000C3,
    InvalidOptionalParameterValue = 0x000000C4,
    // Reserved 0x000000C5 - 0x000000FD
    DeliveryFailed = 0x000000FE,
    UnknownError = 0x000000FF,
    // Reserved for SMPP extension
    // 0x00000100- 0x000003FF
    //Reserved for SMPP extension
    //Reserved for SMSC vendor specific errors
    // 0x00000400- 0x000004FF
    //Reserved for SMSC vendor specific errors
    // Reserved 0x00000500- 0xFFFFFFFF
}

impl CommandStatus {
    /// Human-readable text for this status, as published in SMPP v3.4 §5.1.3.
    pub fn description(&self) -> &'static str {
        match self {
            CommandStatus::Ok => "No Error",
            CommandStatus::InvalidMsgLength => "Message Length is invalid",
            CommandStatus::InvalidCommandLength => "Command Length is invalid",
            CommandStatus::InvalidCommandId => "Invalid Command ID",
            CommandStatus::IncorrectBindStatus => "Incorrect BIND Status for given command",
            CommandStatus::AlreadyBoundState => "ESME Already in Bound State",
            CommandStatus::InvalidPriorityFlag => "Invalid Priority Flag",
            CommandStatus::InvalidRegisteredDeliveryFlag => "Invalid Registered Delivery Flag",
            CommandStatus::SystemError => "System Error",
            CommandStatus::InvalidSourceAddress => "Invalid Source Address",
            CommandStatus::InvalidDestinationAddress => "Invalid Dest Addr",
            CommandStatus::InvalidMessageId => "Message ID is invalid",
            CommandStatus::BindFailed => "Bind Failed",
            CommandStatus::InvalidPassword => "Invalid Password",
            CommandStatus::InvalidSystemId => "Invalid System ID",
            CommandStatus::CancelSmFailed => "Cancel SM Failed",
            CommandStatus::ReplacedSmFailed => "Replace SM Failed",
            CommandStatus::MessageQueueFull => "Message Queue Full",
            CommandStatus::InvalidServiceType => "Invalid Service Type",
            CommandStatus::InvalidNumberOfDestinations => "Invalid number of destinations",
            CommandStatus::InvalidDistributionListName => "Invalid Distribution List name",
            CommandStatus::InvalidDestinationFlag => "Destination flag is invalid (submit_multi)",
            CommandStatus::InvalidSubmitWithReplaceRequest => {
                "Invalid 'submit with replace' request (i.e. submit_sm with replace_if_present_flag set)"
            }
            CommandStatus::InvalidEsmClassFieldData => "Invalid esm_class field data",
            CommandStatus::CannotSubmitToDistributionList => "Cannot Submit to Distribution List",
            CommandStatus::SubmitFailed => "submit_sm or submit_multi failed",
            CommandStatus::InvalidSourceAddressTon => "Invalid Source address TON",
            CommandStatus::InvalidSourceAddressNpi => "Invalid Source address NPI",
            CommandStatus::InvalidDestinationAddressTon => "Invalid Destination address TON",
            CommandStatus::InvalidDestinationAddressNpi => "Invalid Destination address NPI",
            CommandStatus::InvalidSystemTypeField => "Invalid system_type field",
            CommandStatus::InvalidReplaceIfPresentFlag => "Invalid replace_if_present flag",
            CommandStatus::InvalidNumberOfMessages => "Invalid number of messages",
            CommandStatus::ThrottlingError => {
                "Throttling error (ESME has exceeded allowed message limits)"
            }
            CommandStatus::InvalidScheduledDeliveryTime => "Invalid Scheduled Delivery Time",
            CommandStatus::InvalidExpiryTime => "Invalid message validity period (Expiry time)",
            CommandStatus::InvalidPredefinedMessageId => "Predefined Message Invalid or Not Found",
            CommandStatus::ReceiverTemporaryAppError => "ESME Receiver Temporary App Error Code",
            CommandStatus::ReceiverPermanentAppError => "ESME Receiver Permanent App Error Code",
            CommandStatus::ReceiverRejectMessageError => "ESME Receiver Reject Message Error Code",
            CommandStatus::QuerySmRequestFailed => "query_sm request failed",
            CommandStatus::ErrorInOptionalPartofPduBody => "Error in the optional part of the PDU Body",
            CommandStatus::OptionalParameterNotAllowed => "Optional Parameter not allowed",
            CommandStatus::InvalidParameterLength => "Invalid Parameter Length",
            CommandStatus::ExpectedOptionalParameterMissing => "Expected Optional Parameter missing",
            CommandStatus::InvalidOptionalParameterValue => "Invalid Optional Parameter Value",
            CommandStatus::DeliveryFailed => "Delivery Failure (used for data_sm_resp)",
            CommandStatus::UnknownError => "Unknown Error",
        }
    }

    /// Describe a raw command_status, including vendor and reserved codes.
    pub fn describe(status: u32) -> &'static str {
        match CommandStatus::try_from(status) {
            Ok(known) => known.description(),
            Err(_) if (0x0000_0400..=0x0000_04FF).contains(&status) => {
                "SMSC vendor specific error"
            }
            Err(_) => "Unknown error",
        }
    }
}
