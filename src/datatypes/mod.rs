mod address;
mod command_id;
mod command_status;
mod data_coding;
mod datetime;
mod deliver_sm;
mod delivery_receipt;
mod esm_class;
mod interface_version;
mod numeric_plan_indicator;
mod priority_flag;
mod query_sm;
pub mod tlv;
mod type_of_number;

pub use address::{Address, AddressError, MAX_ALPHANUMERIC_LEN, MAX_E164_LEN};
pub use command_id::{CommandId, RESPONSE_MASK};
pub use command_status::CommandStatus;
pub use data_coding::DataCoding;
pub use datetime::{DateTimeError, RelativePeriod, SmppDateTime, SmppTime, parse_smpp_time};
pub use deliver_sm::InboundMessage;
pub use delivery_receipt::{DeliveryReceipt, parse_receipt_date};
pub use esm_class::EsmClass;
pub use interface_version::InterfaceVersion;
pub use numeric_plan_indicator::NumericPlanIndicator;
pub use priority_flag::PriorityFlag;
pub use query_sm::{MessageState, QueryStatus, encode_query_sm};
pub use tlv::{Tlv, TlvError};
pub use type_of_number::TypeOfNumber;
