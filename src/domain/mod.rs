//! Domain types for the Finance Express client core.
//!
//! This module provides:
//! - The integer-scaled decimal value model
//! - Currency, method and scheme-field descriptions
//! - Commission packs and tiers
//! - The request, requisite, order and transfer entities with their
//!   lifecycle state machines

pub mod account;
pub mod commission;
pub mod currency;
pub mod decimal;
pub mod message;
pub mod order;
pub mod request;
pub mod requisite;
pub mod wallet;

pub use account::{Account, Country, Language, Timezone};
pub use commission::{CommissionPack, CommissionTier};
pub use currency::{Currency, FieldKind, FieldSpec, FieldValue, Method};
pub use decimal::{DecimalError, RoundMode, DEFAULT_DECIMAL};
pub use message::Message;
pub use order::{Order, OrderAction, OrderRole, OrderState, OrderType};
pub use request::{Request, RequestState, RequestType};
pub use requisite::{
    NewRequisite, Requisite, RequisiteData, RequisiteState, RequisiteStateFilter, RequisiteType,
    RequisiteTypeFilter, RequisiteValidationError,
};
pub use wallet::{Transfer, TransferOperation, Wallet};
