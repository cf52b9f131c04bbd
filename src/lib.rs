//! Client core for the Finance Express peer-to-peer exchange platform.
//!
//! The crate owns the request/requisite/order state machines, the scaled
//! decimal arithmetic behind rate and commission previews, the typed API
//! surface, the chat and file-upload transports, and the reconciliation
//! loop that keeps cached projections consistent with server truth. The
//! server stays authoritative for money throughout: everything computed
//! here is a preview.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod session;
pub mod sync;
pub mod transport;

pub use api::{ApiClient, ApiError, ApiFailure, Page};
pub use config::Config;
pub use domain::{
    Account, CommissionPack, CommissionTier, Currency, FieldKind, FieldSpec, FieldValue, Message,
    Method, Order, OrderAction, OrderRole, OrderState, OrderType, Request, RequestState,
    RequestType, Requisite, RequisiteData, RequisiteState, RequisiteType, RoundMode, Transfer,
    Wallet, DEFAULT_DECIMAL,
};
pub use error::AppError;
pub use session::{ClientStorage, NotificationSettings, Session, TextPack};
pub use sync::{Region, SyncLoop, Tracked, ViewCache};
pub use transport::{ChatHandle, ChatOutgoing, FileBatch, FileKeyBinding};
