//! Pure computation engines: commission, rate previews, field collection.

pub mod commission;
pub mod fields;
pub mod rate;

pub use commission::{input_commission, output_commission, CommissionError};
pub use fields::{collect_fields, fields_payload, FieldError, FieldInput};
pub use rate::{RateContext, RatePreview};
