mod quotation;
mod requests;
mod response;
mod status;

pub use quotation::{Quotation, QuotationDraft, QuotationPatch, QuotationSummary};
pub use requests::{
    CreateQuotationRequest, QuotationFilter, QuotationStatusRequest, UpdateQuotationRequest,
};
pub use response::QuotationResponse;
pub use status::QuotationStatus;
