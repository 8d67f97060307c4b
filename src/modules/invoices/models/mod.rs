mod invoice;
mod requests;
mod response;
mod status;

pub use invoice::{Invoice, InvoiceDraft, InvoicePatch, InvoiceSummary};
pub use requests::{
    CreateInvoiceRequest, InvoiceFilter, InvoiceStatusRequest, UpdateInvoiceRequest,
};
pub use response::InvoiceResponse;
pub use status::InvoiceStatus;
