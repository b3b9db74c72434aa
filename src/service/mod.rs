pub mod attachments;
pub mod dashboard_service;
pub mod export;
pub mod invoice_calculator;
pub mod invoice_service;
pub mod procurement_service;
pub mod vendor_service;
pub mod verification;

pub use attachments::AttachmentService;
pub use dashboard_service::DashboardService;
pub use export::ExportService;
pub use invoice_calculator::{calculate_invoice_details, InvoiceFigures};
pub use invoice_service::InvoiceService;
pub use procurement_service::ProcurementService;
pub use vendor_service::VendorService;
pub use verification::{RequiredDocumentSet, VerificationStatus};
