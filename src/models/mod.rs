pub mod attachment;
pub mod dashboard;
pub mod invoice;
pub mod master;
pub mod purchase_order;
pub mod vendor;

pub use attachment::{Attachment, AttachmentOwner, AttachmentRecord, StoredFile, UploadedFile};
pub use dashboard::{DashboardStats, PoTotals, RecentPo};
pub use invoice::{InvoiceDetail, InvoiceInput, InvoiceRow};
pub use master::{Client, ClientInput, Kategori, KategoriInput};
pub use purchase_order::{
    Memo, MemoDetail, MemoFields, MemoListRow, PurchaseOrder, PurchaseOrderDetail,
    PurchaseOrderFields, PurchaseOrderListRow,
};
pub use vendor::{Vendor, VendorDetail, VendorFields, VendorListRow, VendorVerificationReport};
