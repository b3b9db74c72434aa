use crate::db::{queries_procurement, queries_vendor};
use crate::error::AppResult;
use crate::models::{InvoiceDetail, PurchaseOrderListRow, VendorListRow};
use csv::Writer;
use sqlx::PgPool;
use std::fmt::Display;
use std::io::Write;

/// 将 Option 转换为 CSV 字符串
fn option_to_csv<T: Display>(val: &Option<T>) -> String {
    val.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

/// 导出发票 (含派生金额)
pub fn write_invoices_csv<W: Write>(out: W, invoices: &[InvoiceDetail]) -> Result<(), csv::Error> {
    let mut writer = Writer::from_writer(out);
    writer.write_record([
        "id_invoice",
        "no_po",
        "no_invoice",
        "status_invoice",
        "termin",
        "invoice_portion_percent",
        "ppn_status",
        "nominal_po",
        "dpp",
        "ppn",
        "pph",
        "grand_total",
    ])?;

    for detail in invoices {
        let inv = &detail.invoice;
        writer.write_record(&[
            inv.id_invoice.to_string(),
            inv.no_po.clone(),
            option_to_csv(&inv.no_invoice),
            option_to_csv(&inv.status_invoice),
            option_to_csv(&inv.termin),
            inv.invoice_portion_percent.to_string(),
            option_to_csv(&inv.ppn_status),
            inv.nominal_po.to_string(),
            detail.dpp.to_string(),
            detail.ppn.to_string(),
            detail.pph.to_string(),
            detail.grand_total.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// 导出 PO 列表
pub fn write_purchase_orders_csv<W: Write>(out: W, rows: &[PurchaseOrderListRow]) -> Result<(), csv::Error> {
    let mut writer = Writer::from_writer(out);
    writer.write_record([
        "no_po",
        "tanggal_po",
        "nama_vendor",
        "nama_client",
        "no_memo",
        "perihal_project",
        "nominal",
        "status_po",
    ])?;

    for row in rows {
        let po = &row.po;
        writer.write_record(&[
            po.no_po.clone(),
            option_to_csv(&po.tanggal_po),
            option_to_csv(&row.nama_vendor),
            option_to_csv(&row.nama_client),
            option_to_csv(&po.no_memo),
            option_to_csv(&po.perihal_project),
            po.nominal.to_string(),
            option_to_csv(&po.status_po),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// 导出供应商列表
pub fn write_vendors_csv<W: Write>(out: W, rows: &[VendorListRow]) -> Result<(), csv::Error> {
    let mut writer = Writer::from_writer(out);
    writer.write_record([
        "id_vendor",
        "nama_pt_cv",
        "nama_vendor",
        "nama_kategori",
        "alamat",
        "nama_pic",
        "no_pic",
        "status_verifikasi",
    ])?;

    for row in rows {
        let v = &row.vendor;
        writer.write_record(&[
            v.id_vendor.to_string(),
            option_to_csv(&v.nama_pt_cv),
            option_to_csv(&v.nama_vendor),
            option_to_csv(&row.nama_kategori),
            option_to_csv(&v.alamat),
            option_to_csv(&v.nama_pic),
            option_to_csv(&v.no_pic),
            v.status_verifikasi.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// 导出服务: 查询后写入内存缓冲
pub struct ExportService {
    pool: PgPool,
}

impl ExportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn invoices(&self) -> AppResult<Vec<u8>> {
        let rows = queries_procurement::list_invoices(&self.pool).await?;
        let details: Vec<InvoiceDetail> = rows.into_iter().map(|row| row.with_details()).collect();
        let mut buf = Vec::new();
        write_invoices_csv(&mut buf, &details)?;
        tracing::info!("Exported {} invoice(s)", details.len());
        Ok(buf)
    }

    pub async fn purchase_orders(&self) -> AppResult<Vec<u8>> {
        let rows = queries_procurement::list_purchase_orders(&self.pool).await?;
        let mut buf = Vec::new();
        write_purchase_orders_csv(&mut buf, &rows)?;
        tracing::info!("Exported {} PO(s)", rows.len());
        Ok(buf)
    }

    pub async fn vendors(&self) -> AppResult<Vec<u8>> {
        let rows = queries_vendor::list_vendors(&self.pool).await?;
        let mut buf = Vec::new();
        write_vendors_csv(&mut buf, &rows)?;
        tracing::info!("Exported {} vendor(s)", rows.len());
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvoiceRow, PurchaseOrder, Vendor};
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn lines(buf: Vec<u8>) -> Vec<String> {
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn invoice_export_includes_derived_fields() {
        let detail = InvoiceRow {
            id_invoice: 3,
            no_po: "PO/2024/003".to_string(),
            no_invoice: Some("INV-3".to_string()),
            status_invoice: Some("Paid".to_string()),
            termin: Some(2),
            invoice_portion_percent: dec("50"),
            ppn_status: Some("PKP".to_string()),
            nominal_po: dec("1000000"),
        }
        .with_details();

        let mut buf = Vec::new();
        write_invoices_csv(&mut buf, std::slice::from_ref(&detail)).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "id_invoice");
        assert_eq!(&headers[11], "grand_total");

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(&record[1], "PO/2024/003");
        assert_eq!(&record[4], "2");
        assert_eq!(dec(&record[8]), dec("500000"));
        assert_eq!(dec(&record[11]), detail.grand_total);
    }

    #[test]
    fn missing_values_are_blank() {
        let row = PurchaseOrderListRow {
            po: PurchaseOrder {
                no_po: "PO-9".to_string(),
                id_vendor: None,
                id_client: None,
                no_memo: None,
                nominal: dec("1500.50"),
                perihal_project: Some("Renovasi, lantai 2".to_string()),
                tanggal_po: NaiveDate::from_ymd_opt(2024, 5, 17),
                status_po: None,
            },
            nama_vendor: None,
            nama_client: Some("Brand A".to_string()),
        };

        let mut buf = Vec::new();
        write_purchase_orders_csv(&mut buf, &[row]).unwrap();
        let out = lines(buf);
        assert_eq!(out[1], "PO-9,2024-05-17,,Brand A,,\"Renovasi, lantai 2\",1500.50,");
    }

    #[test]
    fn vendor_export_writes_status() {
        let row = VendorListRow {
            vendor: Vendor {
                id_vendor: 1,
                nama_pt_cv: Some("PT Maju Jaya".to_string()),
                nama_vendor: Some("Budi".to_string()),
                id_kategori: Some(2),
                alamat: None,
                no_pic: Some("0812".to_string()),
                nama_pic: Some("Sari".to_string()),
                status_verifikasi: "Terverifikasi".to_string(),
            },
            nama_kategori: Some("Konstruksi".to_string()),
        };

        let mut buf = Vec::new();
        write_vendors_csv(&mut buf, &[row]).unwrap();
        let out = lines(buf);
        assert_eq!(out[1], "1,PT Maju Jaya,Budi,Konstruksi,,Sari,0812,Terverifikasi");
    }
}
