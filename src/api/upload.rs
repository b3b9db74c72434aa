use crate::error::{AppError, AppResult};
use crate::models::UploadedFile;
use axum::extract::Multipart;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::str::FromStr;

/// multipart 表单: 文本字段 + 上传文件
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl UploadForm {
    pub fn new(fields: HashMap<String, String>, files: Vec<UploadedFile>) -> Self {
        Self { fields, files }
    }

    /// 读取整个表单; 超过 `max_files` 个文件时拒绝
    pub async fn from_multipart(mut multipart: Multipart, max_files: usize) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    // 浏览器未选择文件时会提交空的文件字段
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    if form.files.len() >= max_files {
                        return Err(AppError::Upload(format!(
                            "Maksimal {} file per permintaan",
                            max_files
                        )));
                    }
                    form.files.push(UploadedFile {
                        field_name: name,
                        file_name: Some(file_name).filter(|n| !n.is_empty()),
                        bytes: bytes.to_vec(),
                    });
                }
                None => {
                    let text = field.text().await?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// 文本字段; 空字符串视为未提供
    pub fn text(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn require_text(&self, key: &str) -> AppResult<String> {
        self.text(key)
            .ok_or_else(|| AppError::validation(format!("{} wajib diisi", key)))
    }

    fn parse<T: FromStr>(&self, key: &str, kind: &str) -> AppResult<Option<T>> {
        self.text(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|_| {
                    AppError::validation(format!("{} bukan {} yang valid: {}", key, kind, raw))
                })
            })
            .transpose()
    }

    pub fn int(&self, key: &str) -> AppResult<Option<i32>> {
        self.parse(key, "angka")
    }

    /// 非负金额
    pub fn amount(&self, key: &str) -> AppResult<Option<BigDecimal>> {
        let value: Option<BigDecimal> = self.parse(key, "nominal")?;
        match value {
            Some(v) if v < BigDecimal::from(0) => Err(AppError::validation(format!(
                "{} tidak boleh negatif",
                key
            ))),
            other => Ok(other),
        }
    }

    /// YYYY-MM-DD
    pub fn date(&self, key: &str) -> AppResult<Option<NaiveDate>> {
        self.parse(key, "tanggal")
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> UploadForm {
        UploadForm::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            Vec::new(),
        )
    }

    #[test]
    fn blank_text_is_absent() {
        let f = form(&[("nama_pt_cv", "  "), ("alamat", " Jl. Sudirman 1 ")]);
        assert_eq!(f.text("nama_pt_cv"), None);
        assert_eq!(f.text("alamat").as_deref(), Some("Jl. Sudirman 1"));
        assert_eq!(f.text("missing"), None);
        assert!(matches!(f.require_text("nama_pt_cv"), Err(AppError::Validation(_))));
    }

    #[test]
    fn typed_fields_parse_or_reject() {
        let f = form(&[
            ("id_kategori", "4"),
            ("id_client", "empat"),
            ("nominal", "1500000.75"),
            ("tanggal_po", "2024-02-29"),
            ("tanggal_bad", "29/02/2024"),
        ]);
        assert_eq!(f.int("id_kategori").unwrap(), Some(4));
        assert_eq!(f.int("id_vendor").unwrap(), None);
        assert!(matches!(f.int("id_client"), Err(AppError::Validation(_))));
        assert_eq!(
            f.amount("nominal").unwrap(),
            Some(BigDecimal::from_str("1500000.75").unwrap())
        );
        assert_eq!(f.date("tanggal_po").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert!(f.date("tanggal_bad").is_err());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let f = form(&[("nominal", "-1")]);
        assert!(matches!(f.amount("nominal"), Err(AppError::Validation(_))));
    }
}
