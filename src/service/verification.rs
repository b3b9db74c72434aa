use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// 供应商验证状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    #[serde(rename = "Terverifikasi")]
    Verified,
    #[serde(rename = "Belum terverifikasi")]
    Unverified,
}

impl VerificationStatus {
    /// 数据库中保存的取值
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Self::Verified => "Terverifikasi",
            Self::Unverified => "Belum terverifikasi",
        }
    }

    /// 无法识别的取值一律视为未验证
    pub fn from_db_str(value: &str) -> Self {
        if value == Self::Verified.as_db_str() {
            Self::Verified
        } else {
            Self::Unverified
        }
    }
}

impl Default for VerificationStatus {
    fn default() -> Self {
        Self::Unverified
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

fn normalize(document_type: &str) -> String {
    document_type.trim().to_uppercase()
}

/// 必备文档清单 (保序去重, 统一大写)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredDocumentSet {
    documents: IndexSet<String>,
}

impl RequiredDocumentSet {
    pub fn new<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let documents = documents
            .into_iter()
            .map(|d| normalize(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(String::as_str)
    }

    /// 按配置顺序列出尚未上传的必备文档
    pub fn missing<'a, I>(&self, uploaded: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let uploaded: HashSet<String> = uploaded.into_iter().map(normalize).collect();
        self.documents
            .iter()
            .filter(|d| !uploaded.contains(*d))
            .cloned()
            .collect()
    }

    /// 必备文档全部在已上传集合中 ⇒ 已验证
    ///
    /// 每次全量重算, 同类文档重复上传只计一次。
    pub fn evaluate<'a, I>(&self, uploaded: I) -> VerificationStatus
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.missing(uploaded).is_empty() {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Unverified
        }
    }
}

impl Default for RequiredDocumentSet {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_REQUIRED_DOCUMENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_FIVE: [&str; 5] = [
        "NPWP_FILE",
        "KTP_DIREKTUR_FILE",
        "SURAT_PERNYATAAN_FILE",
        "AKTA_PENDIRIAN_FILE",
        "NIB_FILE",
    ];

    #[test]
    fn partial_upload_is_unverified() {
        let required = RequiredDocumentSet::default();
        let status = required.evaluate(["NPWP_FILE", "KTP_DIREKTUR_FILE"]);
        assert_eq!(status, VerificationStatus::Unverified);
        assert_eq!(
            required.missing(["NPWP_FILE", "KTP_DIREKTUR_FILE"]),
            vec!["SURAT_PERNYATAAN_FILE", "AKTA_PENDIRIAN_FILE", "NIB_FILE"]
        );
    }

    #[test]
    fn complete_upload_with_duplicates_is_verified() {
        let required = RequiredDocumentSet::default();
        let mut uploaded: Vec<&str> = ALL_FIVE.to_vec();
        uploaded.push("NPWP_FILE");
        uploaded.push("NPWP_FILE");
        assert_eq!(required.evaluate(uploaded), VerificationStatus::Verified);
    }

    #[test]
    fn extra_types_do_not_matter() {
        let required = RequiredDocumentSet::default();
        let mut uploaded: Vec<&str> = ALL_FIVE.to_vec();
        uploaded.push("COMPANY_PROFILE");
        assert_eq!(required.evaluate(uploaded.iter().copied()), VerificationStatus::Verified);

        // 已验证后再加文档仍为已验证
        uploaded.push("KTP_DIREKTUR_FILE");
        assert_eq!(required.evaluate(uploaded), VerificationStatus::Verified);
    }

    #[test]
    fn removing_a_required_type_reverts() {
        let required = RequiredDocumentSet::default();
        assert_eq!(required.evaluate(ALL_FIVE), VerificationStatus::Verified);
        assert_eq!(
            required.evaluate(ALL_FIVE[1..].iter().copied()),
            VerificationStatus::Unverified
        );
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let required = RequiredDocumentSet::new(["npwp_file", " nib_file "]);
        assert_eq!(required.iter().collect::<Vec<_>>(), vec!["NPWP_FILE", "NIB_FILE"]);
        assert_eq!(
            required.evaluate(["Npwp_File", "nib_file"]),
            VerificationStatus::Verified
        );
    }

    #[test]
    fn configured_set_is_deduplicated() {
        let required = RequiredDocumentSet::new(["NPWP_FILE", "NPWP_FILE", "", "NIB_FILE"]);
        assert_eq!(required.len(), 2);
    }

    #[test]
    fn empty_requirement_is_trivially_met() {
        let required = RequiredDocumentSet::new(Vec::<String>::new());
        assert!(required.is_empty());
        assert_eq!(required.evaluate([]), VerificationStatus::Verified);
    }

    #[test]
    fn no_uploads_is_unverified() {
        let required = RequiredDocumentSet::default();
        assert_eq!(required.evaluate([]), VerificationStatus::Unverified);
        assert_eq!(required.missing([]).len(), 5);
    }

    #[test]
    fn status_round_trips_through_db_strings() {
        assert_eq!(VerificationStatus::Verified.as_db_str(), "Terverifikasi");
        assert_eq!(
            VerificationStatus::from_db_str("Belum terverifikasi"),
            VerificationStatus::Unverified
        );
        assert_eq!(
            VerificationStatus::from_db_str("Terverifikasi"),
            VerificationStatus::Verified
        );
        assert_eq!(VerificationStatus::from_db_str("???"), VerificationStatus::Unverified);
        assert_eq!(VerificationStatus::default(), VerificationStatus::Unverified);
        assert_eq!(
            serde_json::to_string(&VerificationStatus::Verified).unwrap(),
            "\"Terverifikasi\""
        );
    }
}
