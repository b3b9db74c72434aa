use bigdecimal::{BigDecimal, Zero};
use crate::models::{InvoiceDetail, InvoiceRow};

/// 需要缴纳增值税的纳税人身份
pub const PPN_STATUS_PKP: &str = "PKP";

/// PPN 税率 11%
const PPN_RATE_PERCENT: i64 = 11;
/// PPh 预扣税率 2%
const PPH_RATE_PERCENT: i64 = 2;

/// 发票派生金额
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceFigures {
    pub dpp: BigDecimal,
    pub ppn: BigDecimal,
    pub pph: BigDecimal,
    pub grand_total: BigDecimal,
}

fn percent_of(base: &BigDecimal, percent: &BigDecimal) -> BigDecimal {
    base * percent / BigDecimal::from(100)
}

/// 计算发票税额
///
/// - DPP = PO 金额 × 开票比例 / 100
/// - PPN = DPP × 11% (仅 PKP), 否则为 0
/// - PPh = DPP × 2% (始终适用)
/// - 合计 = DPP + PPN − PPh
///
/// 不做范围校验: 比例超出 0–100 或负金额会原样参与运算, 由调用方负责校验。
pub fn calculate_invoice_details(
    invoice_portion_percent: &BigDecimal,
    ppn_status: &str,
    nominal_po: &BigDecimal,
) -> InvoiceFigures {
    let dpp = percent_of(nominal_po, invoice_portion_percent);
    let ppn = if ppn_status == PPN_STATUS_PKP {
        percent_of(&dpp, &BigDecimal::from(PPN_RATE_PERCENT))
    } else {
        BigDecimal::zero()
    };
    let pph = percent_of(&dpp, &BigDecimal::from(PPH_RATE_PERCENT));
    let grand_total = &dpp + &ppn - &pph;

    InvoiceFigures {
        dpp,
        ppn,
        pph,
        grand_total,
    }
}

impl InvoiceRow {
    /// 附加派生金额; nominal_po 为关联 PO 的当前金额
    pub fn with_details(self) -> InvoiceDetail {
        let figures = calculate_invoice_details(
            &self.invoice_portion_percent,
            self.ppn_status.as_deref().unwrap_or_default(),
            &self.nominal_po,
        );
        InvoiceDetail {
            invoice: self,
            dpp: figures.dpp,
            ppn: figures.ppn,
            pph: figures.pph,
            grand_total: figures.grand_total,
        }
    }
}
